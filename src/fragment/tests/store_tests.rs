//! Tests for per-hash accumulation, duplicate suppression, and completion.

use std::time::{Duration, Instant};

use rstest::{fixture, rstest};

use super::hash;
use crate::fragment::{ContentHash, FragmentOrder, FragmentOutcome, FragmentStore};

#[fixture]
fn store() -> FragmentStore {
    FragmentStore::new()
}

fn expect_completed(outcome: FragmentOutcome) -> Vec<u8> {
    match outcome {
        FragmentOutcome::Completed(blob) => blob.payload().to_vec(),
        other => panic!("expected completion, got {other:?}"),
    }
}

#[rstest]
fn out_of_order_fragments_assemble_by_order_index(mut store: FragmentStore) {
    let hash = ContentHash::parse("abcdefabcdefabcdefabcdefabcdefab").expect("hash");

    assert_eq!(
        store.accept(hash.clone(), 10, FragmentOrder::new(1), &b"World"[..]),
        FragmentOutcome::Incomplete
    );
    assert_eq!(store.received(hash.as_str()), Some(5));

    let assembled = expect_completed(store.accept(
        hash.clone(),
        10,
        FragmentOrder::new(0),
        &b"Hello"[..],
    ));
    assert_eq!(assembled, b"HelloWorld");
    assert!(!store.contains(hash.as_str()));
    assert!(store.is_empty());
}

#[rstest]
fn duplicate_order_keeps_first_payload(mut store: FragmentStore) {
    let hash = hash('d');
    store.accept(hash.clone(), 6, FragmentOrder::new(0), &b"abc"[..]);

    assert_eq!(
        store.accept(hash.clone(), 6, FragmentOrder::new(0), &b"xyz!"[..]),
        FragmentOutcome::Duplicate
    );
    assert_eq!(store.received(hash.as_str()), Some(3));
    assert_eq!(
        store.fragment(hash.as_str(), FragmentOrder::new(0)),
        Some(&b"abc"[..])
    );

    let assembled = expect_completed(store.accept(hash, 6, FragmentOrder::new(1), &b"def"[..]));
    assert_eq!(assembled, b"abcdef");
}

#[rstest]
fn first_fragment_fixes_the_total(mut store: FragmentStore) {
    let hash = hash('t');
    store.accept(hash.clone(), 4, FragmentOrder::new(0), &b"ab"[..]);

    // A later fragment declaring a larger total does not postpone completion.
    let assembled = expect_completed(store.accept(hash, 100, FragmentOrder::new(1), &b"cd"[..]));
    assert_eq!(assembled, b"abcd");
}

#[rstest]
fn overshooting_total_completes_with_every_byte(mut store: FragmentStore) {
    let hash = hash('o');
    store.accept(hash.clone(), 5, FragmentOrder::new(0), &b"abc"[..]);

    let FragmentOutcome::Completed(blob) = store.accept(hash, 5, FragmentOrder::new(1), &b"def"[..])
    else {
        panic!("overshoot must still complete");
    };
    assert_eq!(blob.payload(), b"abcdef");
    assert_eq!(blob.declared_total(), 5);
    assert!(store.is_empty());
}

#[rstest]
fn zero_total_with_empty_fragment_completes_immediately(mut store: FragmentStore) {
    let outcome = store.accept(hash('z'), 0, FragmentOrder::first(), Vec::<u8>::new());
    let assembled = expect_completed(outcome);
    assert!(assembled.is_empty());
    assert!(store.is_empty());
}

#[rstest]
fn hashes_are_tracked_independently(mut store: FragmentStore) {
    let first = hash('a');
    let second = hash('b');

    store.accept(first.clone(), 4, FragmentOrder::new(0), &b"aa"[..]);
    store.accept(second.clone(), 4, FragmentOrder::new(0), &b"bb"[..]);
    assert_eq!(store.pending_len(), 2);
    assert_eq!(store.buffered_bytes(), 4);

    let assembled = expect_completed(store.accept(
        second.clone(),
        4,
        FragmentOrder::new(1),
        &b"BB"[..],
    ));
    assert_eq!(assembled, b"bbBB");
    assert!(store.contains(first.as_str()));
    assert!(!store.contains(second.as_str()));
}

#[rstest]
fn completed_hash_starts_fresh_when_seen_again(mut store: FragmentStore) {
    let hash = hash('r');
    expect_completed(store.accept(hash.clone(), 2, FragmentOrder::new(0), &b"hi"[..]));

    // Order 0 is not a duplicate: the completed entry no longer exists.
    assert_eq!(
        store.accept(hash.clone(), 4, FragmentOrder::new(0), &b"hi"[..]),
        FragmentOutcome::Incomplete
    );
    assert_eq!(store.received(hash.as_str()), Some(2));
}

#[rstest]
fn purge_evicts_only_entries_older_than_ttl(mut store: FragmentStore) {
    let start = Instant::now();
    let old = hash('1');
    let fresh = hash('2');
    store.accept_at(old.clone(), 8, FragmentOrder::new(0), &b"old"[..], start);
    store.accept_at(
        fresh.clone(),
        8,
        FragmentOrder::new(0),
        &b"new"[..],
        start + Duration::from_secs(20),
    );

    let evicted = store.purge_expired_at(start + Duration::from_secs(30), Duration::from_secs(30));

    assert_eq!(evicted, vec![old.clone()]);
    assert!(!store.contains(old.as_str()));
    assert!(store.contains(fresh.as_str()));
}

#[rstest]
fn later_fragments_do_not_refresh_entry_age(mut store: FragmentStore) {
    let start = Instant::now();
    let hash = hash('3');
    store.accept_at(hash.clone(), 8, FragmentOrder::new(0), &b"ab"[..], start);
    store.accept_at(
        hash.clone(),
        8,
        FragmentOrder::new(1),
        &b"cd"[..],
        start + Duration::from_secs(9),
    );

    let evicted = store.purge_expired_at(start + Duration::from_secs(10), Duration::from_secs(10));
    assert_eq!(evicted, vec![hash]);
}
