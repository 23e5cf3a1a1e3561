//! Generated checks for order-independent reassembly and duplicate handling.

use std::num::NonZeroUsize;

use proptest::{
    collection::vec,
    prelude::{Just, Strategy, any},
    prop_assert,
    prop_assert_eq,
    test_runner::{Config, TestCaseError, TestRunner},
};

use super::hash;
use crate::fragment::{FragmentOutcome, FragmentStore, WaveformFragmenter, WaveformHeader};

fn runner(cases: u32) -> TestRunner {
    TestRunner::new(Config {
        cases,
        ..Config::default()
    })
}

/// A blob, a fragment size, and a permutation of the resulting fragment indices.
fn shuffled_fragments() -> impl Strategy<Value = (Vec<u8>, usize, Vec<usize>)> {
    (vec(any::<u8>(), 1..512), 1usize..64).prop_flat_map(|(blob, size)| {
        let count = blob.len().div_ceil(size);
        let order = Just((0..count).collect::<Vec<_>>()).prop_shuffle();
        (Just(blob), Just(size), order)
    })
}

fn split(blob: &[u8], size: usize) -> Vec<(WaveformHeader, Vec<u8>)> {
    WaveformFragmenter::new(NonZeroUsize::new(size).expect("non-zero"))
        .fragment(&hash('p'), blob)
        .expect("fragment blob")
        .iter()
        .map(|datagram| {
            let (header, payload) = WaveformHeader::split(&datagram[1..]).expect("valid fragment");
            (header, payload.to_vec())
        })
        .collect()
}

#[test]
fn any_delivery_order_reassembles_the_original_blob() {
    runner(128)
        .run(&shuffled_fragments(), |(blob, size, permutation)| {
            let fragments = split(&blob, size);
            let mut store = FragmentStore::new();
            let mut completions = Vec::new();

            for (position, index) in permutation.iter().enumerate() {
                let (header, payload) = fragments[*index].clone();
                let (hash, total, order) = header.into_parts();
                match store.accept(hash, total, order, payload) {
                    FragmentOutcome::Completed(done) => completions.push((position, done)),
                    FragmentOutcome::Incomplete => {}
                    FragmentOutcome::Duplicate => {
                        return Err(TestCaseError::fail("unexpected duplicate"));
                    }
                }
            }

            prop_assert_eq!(completions.len(), 1);
            let (position, done) = &completions[0];
            prop_assert_eq!(*position, permutation.len() - 1);
            prop_assert_eq!(done.payload(), blob.as_slice());
            prop_assert!(store.is_empty());
            Ok(())
        })
        .expect("reassembly must not depend on delivery order");
}

#[test]
fn redelivered_fragments_never_change_received_bytes() {
    let strategy = (shuffled_fragments(), vec(any::<u8>(), 0..32));
    runner(96)
        .run(&strategy, |((blob, size, permutation), junk)| {
            let fragments = split(&blob, size);
            prop_assert!(fragments.len() >= 1);
            let mut store = FragmentStore::new();

            // Deliver everything but the last fragment, each followed by a
            // conflicting redelivery of the same order index.
            let (last, rest) = permutation.split_last().expect("at least one fragment");
            for index in rest {
                let (header, payload) = fragments[*index].clone();
                let (hash, total, order) = header.into_parts();
                store.accept(hash.clone(), total, order, payload.clone());
                let before = store.received(hash.as_str());

                let outcome = store.accept(hash.clone(), total, order, junk.clone());
                prop_assert_eq!(outcome, FragmentOutcome::Duplicate);
                prop_assert_eq!(store.received(hash.as_str()), before);
                prop_assert_eq!(store.fragment(hash.as_str(), order), Some(payload.as_slice()));
            }

            let (header, payload) = fragments[*last].clone();
            let (hash, total, order) = header.into_parts();
            let FragmentOutcome::Completed(done) = store.accept(hash, total, order, payload) else {
                return Err(TestCaseError::fail("final fragment must complete"));
            };
            prop_assert_eq!(done.payload(), blob.as_slice());
            Ok(())
        })
        .expect("duplicates must be ignored");
}
