//! Bookkeeping of datagram senders seen during a session.
//!
//! The registry carries a sticky `changed` flag for consumers that poll: any
//! newly seen sender raises it, and only [`SourceRegistry::clear_changed`]
//! lowers it again.

use std::collections::BTreeSet;

/// Set of distinct sender addresses with a level-triggered change flag.
#[derive(Debug, Default)]
pub struct SourceRegistry {
    sources: BTreeSet<String>,
    changed: bool,
}

impl SourceRegistry {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Record a sender, returning `true` if it had not been seen before.
    ///
    /// # Examples
    ///
    /// ```
    /// use clx_telemetry::sources::SourceRegistry;
    ///
    /// let mut registry = SourceRegistry::new();
    /// assert!(registry.record("192.168.1.20"));
    /// assert!(!registry.record("192.168.1.20"));
    /// assert!(registry.changed());
    /// ```
    pub fn record(&mut self, sender: &str) -> bool {
        if self.sources.contains(sender) {
            return false;
        }
        self.sources.insert(sender.to_owned());
        self.changed = true;
        true
    }

    /// Whether a new sender appeared since the flag was last cleared.
    #[must_use]
    pub const fn changed(&self) -> bool { self.changed }

    /// Lower the change flag.
    pub fn clear_changed(&mut self) { self.changed = false; }

    /// Return the change flag and lower it in one step.
    pub fn take_changed(&mut self) -> bool { std::mem::take(&mut self.changed) }

    #[must_use]
    pub fn contains(&self, sender: &str) -> bool { self.sources.contains(sender) }

    /// Every sender seen so far, in sorted order.
    #[must_use]
    pub fn sources(&self) -> Vec<String> { self.sources.iter().cloned().collect() }

    #[must_use]
    pub fn len(&self) -> usize { self.sources.len() }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.sources.is_empty() }
}

#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};

    use super::SourceRegistry;

    #[fixture]
    fn registry() -> SourceRegistry {
        SourceRegistry::new()
    }

    #[rstest]
    fn new_registry_is_unchanged(registry: SourceRegistry) {
        assert!(!registry.changed());
        assert!(registry.is_empty());
    }

    #[rstest]
    fn repeated_sender_raises_flag_once(mut registry: SourceRegistry) {
        assert!(registry.record("10.0.0.5"));
        assert!(registry.changed());
        registry.clear_changed();

        assert!(!registry.record("10.0.0.5"));
        assert!(!registry.changed());
        assert_eq!(registry.len(), 1);
    }

    #[rstest]
    fn flag_stays_raised_until_cleared(mut registry: SourceRegistry) {
        registry.record("10.0.0.5");
        registry.record("10.0.0.5");
        registry.record("10.0.0.6");
        assert!(registry.changed());
        assert!(registry.changed());

        assert!(registry.take_changed());
        assert!(!registry.changed());
    }

    #[rstest]
    fn sources_are_listed_in_sorted_order(mut registry: SourceRegistry) {
        registry.record("10.0.0.9");
        registry.record("10.0.0.10");
        registry.record("10.0.0.9");

        assert_eq!(registry.sources(), vec!["10.0.0.10", "10.0.0.9"]);
        assert!(registry.contains("10.0.0.9"));
        assert!(!registry.contains("10.0.0.1"));
    }
}
