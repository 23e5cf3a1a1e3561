//! Exponential delay between failed receives.

use std::time::Duration;

const INITIAL_DELAY: Duration = Duration::from_millis(10);
const MAX_DELAY: Duration = Duration::from_secs(1);

/// Doubles from 10ms up to 1s on consecutive failures; reset on success.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) struct ReceiveBackoff {
    next: Duration,
}

impl Default for ReceiveBackoff {
    fn default() -> Self { Self { next: INITIAL_DELAY } }
}

impl ReceiveBackoff {
    pub(super) fn next_delay(&mut self) -> Duration {
        let delay = self.next;
        self.next = (delay * 2).min(MAX_DELAY);
        delay
    }

    pub(super) fn reset(&mut self) { self.next = INITIAL_DELAY; }
}
