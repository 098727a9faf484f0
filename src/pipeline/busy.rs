/// Busy state for the filter screen
///
/// One instance per screen, replacing any notion of a global "is
/// filtering" flag. The Idle -> Running transition is a compare-and-set,
/// which is what enforces the single-in-flight-request rule: a second
/// request while Running simply fails to begin.
use std::sync::atomic::{AtomicU8, Ordering};

const IDLE: u8 = 0;
const RUNNING: u8 = 1;

/// {Idle, Running} state machine guarding the filter pipeline.
///
/// `begin` is called by the dispatcher on the UI context before any
/// asynchronous work starts; `end` is called by the completion router,
/// also on the UI context, after the result has been applied.
#[derive(Debug)]
pub struct BusyState {
    state: AtomicU8,
}

impl BusyState {
    pub fn new() -> Self {
        Self {
            state: AtomicU8::new(IDLE),
        }
    }

    /// Try to move Idle -> Running. Returns false when a run is already
    /// in flight.
    pub fn begin(&self) -> bool {
        self.state
            .compare_exchange(IDLE, RUNNING, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    /// Move back to Idle. Safe to call from the completion router on
    /// both the success and the failure branch.
    pub fn end(&self) {
        self.state.store(IDLE, Ordering::Release);
    }

    pub fn is_busy(&self) -> bool {
        self.state.load(Ordering::Acquire) == RUNNING
    }
}

impl Default for BusyState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_idle() {
        assert!(!BusyState::new().is_busy());
    }

    #[test]
    fn test_begin_end_cycle() {
        let busy = BusyState::new();

        assert!(busy.begin());
        assert!(busy.is_busy());

        busy.end();
        assert!(!busy.is_busy());
    }

    #[test]
    fn test_second_begin_fails_while_running() {
        let busy = BusyState::new();

        assert!(busy.begin());
        assert!(!busy.begin());

        busy.end();
        assert!(busy.begin());
    }
}
