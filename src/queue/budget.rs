use std::sync::atomic::{AtomicU64, Ordering};

/// Shared count of records still to be produced
///
/// Producers claim one unit per record. A claim either decrements the
/// counter or fails because it is already zero; it never goes negative.
#[derive(Debug)]
pub struct WorkBudget {
    remaining: AtomicU64,
}

impl WorkBudget {
    pub fn new(runs: u64) -> Self {
        Self {
            remaining: AtomicU64::new(runs),
        }
    }

    /// Atomically claim one unit of work
    ///
    /// Returns false once the budget is exhausted.
    pub fn try_claim(&self) -> bool {
        self.remaining
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| n.checked_sub(1))
            .is_ok()
    }

    /// Forfeit everything not yet claimed, returning how many units were dropped
    pub fn cancel(&self) -> u64 {
        self.remaining.swap(0, Ordering::AcqRel)
    }

    pub fn remaining(&self) -> u64 {
        self.remaining.load(Ordering::Acquire)
    }
}
