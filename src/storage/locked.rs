use parking_lot::Mutex;

use super::traits::SharedAccumulator;
use crate::domain::{Accumulator, SalesRecord};

/// Global accumulator behind a single mutex
///
/// Each fold updates month, store and grand totals in one critical section,
/// so a snapshot never observes a half-applied record.
#[derive(Debug, Default)]
pub struct LockedAccumulator {
    inner: Mutex<Accumulator>,
}

impl LockedAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume the wrapper and return the totals
    pub fn into_inner(self) -> Accumulator {
        self.inner.into_inner()
    }
}

impl SharedAccumulator for LockedAccumulator {
    fn fold(&self, record: &SalesRecord) {
        self.inner.lock().fold(record);
    }

    fn snapshot(&self) -> Accumulator {
        self.inner.lock().clone()
    }
}
