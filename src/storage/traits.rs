use std::sync::Arc;

use crate::domain::{Accumulator, SalesRecord};

/// Global accumulator shared by every consumer
///
/// `fold` takes `&self`: implementations synchronise internally so that
/// concurrent folds from different consumers never lose an update.
pub trait SharedAccumulator: Send + Sync {
    /// Fold one record into the shared totals
    fn fold(&self, record: &SalesRecord);

    /// Copy the current totals out
    fn snapshot(&self) -> Accumulator;
}

// Lets several owners share one backend
impl<S: SharedAccumulator + ?Sized> SharedAccumulator for Arc<S> {
    fn fold(&self, record: &SalesRecord) {
        (**self).fold(record)
    }

    fn snapshot(&self) -> Accumulator {
        (**self).snapshot()
    }
}
