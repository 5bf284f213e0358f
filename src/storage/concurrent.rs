use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};

use dashmap::DashMap;

use super::traits::SharedAccumulator;
use crate::domain::{Accumulator, Amount, SalesRecord};

/// Sharded global accumulator using DashMap
///
/// Month and store totals live in separate sharded maps and the grand total
/// in an atomic, so consumers folding different keys rarely contend. Every
/// component update is atomic; a snapshot taken while folds are in flight
/// may see a record in one total but not yet in another.
#[derive(Debug, Default)]
pub struct ConcurrentAccumulator {
    by_month: DashMap<String, Amount>,
    by_store: DashMap<u32, Amount>,
    total_cents: AtomicI64,
    records: AtomicU64,
}

impl ConcurrentAccumulator {
    /// Create a new empty concurrent accumulator
    pub fn new() -> Self {
        Self::default()
    }
}

impl SharedAccumulator for ConcurrentAccumulator {
    fn fold(&self, record: &SalesRecord) {
        let amount = record.amount();

        // Entry guards hold the shard lock only for the read-modify-write
        *self.by_month.entry(record.date().month_key()).or_default() += amount;
        *self.by_store.entry(record.store_id()).or_default() += amount;

        self.total_cents.fetch_add(amount.cents(), Ordering::Relaxed);
        self.records.fetch_add(1, Ordering::Relaxed);
    }

    fn snapshot(&self) -> Accumulator {
        let by_month: BTreeMap<_, _> = self
            .by_month
            .iter()
            .map(|entry| (entry.key().clone(), *entry.value()))
            .collect();
        let by_store: BTreeMap<_, _> = self
            .by_store
            .iter()
            .map(|entry| (*entry.key(), *entry.value()))
            .collect();

        Accumulator::from_parts(
            by_month,
            by_store,
            Amount::from_cents(self.total_cents.load(Ordering::Acquire)),
            self.records.load(Ordering::Acquire),
        )
    }
}
