use std::collections::BTreeMap;

use super::amount::Amount;
use super::record::SalesRecord;

/// Running sale totals by month, by store, and overall
///
/// Maps are ordered so reports list stores ascending and months
/// lexicographically without a separate sort.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Accumulator {
    by_month: BTreeMap<String, Amount>,
    by_store: BTreeMap<u32, Amount>,
    total: Amount,
    records: u64,
}

impl Accumulator {
    /// Create an empty accumulator
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one record into every total
    pub fn fold(&mut self, record: &SalesRecord) {
        let amount = record.amount();
        *self.by_month.entry(record.date().month_key()).or_default() += amount;
        *self.by_store.entry(record.store_id()).or_default() += amount;
        self.total += amount;
        self.records += 1;
    }

    /// Fold every total of `other` into this accumulator
    pub fn merge(&mut self, other: &Accumulator) {
        for (month, amount) in &other.by_month {
            *self.by_month.entry(month.clone()).or_default() += *amount;
        }
        for (store_id, amount) in &other.by_store {
            *self.by_store.entry(*store_id).or_default() += *amount;
        }
        self.total += other.total;
        self.records += other.records;
    }

    /// Totals keyed by "MM-YY"
    pub fn by_month(&self) -> &BTreeMap<String, Amount> {
        &self.by_month
    }

    /// Totals keyed by store id
    pub fn by_store(&self) -> &BTreeMap<u32, Amount> {
        &self.by_store
    }

    /// Grand total
    pub fn total(&self) -> Amount {
        self.total
    }

    /// Number of records folded in
    pub fn records(&self) -> u64 {
        self.records
    }

    pub fn is_empty(&self) -> bool {
        self.records == 0
    }

    pub(crate) fn from_parts(
        by_month: BTreeMap<String, Amount>,
        by_store: BTreeMap<u32, Amount>,
        total: Amount,
        records: u64,
    ) -> Self {
        Self {
            by_month,
            by_store,
            total,
            records,
        }
    }
}

impl<'a> FromIterator<&'a SalesRecord> for Accumulator {
    fn from_iter<I: IntoIterator<Item = &'a SalesRecord>>(iter: I) -> Self {
        let mut acc = Self::new();
        for record in iter {
            acc.fold(record);
        }
        acc
    }
}
