use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::Mutex;

use super::error::IoError;
use crate::domain::{Amount, SaleDate, SalesRecord};

/// Two-digit year stamped on every generated sale
pub const SALE_YEAR: u8 = 16;

/// Supplies records to a producer
pub trait RecordSource: Send {
    /// Produce the next record for the given store
    fn next_record(&mut self, store_id: u32) -> Result<SalesRecord, IoError>;
}

/// Uniformly random sales
///
/// Day in [1,30], month in [1,12], year 16, register in [1,6] and an amount
/// in [0.50, 999.99] at cent resolution.
#[derive(Debug, Clone)]
pub struct RandomSource {
    rng: fastrand::Rng,
}

impl RandomSource {
    /// Source seeded from the OS
    pub fn new() -> Self {
        Self {
            rng: fastrand::Rng::new(),
        }
    }

    /// Deterministic source, mainly for tests and reproducible runs
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: fastrand::Rng::with_seed(seed),
        }
    }
}

impl Default for RandomSource {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordSource for RandomSource {
    fn next_record(&mut self, store_id: u32) -> Result<SalesRecord, IoError> {
        let date = SaleDate::new(self.rng.u8(1..=30), self.rng.u8(1..=12), SALE_YEAR)?;
        let register_id = self.rng.u8(SalesRecord::REGISTERS);
        let amount = Amount::from_cents(
            self.rng
                .i64(Amount::MIN_SALE.cents()..=Amount::MAX_SALE.cents()),
        );

        Ok(SalesRecord::new(date, store_id, register_id, amount)?)
    }
}

/// Replays a fixed list of records, shared by every clone
///
/// The requested store id is ignored: each record keeps the store it was
/// recorded with. Asking for more records than were loaded is an error.
#[derive(Debug, Clone)]
pub struct ReplaySource {
    records: Arc<Mutex<VecDeque<SalesRecord>>>,
    loaded: u64,
}

impl ReplaySource {
    pub fn new(records: impl IntoIterator<Item = SalesRecord>) -> Self {
        let records: VecDeque<_> = records.into_iter().collect();
        Self {
            loaded: records.len() as u64,
            records: Arc::new(Mutex::new(records)),
        }
    }

    pub fn remaining(&self) -> usize {
        self.records.lock().len()
    }
}

impl RecordSource for ReplaySource {
    fn next_record(&mut self, _store_id: u32) -> Result<SalesRecord, IoError> {
        self.records
            .lock()
            .pop_front()
            .ok_or(IoError::SourceExhausted(self.loaded))
    }
}
