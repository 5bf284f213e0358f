#![allow(dead_code)]

use prodcon::prelude::*;

/// Generate a deterministic batch of records spread over `num_stores` stores
pub fn generate_records(num_records: usize, num_stores: u32, seed: u64) -> Vec<SalesRecord> {
    let mut source = RandomSource::seeded(seed);
    (0..num_records)
        .map(|i| {
            let store_id = (i as u32 % num_stores) + 1;
            source
                .next_record(store_id)
                .expect("random source never fails")
        })
        .collect()
}

/// Reporter that discards everything
pub struct NullSink;

impl ReportSink for NullSink {
    fn report(&self, _title: &str, _accumulator: &Accumulator) -> Result<(), IoError> {
        Ok(())
    }
}
