use std::sync::Arc;

use tracing::{debug, warn};

use super::pacing::Pacing;
use crate::domain::SalesRecord;
use crate::io::{IoError, RecordSource};
use crate::queue::{ProducerHandle, WorkBudget};

/// Outcome of one producer run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProducerSummary {
    pub id: u32,
    pub produced: u64,
}

/// Claims budget units and enqueues one generated record per unit
///
/// The worker owns a producer handle; when `run` returns the handle is
/// dropped, and the last producer to finish closes the queue.
pub struct ProducerWorker<S: RecordSource> {
    id: u32,
    budget: Arc<WorkBudget>,
    handle: ProducerHandle<SalesRecord>,
    source: S,
    pacing: Pacing,
    rng: fastrand::Rng,
}

impl<S: RecordSource> ProducerWorker<S> {
    /// Create a producer; `id` is also the store id of every record it generates
    pub fn new(
        id: u32,
        budget: Arc<WorkBudget>,
        handle: ProducerHandle<SalesRecord>,
        source: S,
    ) -> Self {
        Self {
            id,
            budget,
            handle,
            source,
            pacing: Pacing::none(),
            rng: fastrand::Rng::new(),
        }
    }

    pub fn with_pacing(mut self, pacing: Pacing) -> Self {
        self.pacing = pacing;
        self
    }

    /// Produce until the budget is exhausted
    ///
    /// A source failure stops this producer; the unit it had claimed is lost,
    /// which the pipeline reports after the join.
    pub fn run(mut self) -> Result<ProducerSummary, IoError> {
        let mut produced = 0u64;

        while self.budget.try_claim() {
            let record = self.source.next_record(self.id).inspect_err(|e| {
                warn!(producer_id = self.id, produced, error = %e, "Record source failed");
            })?;

            self.handle.enqueue(record);
            produced += 1;

            self.pacing.pause(&mut self.rng);
        }

        debug!(producer_id = self.id, produced, "Producer finished");

        Ok(ProducerSummary {
            id: self.id,
            produced,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Amount, SaleDate};
    use crate::io::{RandomSource, ReplaySource};
    use crate::queue::BoundedQueue;

    #[test]
    fn produces_exactly_the_budget() {
        let queue = Arc::new(BoundedQueue::with_capacity(16).unwrap());
        let budget = Arc::new(WorkBudget::new(10));
        let worker = ProducerWorker::new(
            7,
            Arc::clone(&budget),
            queue.producer().unwrap(),
            RandomSource::seeded(1),
        );

        let summary = worker.run().unwrap();

        assert_eq!(summary, ProducerSummary { id: 7, produced: 10 });
        assert_eq!(budget.remaining(), 0);
        assert_eq!(queue.len(), 10);
        assert!(queue.is_closed());
    }

    #[test]
    fn records_carry_the_producer_store_id() {
        let queue = Arc::new(BoundedQueue::with_capacity(4).unwrap());
        let budget = Arc::new(WorkBudget::new(4));
        ProducerWorker::new(3, budget, queue.producer().unwrap(), RandomSource::seeded(2))
            .run()
            .unwrap();

        while let Some(record) = queue.dequeue() {
            assert_eq!(record.store_id(), 3);
        }
    }

    #[test]
    fn zero_budget_produces_nothing_and_closes() {
        let queue = Arc::new(BoundedQueue::<SalesRecord>::with_capacity(1).unwrap());
        let budget = Arc::new(WorkBudget::new(0));

        let summary = ProducerWorker::new(1, budget, queue.producer().unwrap(), RandomSource::new())
            .run()
            .unwrap();

        assert_eq!(summary.produced, 0);
        assert!(queue.is_closed());
        assert_eq!(queue.dequeue(), None);
    }

    #[test]
    fn source_failure_stops_the_producer() {
        let queue = Arc::new(BoundedQueue::with_capacity(4).unwrap());
        let budget = Arc::new(WorkBudget::new(3));
        let date = SaleDate::new(1, 1, 16).unwrap();
        let source = ReplaySource::new(vec![
            SalesRecord::new(date, 1, 1, Amount::from_cents(100)).unwrap(),
        ]);

        let result = ProducerWorker::new(1, budget, queue.producer().unwrap(), source).run();

        assert!(matches!(result, Err(IoError::SourceExhausted(1))));
        assert_eq!(queue.stats().enqueued, 1);
        assert!(queue.is_closed());
    }
}
