use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::{Accumulator, SalesRecord};
use crate::io::ReportSink;
use crate::queue::BoundedQueue;
use crate::storage::SharedAccumulator;

/// Outcome of one consumer run: the records it alone aggregated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsumerSummary {
    pub id: u32,
    pub accumulator: Accumulator,
}

/// Drains the queue into a private accumulator and the shared global one
pub struct ConsumerWorker<G: ?Sized, R: ?Sized> {
    id: u32,
    queue: Arc<BoundedQueue<SalesRecord>>,
    global: Arc<G>,
    sink: Arc<R>,
    local: Accumulator,
}

impl<G, R> ConsumerWorker<G, R>
where
    G: SharedAccumulator + ?Sized,
    R: ReportSink + ?Sized,
{
    pub fn new(
        id: u32,
        queue: Arc<BoundedQueue<SalesRecord>>,
        global: Arc<G>,
        sink: Arc<R>,
    ) -> Self {
        Self {
            id,
            queue,
            global,
            sink,
            local: Accumulator::new(),
        }
    }

    /// Title used for this consumer's report
    pub fn report_title(&self) -> String {
        format!("Consumer Thread {}", self.id)
    }

    /// Consume until the queue is closed and drained, then report local totals
    pub fn run(mut self) -> ConsumerSummary {
        while let Some(record) = self.queue.dequeue() {
            self.local.fold(&record);
            self.global.fold(&record);
        }

        debug!(
            consumer_id = self.id,
            records = self.local.records(),
            "Consumer drained queue"
        );

        // Report failures are not fatal
        if let Err(e) = self.sink.report(&self.report_title(), &self.local) {
            warn!(consumer_id = self.id, error = %e, "Failed to write consumer report");
        }

        ConsumerSummary {
            id: self.id,
            accumulator: self.local,
        }
    }
}
