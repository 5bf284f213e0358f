use std::io;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Instant;

use tracing::{error, info};

use super::config::PipelineConfig;
use super::error::PipelineError;
use crate::domain::{Accumulator, SalesRecord};
use crate::engine::{ConsumerSummary, ConsumerWorker, ProducerSummary, ProducerWorker};
use crate::io::{RandomSource, RecordSource, ReportSink};
use crate::queue::{BoundedQueue, QueueStats, WorkBudget};
use crate::storage::SharedAccumulator;

/// Default per-producer source: an OS-seeded random generator
pub type DefaultSources = fn(u32) -> RandomSource;

fn random_source(_producer_id: u32) -> RandomSource {
    RandomSource::new()
}

/// Aborts production early from outside the pipeline
///
/// Cancelling forfeits whatever budget is still unclaimed. Producers stop at
/// their next claim, the queue still closes when the last one exits, and
/// consumers drain what was already enqueued.
#[derive(Debug, Clone)]
pub struct CancelHandle {
    budget: Arc<WorkBudget>,
}

impl CancelHandle {
    /// Cancel production, returning how many records will not be produced
    pub fn cancel(&self) -> u64 {
        let forfeited = self.budget.cancel();
        info!(forfeited, "Production cancelled");
        forfeited
    }

    pub fn remaining(&self) -> u64 {
        self.budget.remaining()
    }
}

/// Everything a finished run produced
#[derive(Debug, Clone)]
pub struct PipelineResults {
    pub producers: Vec<ProducerSummary>,
    pub consumers: Vec<ConsumerSummary>,
    pub global: Accumulator,
    pub queue: QueueStats,
    /// Budget units dropped by cancellation
    pub forfeited: u64,
}

impl PipelineResults {
    pub fn total_produced(&self) -> u64 {
        self.producers.iter().map(|p| p.produced).sum()
    }

    pub fn total_consumed(&self) -> u64 {
        self.consumers.iter().map(|c| c.accumulator.records()).sum()
    }

    /// All consumer-local accumulators merged into one
    pub fn merged_locals(&self) -> Accumulator {
        let mut merged = Accumulator::new();
        for consumer in &self.consumers {
            merged.merge(&consumer.accumulator);
        }
        merged
    }
}

/// Bounded-buffer producer/consumer pipeline
///
/// Spawns one OS thread per producer and consumer around a shared
/// [`BoundedQueue`], waits for all of them, and checks that every produced
/// record was consumed and aggregated exactly once.
///
/// # Example
/// ```rust,ignore
/// let config = PipelineConfig::new(4, 3, 10, 10_000)?;
/// let results = Pipeline::new(config, LockedAccumulator::new(), TextReport::new(io::stdout()))
///     .run()?;
/// assert_eq!(results.total_consumed(), 10_000);
/// ```
pub struct Pipeline<G, R, F = DefaultSources> {
    config: PipelineConfig,
    global: Arc<G>,
    sink: Arc<R>,
    sources: F,
    budget: Arc<WorkBudget>,
    spawn_limit: Option<usize>,
}

impl<G, R> Pipeline<G, R, DefaultSources>
where
    G: SharedAccumulator + 'static,
    R: ReportSink + 'static,
{
    /// Create a pipeline with random record sources
    ///
    /// `global` should start empty; its final snapshot is checked against
    /// the number of records consumed.
    pub fn new(config: PipelineConfig, global: G, sink: R) -> Self {
        Self {
            budget: Arc::new(WorkBudget::new(config.runs())),
            config,
            global: Arc::new(global),
            sink: Arc::new(sink),
            sources: random_source,
            spawn_limit: None,
        }
    }
}

impl<G, R, F, S> Pipeline<G, R, F>
where
    G: SharedAccumulator + 'static,
    R: ReportSink + 'static,
    F: Fn(u32) -> S,
    S: RecordSource + 'static,
{
    /// Replace the per-producer record source factory
    ///
    /// The factory is called once per producer with its id (1-based).
    pub fn with_sources<F2, S2>(self, sources: F2) -> Pipeline<G, R, F2>
    where
        F2: Fn(u32) -> S2,
        S2: RecordSource + 'static,
    {
        Pipeline {
            config: self.config,
            global: self.global,
            sink: self.sink,
            sources,
            budget: self.budget,
            spawn_limit: self.spawn_limit,
        }
    }

    /// Refuse to spawn more than `limit` worker threads
    #[cfg(test)]
    pub(crate) fn with_spawn_limit(mut self, limit: usize) -> Self {
        self.spawn_limit = Some(limit);
        self
    }

    /// Handle for cancelling production while `run` is in progress
    pub fn cancel_handle(&self) -> CancelHandle {
        CancelHandle {
            budget: Arc::clone(&self.budget),
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run to completion
    ///
    /// Blocks the calling thread until every worker has been joined.
    pub fn run(self) -> Result<PipelineResults, PipelineError> {
        let started = Instant::now();
        let config = self.config;
        let queue = Arc::new(BoundedQueue::<SalesRecord>::with_capacity(
            config.buffer_size(),
        )?);

        // Every producer is registered before any thread starts, so the queue
        // cannot close while a producer is still to come.
        let handles = (0..config.producers())
            .map(|_| queue.producer())
            .collect::<Result<Vec<_>, _>>()?;

        info!(
            producers = config.producers(),
            consumers = config.consumers(),
            buffer_size = config.buffer_size(),
            runs = config.runs(),
            "Starting pipeline"
        );

        // A spawn failure stops spawning, but every thread already started is
        // still joined below before the error is returned.
        let mut failure: Option<PipelineError> = None;
        let mut spawner = WorkerSpawner::new(self.spawn_limit);

        let mut consumer_threads = Vec::with_capacity(config.consumers());
        for id in (1..=config.consumers()).map(|i| i as u32) {
            let worker = ConsumerWorker::new(
                id,
                Arc::clone(&queue),
                Arc::clone(&self.global),
                Arc::clone(&self.sink),
            );
            match spawner.spawn(format!("consumer-{}", id), move || worker.run()) {
                Ok(thread) => consumer_threads.push(thread),
                Err(e) => {
                    failure = Some(e);
                    break;
                }
            }
        }

        let mut producer_threads = Vec::with_capacity(config.producers());
        let mut handles = handles.into_iter();
        if failure.is_none() {
            for (id, handle) in (1..).zip(handles.by_ref()) {
                let worker =
                    ProducerWorker::new(id, Arc::clone(&self.budget), handle, (self.sources)(id))
                        .with_pacing(config.pacing());
                match spawner.spawn(format!("producer-{}", id), move || worker.run()) {
                    Ok(thread) => producer_threads.push(thread),
                    Err(e) => {
                        failure = Some(e);
                        break;
                    }
                }
            }
        }

        if let Some(e) = &failure {
            error!(error = %e, "Failed to spawn worker, stopping production");
            self.budget.cancel();
        }
        // Unused handles close the queue once the spawned producers finish
        drop(handles);

        // Join barrier: every thread is joined before any error is returned
        let mut producers = Vec::with_capacity(producer_threads.len());
        for (name, thread) in producer_threads {
            match thread.join() {
                Ok(Ok(summary)) => producers.push(summary),
                Ok(Err(e)) => {
                    error!(worker = %name, error = %e, "Producer failed");
                    failure.get_or_insert(PipelineError::Source(e));
                }
                Err(_) => {
                    error!(worker = %name, "Producer panicked");
                    failure.get_or_insert(PipelineError::WorkerPanicked(name));
                }
            }
        }

        let mut consumers = Vec::with_capacity(consumer_threads.len());
        for (name, thread) in consumer_threads {
            match thread.join() {
                Ok(summary) => consumers.push(summary),
                Err(_) => {
                    error!(worker = %name, "Consumer panicked");
                    failure.get_or_insert(PipelineError::WorkerPanicked(name));
                }
            }
        }

        if let Some(e) = failure {
            return Err(e);
        }

        let mut results = PipelineResults {
            global: self.global.snapshot(),
            queue: queue.stats(),
            forfeited: 0,
            producers,
            consumers,
        };
        let produced = results.total_produced();
        let consumed = results.total_consumed();
        let aggregated = results.global.records();

        if produced != consumed || consumed != aggregated || results.queue.enqueued != produced {
            error!(produced, consumed, aggregated, "Record accounting mismatch");
            return Err(PipelineError::Unaccounted {
                produced,
                consumed,
                aggregated,
            });
        }

        results.forfeited = config.runs() - produced;

        info!(
            produced,
            forfeited = results.forfeited,
            high_water_mark = results.queue.high_water_mark,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Pipeline finished"
        );

        Ok(results)
    }
}

/// Spawns named worker threads, optionally refusing past a fixed count
struct WorkerSpawner {
    limit: Option<usize>,
    spawned: usize,
}

impl WorkerSpawner {
    fn new(limit: Option<usize>) -> Self {
        Self { limit, spawned: 0 }
    }

    fn spawn<T, W>(&mut self, name: String, work: W) -> Result<(String, JoinHandle<T>), PipelineError>
    where
        T: Send + 'static,
        W: FnOnce() -> T + Send + 'static,
    {
        if let Some(limit) = self.limit.filter(|&limit| self.spawned >= limit) {
            return Err(PipelineError::Spawn(io::Error::other(format!(
                "worker thread limit of {} reached",
                limit
            ))));
        }

        let handle = thread::Builder::new()
            .name(name.clone())
            .spawn(work)
            .map_err(PipelineError::Spawn)?;
        self.spawned += 1;
        Ok((name, handle))
    }
}
