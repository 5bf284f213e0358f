//! Prelude module for convenient imports
//!
//! Import everything you need with: `use prodcon::prelude::*;`

// Domain types
pub use crate::domain::{Accumulator, Amount, DomainError, SaleDate, SalesRecord};

// Queue types
pub use crate::queue::{BoundedQueue, ProducerHandle, QueueError, QueueStats, WorkBudget};

// Storage types
pub use crate::storage::{ConcurrentAccumulator, LockedAccumulator, SharedAccumulator};

// Engine types
pub use crate::engine::{ConsumerSummary, ConsumerWorker, Pacing, ProducerSummary, ProducerWorker};

// IO types
pub use crate::io::{
    IoError, RandomSource, RecordSource, ReplaySource, ReportSink, TextReport, render_report,
    write_report,
};

// Pipeline types
pub use crate::pipeline::{
    CancelHandle, DEFAULT_RUNS, Pipeline, PipelineConfig, PipelineError, PipelineResults,
};

// App types
pub use crate::app::{AppError, Args, CliApp, GlobalStore, setup_telemetry};
