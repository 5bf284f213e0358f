use std::io;
use thiserror::Error;

use crate::io::IoError;
use crate::queue::QueueError;

/// Pipeline-level errors
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Queue error: {0}")]
    Queue(#[from] QueueError),

    #[error("Record source error: {0}")]
    Source(#[from] IoError),

    #[error("Failed to spawn worker thread: {0}")]
    Spawn(io::Error),

    #[error("Worker thread panicked: {0}")]
    WorkerPanicked(String),

    #[error(
        "Records unaccounted for: produced {produced}, consumed {consumed}, aggregated {aggregated}"
    )]
    Unaccounted {
        produced: u64,
        consumed: u64,
        aggregated: u64,
    },
}
