use std::io;
use thiserror::Error;

use crate::domain::DomainError;

/// Errors at the edges of the pipeline: record sources and report sinks
#[derive(Error, Debug)]
pub enum IoError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Record source exhausted after {0} records")]
    SourceExhausted(u64),

    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),
}
