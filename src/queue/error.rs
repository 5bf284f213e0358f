use thiserror::Error;

/// Queue setup errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueueError {
    #[error("Queue capacity must be at least 1")]
    ZeroCapacity,

    #[error("Queue is closed to new producers")]
    Closed,
}
