pub mod consumer;
pub mod pacing;
pub mod producer;

// Re-export commonly used types
pub use consumer::{ConsumerSummary, ConsumerWorker};
pub use pacing::Pacing;
pub use producer::{ProducerSummary, ProducerWorker};
