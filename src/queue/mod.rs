pub mod bounded;
pub mod budget;
pub mod error;

// Re-export commonly used types
pub use bounded::{BoundedQueue, ProducerHandle, QueueStats};
pub use budget::WorkBudget;
pub use error::QueueError;
