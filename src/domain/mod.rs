pub mod accumulator;
pub mod amount;
pub mod error;
pub mod record;

// Re-export commonly used types
pub use accumulator::Accumulator;
pub use amount::Amount;
pub use error::DomainError;
pub use record::{SaleDate, SalesRecord};
