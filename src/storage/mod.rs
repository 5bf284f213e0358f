pub mod concurrent;
pub mod locked;
pub mod traits;

// Re-export commonly used types
pub use concurrent::ConcurrentAccumulator;
pub use locked::LockedAccumulator;
pub use traits::SharedAccumulator;
