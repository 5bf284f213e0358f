pub mod config;
pub mod error;
pub mod runner;

// Re-export commonly used types
pub use config::{DEFAULT_RUNS, PipelineConfig};
pub use error::PipelineError;
pub use runner::{CancelHandle, DefaultSources, Pipeline, PipelineResults};
