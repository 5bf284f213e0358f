pub mod error;
pub mod generator;
pub mod report;

// Re-export commonly used types
pub use error::IoError;
pub use generator::{RandomSource, RecordSource, ReplaySource};
pub use report::{ReportSink, TextReport, render_report, write_report};
