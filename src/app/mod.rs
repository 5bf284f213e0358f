pub mod args;
pub mod cli;
pub mod error;
pub mod telemetry;

// Re-export commonly used types
pub use args::{Args, GlobalStore};
pub use cli::CliApp;
pub use error::AppError;
pub use telemetry::setup_telemetry;
