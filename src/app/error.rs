use thiserror::Error;

use crate::io::IoError;
use crate::pipeline::PipelineError;

/// Top-level application errors unifying all layer errors
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Report error: {0}")]
    Report(#[from] IoError),

    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    #[error("Telemetry setup failed: {0}")]
    Telemetry(String),

    #[error("Pipeline task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queue::QueueError;

    #[test]
    fn error_display_formats_correctly() {
        assert_eq!(
            AppError::Telemetry("global subscriber already set".to_string()).to_string(),
            "Telemetry setup failed: global subscriber already set"
        );
        assert_eq!(
            AppError::from(PipelineError::InvalidConfig(
                "producers must be greater than 0".to_string()
            ))
            .to_string(),
            "Pipeline error: Invalid configuration: producers must be greater than 0"
        );
    }

    #[test]
    fn pipeline_error_conversion() {
        let app_err = AppError::from(PipelineError::from(QueueError::ZeroCapacity));

        match app_err {
            AppError::Pipeline(PipelineError::Queue(QueueError::ZeroCapacity)) => {}
            _ => panic!("Expected Pipeline error variant"),
        }
    }

    #[test]
    fn report_error_conversion() {
        let app_err = AppError::from(IoError::SourceExhausted(7));

        match app_err {
            AppError::Report(IoError::SourceExhausted(7)) => {}
            _ => panic!("Expected Report error variant"),
        }
    }
}
