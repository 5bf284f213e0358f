use tracing::debug;
use tracing_subscriber::{EnvFilter, Registry, prelude::*};

use super::error::AppError;

/// Install the global tracing subscriber
///
/// Logs go to stderr so stdout carries only the configuration echo and the
/// reports. `RUST_LOG` takes precedence over `default_directive`.
pub fn setup_telemetry(default_directive: &str) -> Result<(), AppError> {
    Registry::default()
        .with(env_filter(default_directive))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_thread_names(true),
        )
        .try_init()
        .map_err(|e| AppError::Telemetry(e.to_string()))?;

    debug!(default_directive, "Telemetry initialised");

    Ok(())
}

fn env_filter(default_directive: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_install_is_an_error() {
        // Whichever call wins the race, at most one install succeeds
        let first = setup_telemetry("warn");
        let second = setup_telemetry("warn");

        assert!(first.is_err() || second.is_err());
        if let Err(e) = second {
            assert!(matches!(e, AppError::Telemetry(_)));
        }
    }
}
