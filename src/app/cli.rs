use std::future::Future;

use tokio_util::sync::CancellationToken;
use tracing::warn;

use super::error::AppError;

/// Reusable CLI application runner that handles:
/// - Signal handling (SIGINT, SIGTERM, SIGHUP)
/// - Draining in-flight work when interrupted
/// - Exit codes (0 = success, 1 = error, 130 = SIGINT, 143 = SIGTERM)
pub struct CliApp {
    name: String,
    drain_on_signal: bool,
}

impl CliApp {
    /// Create a new CLI application runner
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            drain_on_signal: false,
        }
    }

    /// Configure whether a signal cancels the token and lets the main
    /// function finish, instead of exiting immediately
    pub fn with_drain_on_signal(mut self, enabled: bool) -> Self {
        self.drain_on_signal = enabled;
        self
    }

    /// Run the CLI application with signal handling
    ///
    /// The main function receives a token that is cancelled on the first
    /// signal. This function never returns: it calls `std::process::exit`
    /// with the appropriate code.
    pub async fn run<F, Fut>(self, main_fn: F) -> !
    where
        F: FnOnce(CancellationToken) -> Fut,
        Fut: Future<Output = Result<(), AppError>>,
    {
        let shutdown = CancellationToken::new();
        let main_fut = main_fn(shutdown.clone());
        tokio::pin!(main_fut);

        let signal_code = tokio::select! {
            result = &mut main_fut => std::process::exit(exit_code(&self.name, result)),
            signal_code = wait_for_signal() => signal_code,
        };

        if self.drain_on_signal {
            eprintln!("Interrupted, draining queued records...");
            shutdown.cancel();
            if let Err(e) = main_fut.await {
                eprintln!("{}: Error: {}", self.name, e);
            }
        }

        std::process::exit(signal_code);
    }
}

fn exit_code(name: &str, result: Result<(), AppError>) -> i32 {
    match result {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("{}: Error: {}", name, e);
            1
        }
    }
}

/// Wait for any Unix signal (SIGINT, SIGTERM, SIGHUP) or Ctrl+C
/// Returns the exit code to use (130 for SIGINT, 143 for SIGTERM, etc.)
///
/// If the handlers cannot be installed this never resolves.
async fn wait_for_signal() -> i32 {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        let (Ok(mut sigterm), Ok(mut sigint), Ok(mut sighup)) = (
            signal(SignalKind::terminate()),
            signal(SignalKind::interrupt()),
            signal(SignalKind::hangup()),
        ) else {
            warn!("Failed to install signal handlers");
            return std::future::pending().await;
        };

        tokio::select! {
            _ = sigterm.recv() => {
                eprintln!("Received SIGTERM");
                143 // 128 + 15
            }
            _ = sigint.recv() => {
                eprintln!("Received SIGINT");
                130 // 128 + 2
            }
            _ = sighup.recv() => {
                eprintln!("Received SIGHUP");
                129 // 128 + 1
            }
        }
    }

    #[cfg(not(unix))]
    {
        if tokio::signal::ctrl_c().await.is_err() {
            warn!("Failed to install Ctrl+C handler");
            return std::future::pending().await;
        }
        eprintln!("Received Ctrl+C");
        130
    }
}
