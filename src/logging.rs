//! Diagnostics for the quiz.
//!
//! While the quiz runs, the terminal is in raw mode on the alternate screen,
//! so anything written to stdout or stderr would tear the card layout. Events
//! therefore go to a file named by `HANZI_QUIZ_LOG`, and only the session
//! summary is printed, after the terminal has been restored.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use tracing_subscriber::EnvFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Env var holding the log file prefix. Unset means no logging.
pub const LOG_ENV_VAR: &str = "HANZI_QUIZ_LOG";

/// `{prefix}.{started}.{pid}`, one file per quiz run.
pub fn log_file_path(prefix: &str, started: u64, pid: u32) -> PathBuf {
    PathBuf::from(format!("{prefix}.{started}.{pid}"))
}

/// Install the file subscriber if `HANZI_QUIZ_LOG` is set.
///
/// Must run before the terminal is taken over: the only failure report is a
/// plain stderr line. Returns the file in use so it can be named on exit.
pub fn init_tracing() -> Option<PathBuf> {
    let prefix = std::env::var(LOG_ENV_VAR).ok().filter(|p| !p.trim().is_empty())?;
    let started = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    let path = log_file_path(&prefix, started, std::process::id());

    let file = match std::fs::File::create(&path) {
        Ok(file) => file,
        Err(e) => {
            eprintln!("hanzi-quiz: not logging, cannot create {}: {e}", path.display());
            return None;
        }
    };

    // Sheet requests and session transitions at info; RUST_LOG narrows or widens.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(file)
                .with_ansi(false)
                .with_target(true),
        )
        .init();

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "hanzi-quiz starting");
    Some(path)
}
