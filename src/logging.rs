//! Log backend and `RUST_LOG` thresholds.
//!
//! Records are written through the `log` macros and collected by a
//! tracing-subscriber `fmt` layer filtered by `RUST_LOG`. The dashboard owns
//! the terminal, so it logs to a file; every other mode logs to stderr.

pub use crate::error_classifier::LogLevel;
use std::fs::{self, File, OpenOptions};
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use thiserror::Error;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};

/// File name of the dashboard log, next to the config file.
pub const LOG_FILE_NAME: &str = "transflow-dash.log";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogSink {
    Stderr,
    File(PathBuf),
}

impl LogSink {
    /// Threshold used when `RUST_LOG` is unset or unparsable. Stderr stays quiet
    /// next to the command output; the file keeps the activity log.
    pub fn default_level(&self) -> LogLevel {
        match self {
            LogSink::Stderr => LogLevel::Warn,
            LogSink::File(_) => LogLevel::Info,
        }
    }
}

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("Could not open log file {path}: {source}")]
    File { path: PathBuf, source: io::Error },

    #[error("Logger already installed: {0}")]
    Init(#[from] TryInitError),
}

/// Installs the global logger. `log` records reach it through the
/// tracing-log bridge that `try_init` sets up.
pub fn init(sink: LogSink) -> Result<(), LoggingError> {
    let filter = env_filter(sink.default_level());
    match sink {
        LogSink::Stderr => subscriber(filter, io::stderr, io::stderr().is_terminal()).try_init()?,
        LogSink::File(path) => {
            let file = open_log_file(&path).map_err(|source| LoggingError::File {
                path: path.clone(),
                source,
            })?;
            subscriber(filter, Mutex::new(file), false).try_init()?
        }
    }
    Ok(())
}

fn subscriber<W>(filter: EnvFilter, writer: W, ansi: bool) -> impl tracing::Subscriber + Send + Sync
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(ansi)
        .with_target(true)
        .finish()
}

fn env_filter(default: LogLevel) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default.as_directive()))
}

/// Appends to the log, creating it and its directory on first use.
fn open_log_file(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

/// Threshold for activity-log entries, from `RUST_LOG`.
pub fn rust_log_threshold() -> LogLevel {
    std::env::var("RUST_LOG")
        .map(|value| parse_rust_log_level(&value))
        .unwrap_or(LogLevel::Info)
}

/// Reads the global level of a `RUST_LOG` value: the last directive without a
/// target wins, else the level of the first `target=level` directive.
pub fn parse_rust_log_level(rust_log: &str) -> LogLevel {
    let directives: Vec<&str> = rust_log.split(',').map(str::trim).collect();
    let global = directives.iter().rev().find(|d| !d.contains('='));
    let level = global
        .or_else(|| directives.first())
        .and_then(|d| d.rsplit('=').next())
        .unwrap_or_default();
    level.parse().unwrap_or(LogLevel::Info)
}

pub fn should_log_with_env(event_level: LogLevel) -> bool {
    event_level >= rust_log_threshold()
}
