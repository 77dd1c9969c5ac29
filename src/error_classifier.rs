use crate::api::error::ApiError;
use std::str::FromStr;

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Trace = 0,
    Debug = 1,
    Info = 2,
    Warn = 3,
    Error = 4,
}

impl LogLevel {
    /// Directive understood by `EnvFilter`.
    pub fn as_directive(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl FromStr for LogLevel {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(()),
        }
    }
}

impl From<LogLevel> for log::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => log::Level::Trace,
            LogLevel::Debug => log::Level::Debug,
            LogLevel::Info => log::Level::Info,
            LogLevel::Warn => log::Level::Warn,
            LogLevel::Error => log::Level::Error,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ErrorClassifier;

impl ErrorClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Level for a failed read (ride listing). The UI keeps its previous data either way.
    pub fn classify_read_error(&self, error: &ApiError) -> LogLevel {
        match error {
            // Backend restarting or overloaded
            ApiError::Http { status, .. } if (500..=599).contains(status) => LogLevel::Warn,

            // Wrong base URL or route
            ApiError::Http { status, .. } if *status == 404 => LogLevel::Error,

            // Response shape changed under us
            ApiError::Parse(_) => LogLevel::Error,

            // Network issues - usually temporary
            _ => LogLevel::Warn,
        }
    }

    /// Level for a failed balance lookup, which only means "no update this cycle".
    pub fn classify_balance_error(&self, error: &ApiError) -> LogLevel {
        match error {
            ApiError::Parse(_) => LogLevel::Warn,
            _ => LogLevel::Debug,
        }
    }

    /// Level for a failed ride creation. Always shown to the user.
    pub fn classify_write_error(&self, error: &ApiError) -> LogLevel {
        match error {
            ApiError::Http { status, .. } if (400..=499).contains(status) => LogLevel::Warn,
            _ => LogLevel::Error,
        }
    }
}

impl Default for ErrorClassifier {
    fn default() -> Self {
        Self::new()
    }
}
