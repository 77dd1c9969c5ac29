//! Event System
//!
//! Messages sent by background tasks to whoever drives the display, plus the
//! activity-log entries they carry.

use crate::logging::{LogLevel, should_log_with_env};
use crate::models::{DriverBalance, RideRecord};
use chrono::Local;
use std::fmt::Display;
use std::path::PathBuf;

#[derive(Debug, Copy, Clone, Eq, PartialEq, strum::Display)]
pub enum Source {
    /// Periodic refresh of rides and balance.
    Poller,
    /// Ride creation from the form.
    Form,
    /// CSV export.
    Exporter,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, strum::Display)]
pub enum EventType {
    Success,
    Error,
    Refresh,
    Warning,
}

/// One line of the activity log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub source: Source,
    pub msg: String,
    pub timestamp: String,
    pub event_type: EventType,
    pub log_level: LogLevel,
}

impl Event {
    pub fn new(source: Source, msg: String, event_type: EventType, log_level: LogLevel) -> Self {
        Self {
            source,
            msg,
            timestamp: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            event_type,
            log_level,
        }
    }

    pub fn poller_with_level(msg: String, event_type: EventType, log_level: LogLevel) -> Self {
        Self::new(Source::Poller, msg, event_type, log_level)
    }

    pub fn form_with_level(msg: String, event_type: EventType, log_level: LogLevel) -> Self {
        Self::new(Source::Form, msg, event_type, log_level)
    }

    pub fn exporter_with_level(msg: String, event_type: EventType, log_level: LogLevel) -> Self {
        Self::new(Source::Exporter, msg, event_type, log_level)
    }

    pub fn should_display(&self) -> bool {
        // Always show success events and info level events
        if self.event_type == EventType::Success || self.log_level >= LogLevel::Info {
            return true;
        }
        should_log_with_env(self.log_level)
    }

    /// Forwards the entry to the `log` facade.
    pub fn emit(&self) {
        log::log!(
            target: "transflow_dash",
            log::Level::from(self.log_level),
            "[{}] {}",
            self.source,
            self.msg
        );
    }
}

impl Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} [{}] {}", self.event_type, self.timestamp, self.msg)
    }
}

/// Everything a background task can report to the display loop.
#[derive(Debug, Clone, PartialEq)]
pub enum DashboardEvent {
    /// A refresh cycle fetched the ride listing. Later arrivals replace earlier ones.
    RidesLoaded { cycle: u64, rides: Vec<RideRecord> },
    /// A driver's balance was read. `requested` is the name the cycle asked for,
    /// whatever the backend echoes back.
    BalanceLoaded {
        requested: String,
        balance: DriverBalance,
    },
    /// A ride was accepted by the backend.
    RideSubmitted { driver: String },
    /// Ride creation failed; the message is meant for the user.
    SubmitFailed(String),
    /// The CSV export was written to this path.
    Exported(PathBuf),
    /// The export produced no file; the message is meant for the user.
    ExportFailed(String),
    /// Activity-log entry.
    Log(Event),
}
