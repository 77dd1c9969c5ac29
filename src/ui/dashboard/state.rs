//! Dashboard state management
//!
//! Everything the renderer reads lives here. Render functions receive this
//! struct explicitly; nothing is looked up globally.

use crate::consts::cli_consts::{MAX_ACTIVITY_LOGS, ui::toast_duration};
use crate::environment::Environment;
use crate::events::{DashboardEvent, Event};
use crate::form::{FormField, RideForm, SubmitLock};
use crate::models::{DriverBalance, RideRecord};
use crate::ui::app::UIConfig;

use std::collections::VecDeque;
use std::time::Instant;

/// Which table the body of the dashboard shows.
#[derive(Debug, Copy, Clone, Eq, PartialEq, strum::Display)]
pub enum View {
    #[strum(serialize = "Rides")]
    Rides,
    #[strum(serialize = "Drivers")]
    Drivers,
    #[strum(serialize = "Report")]
    Report,
}

impl View {
    pub const ALL: [View; 3] = [View::Rides, View::Drivers, View::Report];

    pub fn next(self) -> Self {
        match self {
            View::Rides => View::Drivers,
            View::Drivers => View::Report,
            View::Report => View::Rides,
        }
    }

    pub fn index(self) -> usize {
        match self {
            View::Rides => 0,
            View::Drivers => 1,
            View::Report => 2,
        }
    }
}

/// What keystrokes currently edit.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum InputMode {
    Browse,
    /// New-ride form is open with this field focused.
    Form(FormField),
    /// Typing the driver whose balance is tracked.
    DriverSelect,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ToastKind {
    Info,
    Success,
    Warning,
    Error,
}

/// Short-lived notification line.
#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
    pub shown_at: Instant,
}

impl Toast {
    pub fn new(kind: ToastKind, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind,
            shown_at: Instant::now(),
        }
    }

    pub fn is_expired(&self) -> bool {
        self.shown_at.elapsed() >= toast_duration()
    }
}

#[derive(Debug)]
pub struct DashboardState {
    /// The backend the dashboard is connected to.
    pub environment: Environment,
    /// The start time of the application, used for computing uptime.
    pub start_time: Instant,
    /// Whether to enable background colors
    pub with_background_color: bool,
    /// Refresh period, for display.
    pub poll_interval_ms: u64,

    /// Latest ride listing, in the order the API returned it.
    pub rides: Vec<RideRecord>,
    /// Cycle that produced `rides`.
    pub rides_cycle: Option<u64>,
    /// Local time of the last successful listing.
    pub last_refresh: Option<String>,
    /// Driver whose balance is tracked.
    pub balance_driver: Option<String>,
    /// Last balance read for `balance_driver`.
    pub balance: Option<DriverBalance>,

    pub view: View,
    pub input_mode: InputMode,
    pub form: RideForm,
    /// Text typed in driver selection mode.
    pub driver_input: String,
    pub submit_lock: SubmitLock,
    pub toast: Option<Toast>,

    /// Queue of events waiting to be processed
    pub pending_events: VecDeque<DashboardEvent>,
    /// Activity logs for display
    pub activity_logs: VecDeque<Event>,
    /// Animation tick counter
    pub tick: usize,
}

impl DashboardState {
    pub fn new(environment: Environment, start_time: Instant, ui_config: UIConfig) -> Self {
        Self {
            environment,
            start_time,
            with_background_color: ui_config.with_background_color,
            poll_interval_ms: ui_config.poll_interval_ms,
            rides: Vec::new(),
            rides_cycle: None,
            last_refresh: None,
            balance_driver: ui_config.balance_driver,
            balance: None,
            view: View::Rides,
            input_mode: InputMode::Browse,
            form: RideForm::default(),
            driver_input: String::new(),
            submit_lock: SubmitLock::new(),
            toast: None,
            pending_events: VecDeque::new(),
            activity_logs: VecDeque::new(),
            tick: 0,
        }
    }

    pub fn is_submitting(&self) -> bool {
        self.submit_lock.is_held()
    }

    pub fn show_toast(&mut self, kind: ToastKind, message: impl Into<String>) {
        self.toast = Some(Toast::new(kind, message));
    }

    /// Add an event to activity logs with size limit
    pub fn add_to_activity_log(&mut self, event: Event) {
        if self.activity_logs.len() >= MAX_ACTIVITY_LOGS {
            self.activity_logs.pop_front();
        }
        self.activity_logs.push_back(event);
    }

    /// Add an event to the processing queue
    pub fn add_event(&mut self, event: DashboardEvent) {
        self.pending_events.push_back(event);
    }
}
