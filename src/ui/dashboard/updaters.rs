//! Dashboard state update logic
//!
//! Contains all methods for updating dashboard state from events

use super::state::{DashboardState, InputMode, Toast, ToastKind};
use crate::events::DashboardEvent;
use crate::form::FormField;
use crate::stats::group_by_driver;
use chrono::Local;

impl DashboardState {
    /// Applies queued events and expires the toast. Called once per frame.
    pub fn update(&mut self) {
        self.tick = self.tick.wrapping_add(1);

        while let Some(event) = self.pending_events.pop_front() {
            self.process_event(event);
        }

        if self.toast.as_ref().is_some_and(Toast::is_expired) {
            self.toast = None;
        }
    }

    fn process_event(&mut self, event: DashboardEvent) {
        match event {
            DashboardEvent::RidesLoaded { cycle, rides } => {
                // Whatever resolves last is what is shown, even an older cycle.
                self.rides = rides;
                self.rides_cycle = Some(cycle);
                self.last_refresh = Some(Local::now().format("%H:%M:%S").to_string());
            }
            DashboardEvent::BalanceLoaded { requested, balance } => {
                // Drop answers to requests made for a driver that is no longer selected.
                let selected = self.balance_driver.as_deref().map(str::trim);
                if selected == Some(requested.trim()) {
                    self.balance = Some(balance);
                }
            }
            DashboardEvent::RideSubmitted { driver } => {
                self.form.reset_after_submit();
                self.show_toast(ToastKind::Success, format!("Ride for {} created", driver));
            }
            DashboardEvent::SubmitFailed(message) => {
                self.show_toast(ToastKind::Error, message);
            }
            DashboardEvent::Exported(path) => {
                self.show_toast(
                    ToastKind::Success,
                    format!("Exported to {}", path.display()),
                );
            }
            DashboardEvent::ExportFailed(message) => {
                self.show_toast(ToastKind::Warning, message);
            }
            DashboardEvent::Log(event) => self.add_to_activity_log(event),
        }
    }

    /// Changes the tracked driver. Blank names clear the selection. Returns the new selection.
    pub fn select_driver(&mut self, name: &str) -> Option<String> {
        let name = name.trim();
        let selection = (!name.is_empty()).then(|| name.to_string());
        if selection != self.balance_driver {
            self.balance = None;
        }
        self.balance_driver = selection.clone();
        selection
    }

    /// Distinct driver names of the current listing, in first-appearance order.
    pub fn known_drivers(&self) -> Vec<String> {
        group_by_driver(&self.rides)
            .into_keys()
            .filter(|name| !name.trim().is_empty())
            .collect()
    }

    /// Driver after the current selection in `known_drivers`, wrapping around.
    pub fn next_known_driver(&self) -> Option<String> {
        let drivers = self.known_drivers();
        let next = match self
            .balance_driver
            .as_ref()
            .and_then(|current| drivers.iter().position(|d| d == current))
        {
            Some(idx) => (idx + 1) % drivers.len().max(1),
            None => 0,
        };
        drivers.get(next).cloned()
    }

    pub fn open_form(&mut self) {
        self.input_mode = InputMode::Form(FormField::Passenger);
    }

    pub fn close_input(&mut self) {
        self.input_mode = InputMode::Browse;
        self.driver_input.clear();
    }
}
