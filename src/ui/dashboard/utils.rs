//! Dashboard utility functions
//!
//! Row projections and styling shared by the table components and the
//! one-shot `list` command. Everything here is pure.

use crate::events::Source;
use crate::models::{RideRecord, RideStatus};
use crate::pretty::format_brl;
use crate::stats::DriverSummary;
use indexmap::IndexMap;
use ratatui::prelude::Color;

/// One line of the rides table, already formatted for display.
#[derive(Debug, Clone, PartialEq)]
pub struct RideRow {
    pub id: String,
    pub status: RideStatus,
    pub passenger: String,
    pub driver: String,
    pub route: String,
    pub fare: String,
    pub payment_method: String,
}

/// One line of the drivers table.
#[derive(Debug, Clone, PartialEq)]
pub struct DriverRow {
    pub driver: String,
    pub rides: String,
    pub total: String,
    pub average: String,
}

/// Newest first: rows come out in reverse input order. The input is left untouched.
pub fn ride_rows(rides: &[RideRecord]) -> Vec<RideRow> {
    rides
        .iter()
        .rev()
        .map(|ride| RideRow {
            id: ride.display_id().to_string(),
            status: ride.status_kind(),
            passenger: or_dash(&ride.passenger.name),
            driver: or_dash(&ride.driver.name),
            route: format!("{} → {}", or_dash(&ride.origin), or_dash(&ride.destination)),
            fare: format_brl(ride.fare_or_zero()),
            payment_method: or_dash(&ride.payment_method),
        })
        .collect()
}

pub fn driver_rows(groups: &IndexMap<String, DriverSummary>) -> Vec<DriverRow> {
    groups
        .values()
        .map(|summary| DriverRow {
            driver: or_dash(&summary.driver_name),
            rides: summary.ride_count.to_string(),
            total: format_brl(summary.total_fare),
            average: format_brl(summary.average_fare()),
        })
        .collect()
}

/// Icon and color of a status badge.
pub fn status_style(status: RideStatus) -> (&'static str, Color) {
    match status {
        RideStatus::Pendente => ("⏳", Color::Yellow),
        RideStatus::Processada => ("✅", Color::Green),
    }
}

/// Get a ratatui color for an activity-log source
pub fn get_source_color(source: &Source) -> Color {
    match source {
        Source::Poller => Color::Cyan,
        Source::Form => Color::Yellow,
        Source::Exporter => Color::Green,
    }
}

/// Format compact timestamp with date and time from full timestamp
pub fn format_compact_timestamp(timestamp: &str) -> String {
    // Extract from "YYYY-MM-DD HH:MM:SS" format
    let mut parts = timestamp.split(' ');
    if let (Some(date_part), Some(time_part)) = (parts.next(), parts.next()) {
        if let (Some(month_day), Some(time)) = (date_part.get(5..10), time_part.get(0..8)) {
            return format!("{} {}", month_day, time);
        }
    }
    timestamp.to_string()
}

/// Shortens reqwest error chains for the log panel.
pub fn clean_http_error_message(msg: &str) -> String {
    if msg.contains("error sending request") || msg.contains("Connection refused") {
        if let Some((prefix, _)) = msg.split_once(": ") {
            return format!("{}: API unreachable", prefix);
        }
        return "API unreachable".to_string();
    }
    msg.to_string()
}

fn or_dash(value: &str) -> String {
    if value.trim().is_empty() {
        "-".to_string()
    } else {
        value.to_string()
    }
}
