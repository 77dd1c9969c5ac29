//! Headless mode execution

use super::{
    SessionData,
    messages::{print_session_exit_success, print_session_shutdown, print_session_starting},
};
use crate::events::DashboardEvent;
use crate::models::RideRecord;
use crate::pretty::format_brl;
use crate::stats::dashboard_totals;
use std::error::Error;

/// One console line per refresh cycle.
fn format_cycle_line(cycle: u64, rides: &[RideRecord]) -> String {
    let totals = dashboard_totals(rides);
    format!(
        "Cycle {}: {} rides | total {} | average {} | {} pending, {} processed",
        cycle,
        totals.total_count,
        format_brl(totals.total_fare),
        format_brl(totals.average_fare),
        totals.pending_count,
        totals.processed_count
    )
}

/// Console rendering of an event, `None` for events that stay silent.
fn format_event(event: &DashboardEvent) -> Option<String> {
    match event {
        DashboardEvent::RidesLoaded { cycle, rides } => Some(format_cycle_line(*cycle, rides)),
        DashboardEvent::BalanceLoaded { requested, balance } => Some(format!(
            "Balance of {}: {}",
            requested,
            format_brl(balance.amount())
        )),
        DashboardEvent::Log(event) if event.should_display() => Some(event.to_string()),
        // The matching log entry already says it.
        _ => None,
    }
}

/// Prints every refresh to stdout until Ctrl+C.
pub async fn run_headless_mode(mut session: SessionData) -> Result<(), Box<dyn Error>> {
    print_session_starting("headless", &session.environment);

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            maybe_event = session.event_receiver.recv() => {
                match maybe_event {
                    Some(event) => {
                        if let Some(line) = format_event(&event) {
                            println!("{}", line);
                        }
                    }
                    None => break,
                }
            }
            _ = &mut ctrl_c => break,
        }
    }

    print_session_shutdown();
    session.poller.stop().await;
    print_session_exit_success();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{Event, EventType};
    use crate::logging::LogLevel;
    use crate::models::{Driver, DriverBalance};

    fn ride(driver: &str, fare: f64, status: &str) -> RideRecord {
        RideRecord {
            driver: Driver {
                name: driver.to_string(),
                rating: None,
            },
            fare_amount: Some(fare),
            status: status.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_cycle_line() {
        let rides = vec![ride("Carla", 10.0, "pendente"), ride("Bruno", 25.5, "processada")];
        assert_eq!(
            format_cycle_line(3, &rides),
            "Cycle 3: 2 rides | total R$ 35,50 | average R$ 17,75 | 1 pending, 1 processed"
        );
    }

    #[test]
    fn test_event_lines() {
        let balance = DashboardEvent::BalanceLoaded {
            requested: "Carla".to_string(),
            balance: DriverBalance {
                driver: String::new(),
                balance: Some(1234.5),
            },
        };
        assert_eq!(
            format_event(&balance).as_deref(),
            Some("Balance of Carla: R$ 1.234,50")
        );

        let log = DashboardEvent::Log(Event::poller_with_level(
            "Failed to load rides".to_string(),
            EventType::Error,
            LogLevel::Error,
        ));
        assert!(format_event(&log).unwrap().contains("Failed to load rides"));

        assert_eq!(
            format_event(&DashboardEvent::SubmitFailed("x".to_string())),
            None
        );
    }
}
