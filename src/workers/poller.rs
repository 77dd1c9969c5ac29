//! Periodic refresh of the ride listing and the selected driver's balance.
//!
//! Every tick spawns an independent cycle. A slow backend can therefore have
//! several cycles in flight; none is cancelled and the display keeps whichever
//! listing arrives last.

use super::core::EventSender;
use crate::api::RideApi;
use crate::error_classifier::ErrorClassifier;
use crate::events::{DashboardEvent, EventType};
use crate::logging::LogLevel;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::{Notify, broadcast, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

#[derive(Debug, Copy, Clone, Eq, PartialEq, strum::Display)]
pub enum PollerState {
    Idle,
    Active,
}

/// What one cycle managed to fetch.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CycleReport {
    pub cycle: u64,
    /// Number of rides listed, `None` when the listing failed.
    pub rides: Option<usize>,
    /// Balance read, `None` when skipped or failed.
    pub balance: Option<f64>,
}

/// Cycles overlap freely; the display keeps whichever listing arrives last.
fn spawn_cycle(context: &CycleContext) {
    let context = context.clone();
    tokio::spawn(async move {
        let report = context.run().await;
        log::debug!(
            "poll cycle {} done: rides={:?} balance={:?}",
            report.cycle,
            report.rides,
            report.balance
        );
    });
}

/// Lets other tasks ask for an immediate cycle.
#[derive(Debug, Clone)]
pub struct PollerHandle {
    refresh: Arc<Notify>,
}

impl PollerHandle {
    /// Requests a cycle outside the timer. Requests made while idle run on the next start.
    pub fn refresh_now(&self) {
        self.refresh.notify_one();
    }
}

/// Shared by the timer loop and every spawned cycle.
#[derive(Clone)]
struct CycleContext {
    api: Arc<dyn RideApi>,
    event_sender: EventSender,
    driver: watch::Receiver<Option<String>>,
    counter: Arc<AtomicU64>,
    classifier: ErrorClassifier,
}

impl CycleContext {
    async fn run(&self) -> CycleReport {
        let cycle = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        let driver = self
            .driver
            .borrow()
            .clone()
            .filter(|name| !name.trim().is_empty());

        let (rides, balance) = tokio::join!(self.load_rides(cycle), self.load_balance(driver));
        CycleReport {
            cycle,
            rides,
            balance,
        }
    }

    async fn load_rides(&self, cycle: u64) -> Option<usize> {
        match self.api.list_rides().await {
            Ok(rides) => {
                let count = rides.len();
                self.event_sender
                    .send_poller_event(
                        format!("Cycle {}: loaded {} rides", cycle, count),
                        EventType::Refresh,
                        LogLevel::Debug,
                    )
                    .await;
                self.event_sender
                    .send_event(DashboardEvent::RidesLoaded { cycle, rides })
                    .await;
                Some(count)
            }
            Err(e) => {
                // Displayed data stays as it was.
                let log_level = self.classifier.classify_read_error(&e);
                self.event_sender
                    .send_poller_event(
                        format!("Failed to load rides: {}", e),
                        EventType::Error,
                        log_level,
                    )
                    .await;
                None
            }
        }
    }

    async fn load_balance(&self, driver: Option<String>) -> Option<f64> {
        let driver = driver?;
        match self.api.get_balance(&driver).await {
            Ok(balance) => {
                let amount = balance.amount();
                self.event_sender
                    .send_event(DashboardEvent::BalanceLoaded {
                        requested: driver,
                        balance,
                    })
                    .await;
                Some(amount)
            }
            Err(e) => {
                let log_level = self.classifier.classify_balance_error(&e);
                self.event_sender
                    .send_poller_event(
                        format!("Balance of {} not updated: {}", driver, e),
                        EventType::Warning,
                        log_level,
                    )
                    .await;
                None
            }
        }
    }
}

/// Repeating fetch task with explicit start/stop.
pub struct Poller {
    context: CycleContext,
    interval: Duration,
    refresh: Arc<Notify>,
    shutdown_sender: Option<broadcast::Sender<()>>,
    join_handle: Option<JoinHandle<()>>,
}

impl Poller {
    pub fn new(
        api: Arc<dyn RideApi>,
        interval: Duration,
        event_sender: EventSender,
        driver: watch::Receiver<Option<String>>,
    ) -> Self {
        Self {
            context: CycleContext {
                api,
                event_sender,
                driver,
                counter: Arc::new(AtomicU64::new(0)),
                classifier: ErrorClassifier::new(),
            },
            interval,
            refresh: Arc::new(Notify::new()),
            shutdown_sender: None,
            join_handle: None,
        }
    }

    pub fn state(&self) -> PollerState {
        if self.shutdown_sender.is_some() {
            PollerState::Active
        } else {
            PollerState::Idle
        }
    }

    pub fn handle(&self) -> PollerHandle {
        PollerHandle {
            refresh: Arc::clone(&self.refresh),
        }
    }

    /// Runs a first cycle right away, then one per interval. No-op when already active.
    pub fn start(&mut self) {
        if self.state() == PollerState::Active {
            return;
        }
        let (shutdown_sender, mut shutdown) = broadcast::channel(1);
        let context = self.context.clone();
        let refresh = Arc::clone(&self.refresh);
        let period = self.interval;

        let handle = tokio::spawn(async move {
            // The first tick completes immediately.
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = shutdown.recv() => break,
                    _ = ticker.tick() => spawn_cycle(&context),
                    _ = refresh.notified() => spawn_cycle(&context),
                }
            }
        });

        self.shutdown_sender = Some(shutdown_sender);
        self.join_handle = Some(handle);
    }

    /// Stops scheduling cycles. Cycles already in flight still complete.
    pub async fn stop(&mut self) {
        if let Some(sender) = self.shutdown_sender.take() {
            let _ = sender.send(());
        }
        if let Some(handle) = self.join_handle.take() {
            let _ = handle.await;
        }
    }
}
