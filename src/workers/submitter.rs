//! Ride submission from the dashboard form

use super::core::EventSender;
use super::poller::PollerHandle;
use crate::api::RideApi;
use crate::error_classifier::ErrorClassifier;
use crate::events::{DashboardEvent, EventType};
use crate::form::SubmitGuard;
use crate::logging::LogLevel;
use crate::models::CreateRidePayload;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Sends new rides to the backend and asks the poller for a fresh listing afterwards.
#[derive(Clone)]
pub struct RideSubmitter {
    api: Arc<dyn RideApi>,
    event_sender: EventSender,
    poller: PollerHandle,
    classifier: ErrorClassifier,
}

impl RideSubmitter {
    pub fn new(api: Arc<dyn RideApi>, event_sender: EventSender, poller: PollerHandle) -> Self {
        Self {
            api,
            event_sender,
            poller,
            classifier: ErrorClassifier::new(),
        }
    }

    /// Submits in the background. `guard` is held until the request settles.
    pub fn spawn(&self, payload: CreateRidePayload, guard: SubmitGuard) -> JoinHandle<()> {
        let submitter = self.clone();
        tokio::spawn(async move {
            let _guard = guard;
            submitter.submit(payload).await;
        })
    }

    /// Returns whether the backend accepted the ride.
    pub async fn submit(&self, payload: CreateRidePayload) -> bool {
        self.event_sender
            .send_form_event(
                format!("Sending ride for {}...", payload.driver.name),
                EventType::Refresh,
                LogLevel::Debug,
            )
            .await;

        match self.api.create_ride(&payload).await {
            Ok(()) => {
                // Show the new record without waiting for the next tick.
                self.poller.refresh_now();
                self.event_sender
                    .send_form_event(
                        format!(
                            "Ride created: {} -> {} with {}",
                            payload.origin, payload.destination, payload.driver.name
                        ),
                        EventType::Success,
                        LogLevel::Info,
                    )
                    .await;
                self.event_sender
                    .send_event(DashboardEvent::RideSubmitted {
                        driver: payload.driver.name,
                    })
                    .await;
                true
            }
            Err(e) => {
                let log_level = self.classifier.classify_write_error(&e);
                self.event_sender
                    .send_form_event(
                        format!("Failed to create ride: {}", e),
                        EventType::Error,
                        log_level,
                    )
                    .await;
                self.event_sender
                    .send_event(DashboardEvent::SubmitFailed(format!(
                        "Error creating ride: {}",
                        e.summary()
                    )))
                    .await;
                false
            }
        }
    }
}
