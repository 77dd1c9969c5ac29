//! Core worker utilities

use crate::events::{DashboardEvent, Event, EventType};
use crate::logging::LogLevel;
use tokio::sync::mpsc;

/// Common event sending utilities for workers
#[derive(Clone, Debug)]
pub struct EventSender {
    sender: mpsc::Sender<DashboardEvent>,
}

impl EventSender {
    pub fn new(sender: mpsc::Sender<DashboardEvent>) -> Self {
        Self { sender }
    }

    /// Send a generic event. A closed receiver means the display is gone; the event is dropped.
    pub async fn send_event(&self, event: DashboardEvent) {
        let _ = self.sender.send(event).await;
    }

    async fn send_log(&self, event: Event) {
        event.emit();
        self.send_event(DashboardEvent::Log(event)).await;
    }

    pub async fn send_poller_event(
        &self,
        message: String,
        event_type: EventType,
        log_level: LogLevel,
    ) {
        self.send_log(Event::poller_with_level(message, event_type, log_level))
            .await;
    }

    pub async fn send_form_event(&self, message: String, event_type: EventType, log_level: LogLevel) {
        self.send_log(Event::form_with_level(message, event_type, log_level))
            .await;
    }

    pub async fn send_exporter_event(
        &self,
        message: String,
        event_type: EventType,
        log_level: LogLevel,
    ) {
        self.send_log(Event::exporter_with_level(message, event_type, log_level))
            .await;
    }
}
