//! CSV export triggered from the dashboard. Reads the listing on its own instead of
//! reusing what is on screen.

use super::core::EventSender;
use crate::api::RideApi;
use crate::events::{DashboardEvent, EventType};
use crate::export::{ExportDate, ExportError, write_export};
use crate::logging::LogLevel;
use chrono::Local;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;
use tokio::task::JoinHandle;

#[derive(Error, Debug)]
pub enum ExportJobError {
    #[error("Could not read rides: {0}")]
    Fetch(#[from] crate::api::error::ApiError),
    #[error(transparent)]
    Export(#[from] ExportError),
}

#[derive(Clone)]
pub struct ExportJob {
    api: Arc<dyn RideApi>,
    event_sender: EventSender,
    output_dir: PathBuf,
    date: ExportDate,
}

impl ExportJob {
    pub fn new(
        api: Arc<dyn RideApi>,
        event_sender: EventSender,
        output_dir: PathBuf,
        date: ExportDate,
    ) -> Self {
        Self {
            api,
            event_sender,
            output_dir,
            date,
        }
    }

    pub fn spawn(&self) -> JoinHandle<()> {
        let job = self.clone();
        tokio::spawn(async move {
            let _ = job.run().await;
        })
    }

    pub async fn run(&self) -> Result<PathBuf, ExportJobError> {
        let result = self.export().await;
        match &result {
            Ok(path) => {
                self.event_sender
                    .send_exporter_event(
                        format!("Exported rides to {}", path.display()),
                        EventType::Success,
                        LogLevel::Info,
                    )
                    .await;
                self.event_sender
                    .send_event(DashboardEvent::Exported(path.clone()))
                    .await;
            }
            Err(e) => {
                let log_level = match e {
                    ExportJobError::Export(ExportError::Empty) => LogLevel::Warn,
                    _ => LogLevel::Error,
                };
                self.event_sender
                    .send_exporter_event(format!("Export failed: {}", e), EventType::Error, log_level)
                    .await;
                self.event_sender
                    .send_event(DashboardEvent::ExportFailed(e.to_string()))
                    .await;
            }
        }
        result
    }

    async fn export(&self) -> Result<PathBuf, ExportJobError> {
        let rides = self.api.list_rides().await?;
        let path = write_export(&self.output_dir, &rides, self.date, Local::now())?;
        Ok(path)
    }
}
