//! Session setup and initialization

use crate::api::{ApiClient, RideApi};
use crate::consts::cli_consts::EVENT_QUEUE_SIZE;
use crate::environment::Environment;
use crate::events::DashboardEvent;
use crate::export::ExportDate;
use crate::workers::core::EventSender;
use crate::workers::{ExportJob, Poller, RideSubmitter};
use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};

/// Knobs of a dashboard session, already resolved from flags and config.
#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub poll_interval: Duration,
    pub request_timeout: Option<Duration>,
    /// Driver whose balance is tracked from the start.
    pub balance_driver: Option<String>,
    pub export_dir: PathBuf,
    pub export_date: ExportDate,
}

/// Session data for both TUI and headless modes
pub struct SessionData {
    /// Events from the poller, the submitter and the exporter
    pub event_receiver: mpsc::Receiver<DashboardEvent>,
    /// Running poller; stopped when the session ends
    pub poller: Poller,
    pub submitter: RideSubmitter,
    pub exporter: ExportJob,
    /// Selected driver, read by every poll cycle
    pub driver_sender: watch::Sender<Option<String>>,
    pub environment: Environment,
    pub options: SessionOptions,
}

/// Builds the API client and background tasks, and starts polling.
pub fn setup_session(
    environment: Environment,
    options: SessionOptions,
) -> Result<SessionData, Box<dyn Error>> {
    let client = ApiClient::with_timeout(environment.clone(), options.request_timeout)?;
    let api: Arc<dyn RideApi> = Arc::new(client);
    Ok(setup_session_with_api(environment, api, options))
}

/// Same as [`setup_session`] with an already-built API implementation.
pub fn setup_session_with_api(
    environment: Environment,
    api: Arc<dyn RideApi>,
    options: SessionOptions,
) -> SessionData {
    let (sender, event_receiver) = mpsc::channel::<DashboardEvent>(EVENT_QUEUE_SIZE);
    let event_sender = EventSender::new(sender);
    let (driver_sender, driver_receiver) = watch::channel(options.balance_driver.clone());

    let mut poller = Poller::new(
        Arc::clone(&api),
        options.poll_interval,
        event_sender.clone(),
        driver_receiver,
    );
    let submitter = RideSubmitter::new(Arc::clone(&api), event_sender.clone(), poller.handle());
    let exporter = ExportJob::new(
        api,
        event_sender,
        options.export_dir.clone(),
        options.export_date,
    );

    poller.start();

    SessionData {
        event_receiver,
        poller,
        submitter,
        exporter,
        driver_sender,
        environment,
        options,
    }
}
