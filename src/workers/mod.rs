//! Background tasks feeding the dashboard.

pub mod core;
pub mod exporter;
pub mod poller;
pub mod submitter;

pub use exporter::ExportJob;
pub use poller::{Poller, PollerHandle, PollerState};
pub use submitter::RideSubmitter;
