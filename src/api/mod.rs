use crate::environment::Environment;
use crate::models::{CreateRidePayload, DriverBalance, RideRecord};
use error::ApiError;

pub(crate) mod client;
pub use client::ApiClient;
pub mod error;

#[cfg(test)]
use mockall::automock;

#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait RideApi: Send + Sync {
    fn environment(&self) -> &Environment;

    /// List every ride known to the backend.
    async fn list_rides(&self) -> Result<Vec<RideRecord>, ApiError>;

    /// List the rides paid with the given method.
    async fn list_rides_by_payment(
        &self,
        payment_method: &str,
    ) -> Result<Vec<RideRecord>, ApiError>;

    /// Current balance accumulated by a driver.
    async fn get_balance(&self, driver_name: &str) -> Result<DriverBalance, ApiError>;

    /// Registers a new ride. The backend answers with the stored record, which is ignored.
    async fn create_ride(&self, payload: &CreateRidePayload) -> Result<(), ApiError>;
}
