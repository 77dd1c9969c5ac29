//! New-ride form: input collection, validation and the "submitting" lock.

use crate::consts::cli_consts::ride_defaults;
use crate::models::{CreateRidePayload, NewRideDriver, Passenger};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Fare is required")]
    EmptyFare,

    #[error("Fare '{0}' is not a number")]
    InvalidFare(String),

    #[error("Fare cannot be negative")]
    NegativeFare,
}

/// Editable fields, in tab order.
#[derive(Debug, Copy, Clone, Eq, PartialEq, strum::Display)]
pub enum FormField {
    #[strum(serialize = "Passenger")]
    Passenger,
    #[strum(serialize = "Driver")]
    Driver,
    #[strum(serialize = "Origin")]
    Origin,
    #[strum(serialize = "Destination")]
    Destination,
    #[strum(serialize = "Fare (R$)")]
    Fare,
}

impl FormField {
    pub const ALL: [FormField; 5] = [
        FormField::Passenger,
        FormField::Driver,
        FormField::Origin,
        FormField::Destination,
        FormField::Fare,
    ];

    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|f| *f == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn previous(self) -> Self {
        let idx = Self::ALL.iter().position(|f| *f == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Raw user input for a new ride.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RideForm {
    pub passenger_name: String,
    pub driver_name: String,
    pub origin: String,
    pub destination: String,
    pub fare: String,
}

impl RideForm {
    pub fn field(&self, field: FormField) -> &str {
        match field {
            FormField::Passenger => &self.passenger_name,
            FormField::Driver => &self.driver_name,
            FormField::Origin => &self.origin,
            FormField::Destination => &self.destination,
            FormField::Fare => &self.fare,
        }
    }

    pub fn field_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::Passenger => &mut self.passenger_name,
            FormField::Driver => &mut self.driver_name,
            FormField::Origin => &mut self.origin,
            FormField::Destination => &mut self.destination,
            FormField::Fare => &mut self.fare,
        }
    }

    /// Builds the creation payload. Nothing is sent when the fare does not parse.
    pub fn build_payload(&self) -> Result<CreateRidePayload, ValidationError> {
        let fare_amount = parse_fare(&self.fare)?;
        Ok(CreateRidePayload {
            passenger: Passenger {
                name: self.passenger_name.trim().to_string(),
                phone: ride_defaults::PASSENGER_PHONE.to_string(),
            },
            driver: NewRideDriver {
                name: self.driver_name.trim().to_string(),
                rating: ride_defaults::DRIVER_RATING,
            },
            origin: self.origin.trim().to_string(),
            destination: self.destination.trim().to_string(),
            fare_amount,
            payment_method: ride_defaults::PAYMENT_METHOD.to_string(),
        })
    }

    /// Clears what changes from one ride to the next; driver and route are kept.
    pub fn reset_after_submit(&mut self) {
        self.passenger_name.clear();
    }
}

/// Parses a fare typed as `12.50` or `12,50`.
pub fn parse_fare(input: &str) -> Result<f64, ValidationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyFare);
    }
    let normalized = if trimmed.contains(',') && !trimmed.contains('.') {
        trimmed.replace(',', ".")
    } else {
        trimmed.to_string()
    };
    let fare: f64 = normalized
        .parse()
        .map_err(|_| ValidationError::InvalidFare(trimmed.to_string()))?;
    if !fare.is_finite() {
        return Err(ValidationError::InvalidFare(trimmed.to_string()));
    }
    if fare < 0.0 {
        return Err(ValidationError::NegativeFare);
    }
    Ok(fare)
}

/// Flag shared between the form and its in-flight submission.
#[derive(Debug, Clone, Default)]
pub struct SubmitLock {
    busy: Arc<AtomicBool>,
}

impl SubmitLock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_held(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Returns `None` while another submission holds the lock.
    pub fn try_acquire(&self) -> Option<SubmitGuard> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| SubmitGuard {
                busy: Arc::clone(&self.busy),
            })
    }
}

/// Releases the lock when dropped, whatever way the submission ends.
#[derive(Debug)]
pub struct SubmitGuard {
    busy: Arc<AtomicBool>,
}

impl Drop for SubmitGuard {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::Release);
    }
}
