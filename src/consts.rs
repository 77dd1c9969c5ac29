pub mod cli_consts {
    //! Dashboard Configuration Constants
    //!
    //! Constants for the dashboard, organized by functional area.

    // =============================================================================
    // QUEUE CONFIGURATION
    // =============================================================================

    /// The maximum number of events to keep in the activity logs.
    pub const MAX_ACTIVITY_LOGS: usize = 100;

    /// Maximum number of buffered events between background tasks and the UI.
    pub const EVENT_QUEUE_SIZE: usize = 100;

    // =============================================================================
    // POLLING CONFIGURATION
    // =============================================================================

    /// Period of the refresh cycle (milliseconds).
    pub const DEFAULT_POLL_INTERVAL_MS: u64 = 2000;

    // =============================================================================
    // UI CONFIGURATION
    // =============================================================================

    pub mod ui {
        use std::time::Duration;

        /// How long the splash screen stays up before the dashboard.
        pub const SPLASH_DURATION_MS: u64 = 1500;

        /// How long a toast notification stays visible (milliseconds).
        pub const TOAST_DURATION_MS: u64 = 3000;

        /// Key-event poll timeout of the UI loop (milliseconds).
        pub const INPUT_POLL_MS: u64 = 100;

        pub const fn splash_duration() -> Duration {
            Duration::from_millis(SPLASH_DURATION_MS)
        }

        pub const fn toast_duration() -> Duration {
            Duration::from_millis(TOAST_DURATION_MS)
        }

        pub const fn input_poll() -> Duration {
            Duration::from_millis(INPUT_POLL_MS)
        }
    }

    // =============================================================================
    // RIDE CREATION DEFAULTS
    // =============================================================================

    /// Values the ride form sends without asking the user.
    pub mod ride_defaults {
        /// Driver rating attached to every new ride.
        pub const DRIVER_RATING: f64 = 5.0;

        /// Placeholder passenger phone number.
        pub const PASSENGER_PHONE: &str = "99999-9999";

        /// Payment method of rides created from the dashboard.
        pub const PAYMENT_METHOD: &str = "Pix";
    }
}
