//! Application configuration.

use crate::consts::cli_consts::DEFAULT_POLL_INTERVAL_MS;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use std::{fs, path::Path, path::PathBuf};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Base URL of the ride API. Falls back to the local backend when absent.
    pub api_url: Option<String>,
    /// Period of the refresh cycle, in milliseconds.
    pub poll_interval_ms: u64,
    /// Driver whose balance is shown on the dashboard.
    pub balance_driver: Option<String>,
    /// Optional per-request timeout. Requests never time out when unset.
    pub request_timeout_secs: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: None,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            balance_driver: None,
            request_timeout_secs: None,
        }
    }
}

impl Config {
    /// Overwrites the fields the update sets. Blank strings clear the field.
    pub fn apply(&mut self, update: ConfigUpdate) {
        if let Some(url) = update.api_url {
            self.api_url = non_blank(url);
        }
        if let Some(driver) = update.balance_driver {
            self.balance_driver = non_blank(driver);
        }
        if let Some(ms) = update.poll_interval_ms {
            self.poll_interval_ms = ms;
        }
        if let Some(secs) = update.request_timeout_secs {
            self.request_timeout_secs = (secs > 0).then_some(secs);
        }
    }

    pub fn poll_interval(&self) -> Duration {
        // A zero period would spin the poller.
        Duration::from_millis(self.poll_interval_ms.max(100))
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    /// Loads configuration from a JSON file at the given path.
    ///
    /// # Errors
    /// Returns an `std::io::Error` if reading from file fails or JSON is invalid.
    pub fn load_from_file(path: &Path) -> Result<Self, std::io::Error> {
        let buf = fs::read(path)?;
        let config: Config = serde_json::from_slice(&buf)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        Ok(config)
    }

    /// Loads the configuration if the file exists, otherwise returns the defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, std::io::Error> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Saves the configuration to a JSON file at the given path.
    ///
    /// Directories will be created if they don't exist. This method overwrites existing files.
    ///
    /// # Errors
    /// Returns an `std::io::Error` if writing to file fails or serialization fails.
    pub fn save(&self, path: &Path) -> Result<(), std::io::Error> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("Serialization failed: {}", e),
            )
        })?;
        fs::write(path, json)?;
        Ok(())
    }
}

/// Field changes requested by the `configure` command.
#[derive(Debug, Clone, Default)]
pub struct ConfigUpdate {
    pub api_url: Option<String>,
    pub balance_driver: Option<String>,
    pub poll_interval_ms: Option<u64>,
    /// Zero removes the timeout.
    pub request_timeout_secs: Option<u64>,
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Path of the configuration file, `~/.transflow/config.json`.
pub fn get_config_path() -> Result<PathBuf, std::io::Error> {
    let home_path = home::home_dir().ok_or(std::io::Error::new(
        std::io::ErrorKind::NotFound,
        "Home directory not found",
    ))?;
    Ok(home_path.join(".transflow").join("config.json"))
}
