use std::fmt::{Debug, Display, Formatter};
use std::str::FromStr;
use thiserror::Error;

/// Environment variable that overrides the backend URL.
pub const API_URL_ENV: &str = "TRANSFLOW_API_URL";

/// Represents the backend the dashboard talks to.
#[derive(Clone, Default, PartialEq, Eq)]
pub enum Environment {
    /// Backend running on the local machine.
    #[default]
    Local,
    /// Any other deployment, addressed by its base URL.
    Custom { api_url: String },
}

impl Environment {
    /// Returns the base URL of the ride API associated with the environment.
    pub fn api_url(&self) -> String {
        match self {
            Environment::Local => "http://localhost:8000".to_string(),
            Environment::Custom { api_url } => api_url.clone(),
        }
    }

    /// Resolves the environment from, in order: an explicit URL, the
    /// `TRANSFLOW_API_URL` variable, the config file value.
    pub fn resolve(cli_url: Option<&str>, config_url: Option<&str>) -> Result<Self, InvalidApiUrl> {
        let env_url = std::env::var(API_URL_ENV).ok();
        Self::resolve_from(cli_url, env_url.as_deref(), config_url)
    }

    /// The first non-blank source decides. A malformed value is an error naming
    /// its origin, never a silent fallback to a lower source.
    pub fn resolve_from(
        cli_url: Option<&str>,
        env_url: Option<&str>,
        config_url: Option<&str>,
    ) -> Result<Self, InvalidApiUrl> {
        let sources = [
            (UrlOrigin::Flag, cli_url),
            (UrlOrigin::EnvVar, env_url),
            (UrlOrigin::ConfigFile, config_url),
        ];
        sources
            .into_iter()
            .find_map(|(origin, url)| {
                url.filter(|u| !u.trim().is_empty())
                    .map(|u| Self::parse_from(u, origin))
            })
            .unwrap_or(Ok(Environment::Local))
    }

    pub fn parse_from(url: &str, origin: UrlOrigin) -> Result<Self, InvalidApiUrl> {
        url.parse().map_err(|_| InvalidApiUrl {
            url: url.to_string(),
            origin,
        })
    }
}

/// Where a backend URL was read from.
#[derive(Debug, Copy, Clone, PartialEq, Eq, strum::Display)]
pub enum UrlOrigin {
    #[strum(to_string = "--api-url")]
    Flag,
    #[strum(to_string = "TRANSFLOW_API_URL")]
    EnvVar,
    #[strum(to_string = "the config file")]
    ConfigFile,
}

#[derive(Error, PartialEq, Eq)]
#[error("Invalid API URL '{url}' from {origin}: expected http(s)://host[:port]")]
pub struct InvalidApiUrl {
    pub url: String,
    pub origin: UrlOrigin,
}

// `main` reports errors through Debug.
impl Debug for InvalidApiUrl {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}

impl FromStr for Environment {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(());
        }
        match s.to_lowercase().as_str() {
            "local" => Ok(Environment::Local),
            _ if s.starts_with("http://") || s.starts_with("https://") => {
                Ok(Environment::Custom {
                    api_url: s.trim_end_matches('/').to_string(),
                })
            }
            _ => Err(()),
        }
    }
}

impl Display for Environment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Local => write!(f, "Local"),
            Environment::Custom { .. } => write!(f, "Custom"),
        }
    }
}

impl Debug for Environment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Environment::{}, URL: {}", self, self.api_url())
    }
}
