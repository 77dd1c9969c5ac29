//! Error handling for the API module

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport failure: connection refused, DNS, reset, timeout.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("HTTP error with status {status}: {message}")]
    Http { status: u16, message: String },

    /// The body did not have the expected shape.
    #[error("Unexpected response body: {0}")]
    Parse(#[from] serde_json::Error),
}

impl ApiError {
    pub async fn from_response(response: reqwest::Response) -> ApiError {
        let status = response.status().as_u16();
        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "Failed to read response text".to_string());

        ApiError::Http { status, message }
    }

    /// Short description suitable for a notification line.
    pub fn summary(&self) -> String {
        match self {
            ApiError::Network(e) if e.is_timeout() => "Request timed out".to_string(),
            ApiError::Network(_) => "Could not reach the API".to_string(),
            ApiError::Http { status, .. } => format!("API answered with status {}", status),
            ApiError::Parse(_) => "API sent an unexpected response".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_summary_mentions_status() {
        let err = ApiError::Http {
            status: 422,
            message: "{\"detail\": \"invalid\"}".to_string(),
        };
        assert_eq!(err.summary(), "API answered with status 422");
        assert!(err.to_string().contains("422"));
    }

    #[test]
    fn test_parse_error_conversion() {
        let json_err = serde_json::from_str::<Vec<u8>>("{}").unwrap_err();
        let err = ApiError::from(json_err);
        assert!(matches!(err, ApiError::Parse(_)));
        assert_eq!(err.summary(), "API sent an unexpected response");
    }
}
