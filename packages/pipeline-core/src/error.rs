//! Error types for the pipeline core.

use thiserror::Error;

/// A company status string outside the five known values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid company status: {0}")]
pub struct ParseStatusError(pub String);

/// Failures talking to the dashboard proxy from the scan flow.
#[derive(Debug, Error)]
pub enum ScanTransportError {
    /// Network error (connection failed, DNS, TLS)
    #[error("Network error: {0}")]
    Network(String),

    /// Parse error (response body was not JSON)
    #[error("Parse error: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for ScanTransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ScanTransportError::Parse(err.to_string())
        } else {
            ScanTransportError::Network(err.to_string())
        }
    }
}
