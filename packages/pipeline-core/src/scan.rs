//! Scan initiation flow.
//!
//! Pure state machine for the "Start New Scan" dialog: keyword entry,
//! a single in-flight submission, and the three ways a scan can end.
//! The only IO is the [`ScanTransport`] call made by [`ScanFlow::submit`].

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ScanTransportError;

/// Shown when the proxy or backend could not be reached.
pub const CONNECT_FAILED_MESSAGE: &str = "Failed to connect to server.";

/// Shown when the backend rejected the scan without a message of its own.
pub const GENERIC_FAILURE_MESSAGE: &str = "Something went wrong.";

/// Prefix of the proxy envelope `error` when the backend was unreachable.
/// Other proxy envelopes mean the backend answered, just not usefully.
pub const BACKEND_UNREACHABLE_ERROR: &str = "Cannot connect to backend";

/// Body posted to the scan endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanRequest {
    pub keyword: String,
    /// Search area; the backend picks its default when omitted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Maximum number of places; the backend picks its default when omitted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

/// Scan reply as sent by the backend (or the proxy failure envelope).
///
/// Every field is optional on the wire; absent fields take their defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanResponse {
    pub success: bool,
    pub is_fallback: bool,
    pub fallback_keyword: Option<String>,
    pub count: Option<u64>,
    pub message: Option<String>,
    pub suggestion: Option<String>,
    /// Only set by the proxy failure envelope.
    pub error: Option<String>,
}

impl ScanResponse {
    fn is_unreachable_envelope(&self) -> bool {
        !self.success
            && self.message.is_none()
            && self
                .error
                .as_deref()
                .is_some_and(|e| e.starts_with(BACKEND_UNREACHABLE_ERROR))
    }
}

/// HTTP status plus decoded body of one scan call.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanReply {
    pub status: u16,
    pub body: ScanResponse,
}

impl ScanReply {
    pub fn is_success_status(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[async_trait]
pub trait ScanTransport: Send + Sync {
    /// Submit one scan. Exactly one request per call, never retried.
    async fn scan(&self, request: &ScanRequest) -> Result<ScanReply, ScanTransportError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanState {
    Idle,
    Submitting,
    Succeeded,
    FailedWithMessage { message: String },
    FailedWithSuggestion { message: String, suggestion: String },
}

/// The exact keyword found nothing, so the backend broadened the search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FallbackNotice {
    pub original_keyword: String,
    pub fallback_keyword: String,
    pub count: u64,
}

impl std::fmt::Display for FallbackNotice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Note: your search for \"{}\" yielded 0 results. \
             Switched to broader keyword \"{}\" and found {} companies.",
            self.original_keyword, self.fallback_keyword, self.count
        )
    }
}

/// Returned on success: the dashboard must re-read its data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshDashboard {
    pub count: Option<u64>,
    pub notice: Option<FallbackNotice>,
}

#[derive(Debug, Clone)]
pub struct ScanFlow {
    keyword: String,
    location: Option<String>,
    limit: Option<u32>,
    open: bool,
    state: ScanState,
    in_flight_keyword: Option<String>,
}

impl Default for ScanFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl ScanFlow {
    pub fn new() -> Self {
        Self {
            keyword: String::new(),
            location: None,
            limit: None,
            open: false,
            state: ScanState::Idle,
            in_flight_keyword: None,
        }
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn state(&self) -> &ScanState {
        &self.state
    }

    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_submitting(&self) -> bool {
        self.state == ScanState::Submitting
    }

    pub fn message(&self) -> Option<&str> {
        match &self.state {
            ScanState::FailedWithMessage { message }
            | ScanState::FailedWithSuggestion { message, .. } => Some(message),
            _ => None,
        }
    }

    pub fn suggestion(&self) -> Option<&str> {
        match &self.state {
            ScanState::FailedWithSuggestion { suggestion, .. } => Some(suggestion),
            _ => None,
        }
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn set_keyword(&mut self, keyword: impl Into<String>) {
        self.keyword = keyword.into();
    }

    /// Start a submission. `None` when the keyword is blank or a scan is already in flight.
    pub fn begin_submit(&mut self) -> Option<ScanRequest> {
        if self.is_submitting() {
            tracing::debug!("Scan already in flight, ignoring submit");
            return None;
        }
        if self.keyword.trim().is_empty() {
            return None;
        }

        self.state = ScanState::Submitting;
        self.in_flight_keyword = Some(self.keyword.clone());

        Some(ScanRequest {
            keyword: self.keyword.clone(),
            location: self.location.clone(),
            limit: self.limit,
        })
    }

    /// Apply the result of the in-flight submission.
    pub fn complete(
        &mut self,
        reply: Result<ScanReply, ScanTransportError>,
    ) -> Option<RefreshDashboard> {
        if !self.is_submitting() {
            tracing::warn!(state = ?self.state, "Scan result arrived with nothing in flight");
            return None;
        }
        let original_keyword = self.in_flight_keyword.take().unwrap_or_default();

        let reply = match reply {
            Ok(reply) => reply,
            Err(e) => {
                tracing::error!(error = %e, "Scan request failed");
                self.fail(CONNECT_FAILED_MESSAGE.to_string(), None);
                return None;
            }
        };

        if reply.is_success_status() && reply.body.success {
            let body = reply.body;
            self.state = ScanState::Succeeded;
            self.keyword.clear();
            self.open = false;

            let notice = body.is_fallback.then(|| FallbackNotice {
                original_keyword,
                fallback_keyword: body.fallback_keyword.clone().unwrap_or_default(),
                count: body.count.unwrap_or(0),
            });
            return Some(RefreshDashboard {
                count: body.count,
                notice,
            });
        }

        tracing::warn!(status = reply.status, body = ?reply.body, "Scan failed");
        if reply.body.is_unreachable_envelope() {
            self.fail(CONNECT_FAILED_MESSAGE.to_string(), None);
        } else {
            let message = reply
                .body
                .message
                .unwrap_or_else(|| GENERIC_FAILURE_MESSAGE.to_string());
            self.fail(message, reply.body.suggestion);
        }
        None
    }

    fn fail(&mut self, message: String, suggestion: Option<String>) {
        self.state = match suggestion {
            Some(suggestion) => ScanState::FailedWithSuggestion {
                message,
                suggestion,
            },
            None => ScanState::FailedWithMessage { message },
        };
    }

    /// Replace the keyword with the backend's suggestion. Does not re-submit.
    pub fn apply_suggestion(&mut self) -> bool {
        let ScanState::FailedWithSuggestion { suggestion, .. } = &self.state else {
            return false;
        };
        self.keyword = suggestion.clone();
        self.state = ScanState::Idle;
        true
    }

    /// Submit the current keyword through `transport` and apply the result.
    pub async fn submit(&mut self, transport: &dyn ScanTransport) -> Option<RefreshDashboard> {
        let request = self.begin_submit()?;
        tracing::info!(keyword = %request.keyword, "Submitting scan");
        let reply = transport.scan(&request).await;
        self.complete(reply)
    }
}
