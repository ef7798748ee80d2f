//! Forwarding to the lead-generation backend.
//!
//! One browser call becomes exactly one backend call: same method, the JSON
//! body as sent, and the browser's `Cookie` header copied verbatim (the
//! hosting edge may challenge requests that lack the session). Nothing is
//! retried and no timeout is set here.

use pipeline_core::BACKEND_UNREACHABLE_ERROR;
use reqwest::header::{HeaderValue, COOKIE};
use reqwest::Method;
use serde_json::Value;
use thiserror::Error;

use crate::kernel::target::BackendTarget;

/// Raw backend bodies are cut to this many characters in diagnostics.
pub const SNIPPET_CHARS: usize = 100;

/// Backend operations reachable through the proxy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendOperation {
    Scan,
    Enrich,
    Draft,
    UpdateStatus,
}

impl BackendOperation {
    /// Path below the resolved backend base URL.
    pub fn path(&self) -> &'static str {
        match self {
            BackendOperation::Scan => "scan",
            BackendOperation::Enrich => "enrich",
            BackendOperation::Draft => "draft",
            BackendOperation::UpdateStatus => "contacts/update-status",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            BackendOperation::Scan => "scan",
            BackendOperation::Enrich => "enrich",
            BackendOperation::Draft => "draft",
            BackendOperation::UpdateStatus => "update-status",
        }
    }
}

impl std::fmt::Display for BackendOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Error)]
pub enum ProxyError {
    /// Connection refused, DNS, TLS or timeout. `detail` is only filled when
    /// diagnostics are enabled.
    #[error("{}", BACKEND_UNREACHABLE_ERROR)]
    UpstreamUnreachable { detail: Option<String> },

    /// Backend body was not JSON.
    #[error("Invalid JSON from backend (status {status}): {snippet}")]
    BadUpstreamResponse { status: u16, snippet: String },

    /// Well-formed error reply; goes back to the browser untouched.
    #[error("Backend rejected request with status {status}")]
    BackendRejected { status: u16, body: Value },

    /// Browser body was not JSON; nothing was forwarded.
    #[error("Invalid request body: {0}")]
    InvalidRequestBody(String),
}

impl ProxyError {
    /// Text for the `error` field of the failure envelope.
    pub fn envelope_message(&self) -> String {
        match self {
            ProxyError::UpstreamUnreachable {
                detail: Some(detail),
            } => format!("{}: {}", BACKEND_UNREACHABLE_ERROR, detail),
            other => other.to_string(),
        }
    }
}

/// Successful backend reply.
#[derive(Debug, Clone, PartialEq)]
pub struct ForwardedResponse {
    pub status: u16,
    pub body: Value,
}

/// The parts of a browser request that are relayed.
#[derive(Debug, Clone)]
pub struct ForwardRequest<'a> {
    pub method: Method,
    /// Incoming `Host` header, used for target resolution.
    pub host: Option<&'a str>,
    /// Browser cookies, already joined into one header value.
    pub cookie: Option<HeaderValue>,
    pub body: &'a Value,
}

pub struct BackendForwarder {
    client: reqwest::Client,
    target: BackendTarget,
    expose_errors: bool,
}

impl BackendForwarder {
    pub fn new(target: BackendTarget, expose_errors: bool) -> Self {
        Self {
            client: reqwest::Client::new(),
            target,
            expose_errors,
        }
    }

    pub fn target(&self) -> &BackendTarget {
        &self.target
    }

    pub async fn forward(
        &self,
        operation: BackendOperation,
        request: ForwardRequest<'_>,
    ) -> Result<ForwardedResponse, ProxyError> {
        let target = self.target.resolve(request.host);
        let url = target.endpoint(operation.path());
        tracing::info!(
            %operation,
            url = %url,
            source = ?target.source,
            has_cookie = request.cookie.is_some(),
            "Forwarding to backend"
        );

        let mut builder = self.client.request(request.method, &url).json(request.body);
        if let Some(cookie) = request.cookie {
            builder = builder.header(COOKIE, cookie);
        }

        let resp = builder
            .send()
            .await
            .map_err(|e| self.unreachable(operation, e))?;
        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|e| self.unreachable(operation, e))?;

        let body: Value = serde_json::from_str(&text).map_err(|e| {
            tracing::error!(
                %operation,
                status = status.as_u16(),
                error = %e,
                "Backend returned non-JSON body"
            );
            ProxyError::BadUpstreamResponse {
                status: status.as_u16(),
                snippet: snippet(&text),
            }
        })?;

        if !status.is_success() {
            tracing::warn!(
                %operation,
                status = status.as_u16(),
                body = %body,
                "Backend rejected request"
            );
            return Err(ProxyError::BackendRejected {
                status: status.as_u16(),
                body,
            });
        }

        tracing::debug!(%operation, status = status.as_u16(), "Backend call succeeded");
        Ok(ForwardedResponse {
            status: status.as_u16(),
            body,
        })
    }

    fn unreachable(&self, operation: BackendOperation, err: reqwest::Error) -> ProxyError {
        tracing::error!(%operation, error = %err, "Backend unreachable");
        ProxyError::UpstreamUnreachable {
            detail: self.expose_errors.then(|| err.to_string()),
        }
    }
}

/// First [`SNIPPET_CHARS`] characters of a raw body.
pub fn snippet(raw: &str) -> String {
    raw.chars().take(SNIPPET_CHARS).collect()
}
