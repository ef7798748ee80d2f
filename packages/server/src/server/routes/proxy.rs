//! Forwarding endpoints.
//!
//! POST /api/scan, /api/enrich, /api/draft, /api/contacts/update-status
//!
//! Each handler relays the browser request to the matching backend operation
//! and answers with the backend's own status and body. Transport failures and
//! non-JSON backend replies become the fixed failure envelope.

use axum::{
    body::Bytes,
    extract::Extension,
    http::{
        header::{COOKIE, HOST},
        HeaderMap, HeaderValue, Method, StatusCode,
    },
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;

use crate::common::FailureEnvelope;
use crate::kernel::{BackendOperation, ForwardRequest, ForwardedResponse, ProxyError};
use crate::server::app::AxumAppState;

impl IntoResponse for ForwardedResponse {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::OK);
        (status, Json(self.body)).into_response()
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        match self {
            ProxyError::BackendRejected { status, body } => {
                let status = StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY);
                (status, Json(body)).into_response()
            }
            ProxyError::InvalidRequestBody(_) => {
                FailureEnvelope::new(self.envelope_message()).with_status(StatusCode::BAD_REQUEST)
            }
            ProxyError::UpstreamUnreachable { .. } | ProxyError::BadUpstreamResponse { .. } => {
                FailureEnvelope::new(self.envelope_message()).into_response()
            }
        }
    }
}

/// `Host` header of the incoming request, if readable.
pub fn request_host(headers: &HeaderMap) -> Option<&str> {
    headers.get(HOST).and_then(|h| h.to_str().ok())
}

/// All `Cookie` headers of the incoming request as one value.
///
/// HTTP/2 clients may split cookies across several headers; they are joined
/// with `"; "`. A single header is passed through byte for byte.
pub fn request_cookie(headers: &HeaderMap) -> Option<HeaderValue> {
    let mut values = headers.get_all(COOKIE).iter();
    let first = values.next()?;

    let mut joined = first.as_bytes().to_vec();
    for value in values {
        joined.extend_from_slice(b"; ");
        joined.extend_from_slice(value.as_bytes());
    }
    HeaderValue::from_bytes(&joined).ok()
}

async fn forward_operation(
    state: &AxumAppState,
    operation: BackendOperation,
    method: Method,
    headers: &HeaderMap,
    body: &[u8],
) -> Result<ForwardedResponse, ProxyError> {
    let payload: Value = serde_json::from_slice(body).map_err(|e| {
        tracing::warn!(%operation, error = %e, "Browser sent a non-JSON body");
        ProxyError::InvalidRequestBody(e.to_string())
    })?;

    let request = ForwardRequest {
        method,
        host: request_host(headers),
        cookie: request_cookie(headers),
        body: &payload,
    };

    state.deps.forwarder.forward(operation, request).await
}

/// POST /api/scan
pub async fn scan_handler(
    Extension(state): Extension<AxumAppState>,
    method: Method,
    headers: HeaderMap,
    body: Bytes,
) -> Result<ForwardedResponse, ProxyError> {
    forward_operation(&state, BackendOperation::Scan, method, &headers, &body).await
}

/// POST /api/enrich
pub async fn enrich_handler(
    Extension(state): Extension<AxumAppState>,
    method: Method,
    headers: HeaderMap,
    body: Bytes,
) -> Result<ForwardedResponse, ProxyError> {
    forward_operation(&state, BackendOperation::Enrich, method, &headers, &body).await
}

/// POST /api/draft
pub async fn draft_handler(
    Extension(state): Extension<AxumAppState>,
    method: Method,
    headers: HeaderMap,
    body: Bytes,
) -> Result<ForwardedResponse, ProxyError> {
    forward_operation(&state, BackendOperation::Draft, method, &headers, &body).await
}

/// POST /api/contacts/update-status
pub async fn update_status_handler(
    Extension(state): Extension<AxumAppState>,
    method: Method,
    headers: HeaderMap,
    body: Bytes,
) -> Result<ForwardedResponse, ProxyError> {
    forward_operation(&state, BackendOperation::UpdateStatus, method, &headers, &body).await
}
