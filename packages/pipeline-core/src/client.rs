//! HTTP transport for the scan flow.
//!
//! Posts to the dashboard's own `/api/scan` forwarding endpoint, never to the
//! lead-generation backend directly.

use async_trait::async_trait;

use crate::error::ScanTransportError;
use crate::scan::{ScanReply, ScanRequest, ScanResponse, ScanTransport};

pub struct HttpScanClient {
    client: reqwest::Client,
    base_url: String,
    cookie: Option<String>,
}

impl HttpScanClient {
    /// `base_url` is the dashboard origin, e.g. `http://localhost:8080`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            cookie: None,
        }
    }

    /// Session cookie to send along, for callers outside a browser.
    pub fn with_cookie(mut self, cookie: impl Into<String>) -> Self {
        self.cookie = Some(cookie.into());
        self
    }

    fn scan_url(&self) -> String {
        format!("{}/api/scan", self.base_url)
    }
}

#[async_trait]
impl ScanTransport for HttpScanClient {
    async fn scan(&self, request: &ScanRequest) -> Result<ScanReply, ScanTransportError> {
        let mut builder = self.client.post(self.scan_url()).json(request);
        if let Some(cookie) = &self.cookie {
            builder = builder.header(reqwest::header::COOKIE, cookie);
        }

        let resp = builder.send().await?;
        let status = resp.status().as_u16();
        let body: ScanResponse = resp.json().await?;

        tracing::debug!(status, success = body.success, "Scan response received");
        Ok(ScanReply { status, body })
    }
}
