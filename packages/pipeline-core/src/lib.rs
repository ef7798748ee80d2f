//! Lead pipeline core.
//!
//! Shared between the dashboard server and any browser-side client:
//!
//! - [`models`] - companies and contacts as persisted by the lead-generation backend
//! - [`views`] - pure derived views (campaign grouping, filtering, summary stats)
//! - [`scan`] - the scan initiation state machine
//! - [`client`] - HTTP transport for submitting scans through the dashboard proxy
//!
//! # Example
//!
//! ```rust,ignore
//! use pipeline_core::{HttpScanClient, ScanFlow};
//!
//! let client = HttpScanClient::new("http://localhost:8080");
//! let mut flow = ScanFlow::new();
//! flow.set_keyword("dentists in Hanoi");
//!
//! if let Some(refresh) = flow.submit(&client).await {
//!     // re-read the dashboard, show refresh.notice if any
//! }
//! ```

pub mod client;
pub mod error;
pub mod models;
pub mod scan;
pub mod views;

pub use client::HttpScanClient;
pub use error::{ParseStatusError, ScanTransportError};
pub use models::{Company, CompanyStatus, Contact};
pub use scan::{
    FallbackNotice, RefreshDashboard, ScanFlow, ScanReply, ScanRequest, ScanResponse, ScanState,
    ScanTransport, BACKEND_UNREACHABLE_ERROR, CONNECT_FAILED_MESSAGE, GENERIC_FAILURE_MESSAGE,
};
pub use views::{
    campaign_label, contacts_for_company, decision_makers, distinct_campaigns, filter_by_campaign,
    status_breakdown, summary_stats, CampaignSelection, CompanyRow, DashboardView, PageSpeedBand,
    StatusBreakdown, SummaryStats,
};
