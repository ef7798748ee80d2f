//! Dashboard data endpoint.
//!
//! GET /api/dashboard?campaign=<label>
//!
//! Runs on every page load: reads companies and contacts fresh, then derives
//! the campaign list, filtered companies and stats for the selected campaign.
//! A read failure is answered with a visible error, never an empty dashboard.

use axum::{
    extract::{Extension, Query},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use pipeline_core::CampaignSelection;
use serde::Deserialize;

use crate::common::FailureEnvelope;
use crate::domains::pipeline::load_pipeline;
use crate::server::app::AxumAppState;

#[derive(Debug, Deserialize)]
pub struct DashboardQuery {
    /// Campaign label; `All` or absent shows every campaign.
    campaign: Option<String>,
}

pub async fn dashboard_handler(
    Extension(state): Extension<AxumAppState>,
    Query(query): Query<DashboardQuery>,
) -> Response {
    let selection = CampaignSelection::from_query(query.campaign.as_deref());

    match load_pipeline(state.deps.records.as_ref()).await {
        Ok(snapshot) => {
            let view = snapshot.view(&selection);
            tracing::debug!(
                campaign = %selection.as_str(),
                shown = view.companies.len(),
                "Dashboard view built"
            );
            ([(header::CACHE_CONTROL, "no-store")], Json(view)).into_response()
        }
        Err(e) => FailureEnvelope::new(format!("Error loading data: {}", e))
            .with_status(StatusCode::INTERNAL_SERVER_ERROR),
    }
}
