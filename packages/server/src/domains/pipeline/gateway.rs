use pipeline_core::{CampaignSelection, Company, Contact, DashboardView};
use thiserror::Error;

use crate::kernel::BaseRecordStore;

/// A page load could not read the persisted records.
#[derive(Debug, Error)]
pub enum DataFetchError {
    #[error("Failed to load companies: {0}")]
    Companies(String),

    #[error("Failed to load contacts: {0}")]
    Contacts(String),
}

/// Everything one dashboard load reads.
#[derive(Debug, Clone)]
pub struct PipelineSnapshot {
    /// Newest first.
    pub companies: Vec<Company>,
    pub contacts: Vec<Contact>,
}

impl PipelineSnapshot {
    pub fn view(&self, selection: &CampaignSelection) -> DashboardView {
        DashboardView::build(&self.companies, &self.contacts, selection)
    }
}

/// Fresh read of companies and contacts. Never cached.
pub async fn load_pipeline(
    store: &dyn BaseRecordStore,
) -> Result<PipelineSnapshot, DataFetchError> {
    let companies = store.fetch_companies().await.map_err(|e| {
        tracing::error!(error = %e, "Company read failed");
        DataFetchError::Companies(format!("{:#}", e))
    })?;

    let contacts = store.fetch_contacts().await.map_err(|e| {
        tracing::error!(error = %e, "Contact read failed");
        DataFetchError::Contacts(format!("{:#}", e))
    })?;

    tracing::debug!(
        companies = companies.len(),
        contacts = contacts.len(),
        "Pipeline loaded"
    );
    Ok(PipelineSnapshot {
        companies,
        contacts,
    })
}
