use std::collections::BTreeMap;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use pipeline_core::{Company, CompanyStatus};
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

/// Row of the backend's `companies` table.
///
/// Columns the backend may not have created yet default to empty.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CompanyRecord {
    pub id: Uuid,
    #[sqlx(default)]
    pub created_at: Option<DateTime<Utc>>,
    pub name: String,
    #[sqlx(default)]
    pub website_url: Option<String>,
    #[sqlx(default)]
    pub google_maps_url: Option<String>,
    #[sqlx(default)]
    pub industry: Option<String>,
    #[sqlx(default)]
    pub search_keyword: Option<String>,
    #[sqlx(default)]
    pub has_ssl: Option<bool>,
    #[sqlx(default)]
    pub pagespeed_score: Option<i32>,
    #[sqlx(default)]
    pub is_wordpress: Option<bool>,
    #[sqlx(default)]
    pub crm_system: Option<String>,
    #[sqlx(default)]
    pub address: Option<String>,
    #[sqlx(default)]
    pub company_type: Option<String>,
    #[sqlx(default)]
    pub employee_count: Option<String>,
    #[sqlx(default)]
    pub revenue_range: Option<String>,
    #[sqlx(default)]
    pub emails: Option<Vec<String>>,
    #[sqlx(default)]
    pub socials: Option<Json<BTreeMap<String, String>>>,
    #[sqlx(default)]
    pub description: Option<String>,
    pub status: String,
    #[sqlx(default)]
    pub disqualify_reason: Option<String>,
}

impl CompanyRecord {
    /// All companies, newest first; rows without `created_at` last.
    pub async fn find_all_newest_first(pool: &PgPool) -> Result<Vec<Self>> {
        let companies = sqlx::query_as::<_, Self>(
            "SELECT * FROM companies ORDER BY created_at DESC NULLS LAST",
        )
        .fetch_all(pool)
        .await?;
        Ok(companies)
    }

    pub fn into_company(self) -> Result<Company> {
        let status: CompanyStatus = self
            .status
            .parse()
            .with_context(|| format!("Company {} has an invalid status", self.id))?;

        Ok(Company {
            id: self.id,
            created_at: self.created_at,
            name: self.name,
            website_url: self.website_url,
            google_maps_url: self.google_maps_url,
            industry: self.industry,
            search_keyword: self.search_keyword,
            has_ssl: self.has_ssl.unwrap_or(false),
            pagespeed_score: self.pagespeed_score,
            is_wordpress: self.is_wordpress.unwrap_or(false),
            crm_system: self.crm_system,
            address: self.address,
            company_type: self.company_type,
            employee_count: self.employee_count,
            revenue_range: self.revenue_range,
            emails: self.emails.unwrap_or_default(),
            socials: self.socials.map(|Json(s)| s).unwrap_or_default(),
            description: self.description,
            status,
            disqualify_reason: self.disqualify_reason,
        })
    }
}
