use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ParseStatusError;

/// Pipeline status of a company, assigned by the backend.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CompanyStatus {
    New,
    Processing,
    Qualified,
    Disqualified,
    Customer,
}

impl CompanyStatus {
    pub const ALL: [CompanyStatus; 5] = [
        CompanyStatus::New,
        CompanyStatus::Processing,
        CompanyStatus::Qualified,
        CompanyStatus::Disqualified,
        CompanyStatus::Customer,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CompanyStatus::New => "NEW",
            CompanyStatus::Processing => "PROCESSING",
            CompanyStatus::Qualified => "QUALIFIED",
            CompanyStatus::Disqualified => "DISQUALIFIED",
            CompanyStatus::Customer => "CUSTOMER",
        }
    }
}

impl std::fmt::Display for CompanyStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CompanyStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "NEW" => Ok(CompanyStatus::New),
            "PROCESSING" => Ok(CompanyStatus::Processing),
            "QUALIFIED" => Ok(CompanyStatus::Qualified),
            "DISQUALIFIED" => Ok(CompanyStatus::Disqualified),
            "CUSTOMER" => Ok(CompanyStatus::Customer),
            other => Err(ParseStatusError(other.to_string())),
        }
    }
}

/// A company discovered by a scan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Company {
    pub id: Uuid,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    pub name: String,
    #[serde(default)]
    pub website_url: Option<String>,
    #[serde(default)]
    pub google_maps_url: Option<String>,
    #[serde(default)]
    pub industry: Option<String>,
    /// Keyword of the scan that produced this company.
    #[serde(default)]
    pub search_keyword: Option<String>,

    // Technical audit
    #[serde(default)]
    pub has_ssl: bool,
    #[serde(default)]
    pub pagespeed_score: Option<i32>,
    #[serde(default)]
    pub is_wordpress: bool,
    #[serde(default)]
    pub crm_system: Option<String>,

    // Firmographics
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub company_type: Option<String>,
    #[serde(default)]
    pub employee_count: Option<String>,
    #[serde(default)]
    pub revenue_range: Option<String>,

    // Scraped artifacts
    #[serde(default)]
    pub emails: Vec<String>,
    #[serde(default)]
    pub socials: BTreeMap<String, String>,
    #[serde(default)]
    pub description: Option<String>,

    pub status: CompanyStatus,
    #[serde(default)]
    pub disqualify_reason: Option<String>,
}

impl Company {
    /// Disqualification reason, only when the company is actually disqualified.
    pub fn disqualify_reason(&self) -> Option<&str> {
        match self.status {
            CompanyStatus::Disqualified => self.disqualify_reason.as_deref(),
            _ => None,
        }
    }
}

/// A person at a company, found by enrichment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub id: Uuid,
    pub company_id: Uuid,
    pub full_name: String,
    pub position: String,
    #[serde(default)]
    pub linkedin_url: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub is_primary_decision_maker: bool,
    /// Outreach status, free-form and backend-assigned.
    #[serde(default)]
    pub status: Option<String>,
}
