//! Test fixtures for building records.

use chrono::{TimeZone, Utc};
use pipeline_core::{Company, CompanyStatus, Contact};
use uuid::Uuid;

/// Company with the fields the dashboard derives from; `created` in epoch seconds.
pub fn company(
    name: &str,
    search_keyword: Option<&str>,
    industry: Option<&str>,
    status: CompanyStatus,
    created: i64,
) -> Company {
    serde_json::from_value(serde_json::json!({
        "id": Uuid::new_v4(),
        "created_at": Utc.timestamp_opt(created, 0).unwrap(),
        "name": name,
        "search_keyword": search_keyword,
        "industry": industry,
        "status": status,
    }))
    .expect("valid company fixture")
}

pub fn contact(company_id: Uuid, full_name: &str, primary: bool) -> Contact {
    Contact {
        id: Uuid::new_v4(),
        company_id,
        full_name: full_name.to_string(),
        position: "Owner".to_string(),
        linkedin_url: None,
        email: None,
        is_primary_decision_maker: primary,
        status: None,
    }
}

/// A small pipeline spanning two campaigns and an uncategorized company.
pub fn sample_companies() -> Vec<Company> {
    vec![
        company("Nha Khoa Kim", Some("dentists"), Some("Dental"), CompanyStatus::Qualified, 300),
        company("Saigon Smile", Some("dentists"), None, CompanyStatus::Disqualified, 200),
        company("Pho 24", None, Some("Restaurants"), CompanyStatus::New, 250),
        company("Mystery Co", None, None, CompanyStatus::Customer, 100),
    ]
}
