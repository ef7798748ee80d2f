//! Derived dashboard views.
//!
//! Everything here is a pure function of the fetched record set and is
//! recomputed on every dashboard load. Nothing mutates its input.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::models::{Company, CompanyStatus, Contact};

/// Label for companies with neither a search keyword nor an industry.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Wire sentinel selecting every campaign.
pub const ALL_CAMPAIGNS: &str = "All";

/// Campaign a company belongs to: its search keyword, else its industry,
/// else [`UNCATEGORIZED`]. Never empty.
pub fn campaign_label(company: &Company) -> &str {
    non_empty(company.search_keyword.as_deref())
        .or_else(|| non_empty(company.industry.as_deref()))
        .unwrap_or(UNCATEGORIZED)
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Unique campaign labels, the campaign holding the newest company first.
///
/// Companies without `created_at` count as oldest. Equal timestamps fall back
/// to ascending label order.
pub fn distinct_campaigns(companies: &[Company]) -> Vec<String> {
    let mut newest: BTreeMap<&str, Option<DateTime<Utc>>> = BTreeMap::new();
    for company in companies {
        let entry = newest.entry(campaign_label(company)).or_insert(None);
        if company.created_at > *entry {
            *entry = company.created_at;
        }
    }

    let mut campaigns: Vec<(&str, Option<DateTime<Utc>>)> = newest.into_iter().collect();
    campaigns.sort_by(|(label_a, at_a), (label_b, at_b)| {
        at_b.cmp(at_a).then_with(|| label_a.cmp(label_b))
    });

    campaigns
        .into_iter()
        .map(|(label, _)| label.to_string())
        .collect()
}

/// Which campaign the dashboard is showing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CampaignSelection {
    #[default]
    All,
    Label(String),
}

impl CampaignSelection {
    /// Parse a selection from a query value; missing, empty or `"All"` selects everything.
    ///
    /// Labels are kept verbatim: they must equal a [`campaign_label`] exactly.
    pub fn from_query(value: Option<&str>) -> Self {
        match value {
            None | Some("") | Some(ALL_CAMPAIGNS) => CampaignSelection::All,
            Some(label) => CampaignSelection::Label(label.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            CampaignSelection::All => ALL_CAMPAIGNS,
            CampaignSelection::Label(label) => label,
        }
    }
}

impl From<&str> for CampaignSelection {
    fn from(value: &str) -> Self {
        CampaignSelection::from_query(Some(value))
    }
}

/// Companies in the selected campaign, in input order.
pub fn filter_by_campaign<'a>(
    companies: &'a [Company],
    selection: &CampaignSelection,
) -> Vec<&'a Company> {
    match selection {
        CampaignSelection::All => companies.iter().collect(),
        CampaignSelection::Label(label) => companies
            .iter()
            .filter(|c| campaign_label(c) == label)
            .collect(),
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SummaryStats {
    pub total: usize,
    pub qualified: usize,
    pub disqualified: usize,
}

/// Headline counts over whatever subset is passed in.
pub fn summary_stats<'a>(companies: impl IntoIterator<Item = &'a Company>) -> SummaryStats {
    companies
        .into_iter()
        .fold(SummaryStats::default(), |mut stats, company| {
            stats.total += 1;
            match company.status {
                CompanyStatus::Qualified => stats.qualified += 1,
                CompanyStatus::Disqualified => stats.disqualified += 1,
                _ => {}
            }
            stats
        })
}

/// Company count for every status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusBreakdown {
    pub new: usize,
    pub processing: usize,
    pub qualified: usize,
    pub disqualified: usize,
    pub customer: usize,
}

impl StatusBreakdown {
    pub fn count(&self, status: CompanyStatus) -> usize {
        match status {
            CompanyStatus::New => self.new,
            CompanyStatus::Processing => self.processing,
            CompanyStatus::Qualified => self.qualified,
            CompanyStatus::Disqualified => self.disqualified,
            CompanyStatus::Customer => self.customer,
        }
    }

    fn slot(&mut self, status: CompanyStatus) -> &mut usize {
        match status {
            CompanyStatus::New => &mut self.new,
            CompanyStatus::Processing => &mut self.processing,
            CompanyStatus::Qualified => &mut self.qualified,
            CompanyStatus::Disqualified => &mut self.disqualified,
            CompanyStatus::Customer => &mut self.customer,
        }
    }
}

pub fn status_breakdown<'a>(companies: impl IntoIterator<Item = &'a Company>) -> StatusBreakdown {
    let mut breakdown = StatusBreakdown::default();
    for company in companies {
        *breakdown.slot(company.status) += 1;
    }
    breakdown
}

/// Contacts of one company, primary decision makers first.
pub fn contacts_for_company(contacts: &[Contact], company_id: Uuid) -> Vec<&Contact> {
    let mut found: Vec<&Contact> = contacts
        .iter()
        .filter(|c| c.company_id == company_id)
        .collect();
    found.sort_by_key(|c| !c.is_primary_decision_maker);
    found
}

/// Primary decision makers of one company.
pub fn decision_makers(contacts: &[Contact], company_id: Uuid) -> Vec<&Contact> {
    contacts_for_company(contacts, company_id)
        .into_iter()
        .filter(|c| c.is_primary_decision_maker)
        .collect()
}

/// Mobile PageSpeed bucket shown in the performance column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PageSpeedBand {
    Unknown,
    Slow,
    Average,
    Fast,
}

impl PageSpeedBand {
    pub fn from_score(score: Option<i32>) -> Self {
        match score {
            None => PageSpeedBand::Unknown,
            Some(s) if s < 50 => PageSpeedBand::Slow,
            Some(s) if s < 90 => PageSpeedBand::Average,
            Some(_) => PageSpeedBand::Fast,
        }
    }
}

/// One line of the company table.
#[derive(Debug, Clone, Serialize)]
pub struct CompanyRow {
    #[serde(flatten)]
    pub company: Company,
    pub campaign: String,
    pub pagespeed_band: PageSpeedBand,
    pub decision_makers: Vec<Contact>,
}

impl CompanyRow {
    pub fn build(company: &Company, contacts: &[Contact]) -> Self {
        Self {
            campaign: campaign_label(company).to_string(),
            pagespeed_band: PageSpeedBand::from_score(company.pagespeed_score),
            decision_makers: decision_makers(contacts, company.id)
                .into_iter()
                .cloned()
                .collect(),
            company: company.clone(),
        }
    }
}

/// Everything the dashboard page renders for one campaign selection.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub campaigns: Vec<String>,
    pub selected_campaign: String,
    pub heading: String,
    pub stats: SummaryStats,
    pub status_breakdown: StatusBreakdown,
    pub companies: Vec<CompanyRow>,
    /// Contacts belonging to the companies shown, grouped by company.
    pub contacts: Vec<Contact>,
}

impl DashboardView {
    pub fn build(
        companies: &[Company],
        contacts: &[Contact],
        selection: &CampaignSelection,
    ) -> Self {
        let filtered = filter_by_campaign(companies, selection);

        let heading = match selection {
            CampaignSelection::All => "All Recent Companies".to_string(),
            CampaignSelection::Label(label) => format!("Results for: {}", label),
        };

        Self {
            campaigns: distinct_campaigns(companies),
            selected_campaign: selection.as_str().to_string(),
            heading,
            stats: summary_stats(filtered.iter().copied()),
            status_breakdown: status_breakdown(filtered.iter().copied()),
            contacts: filtered
                .iter()
                .flat_map(|c| contacts_for_company(contacts, c.id))
                .cloned()
                .collect(),
            companies: filtered
                .into_iter()
                .map(|c| CompanyRow::build(c, contacts))
                .collect(),
        }
    }
}
