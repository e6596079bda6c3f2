//! Political funds report models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Organization kinds a political funds report may be filed for
pub const ORGANIZATION_TYPES: [&str; 6] = [
    "政党",
    "政治資金団体",
    "その他の政治団体",
    "資金管理団体",
    "政党の支部",
    "政治家個人",
];

/// Political funds report
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq, Eq)]
pub struct PoliticalFunds {
    pub id: i32,
    pub user_id: i32,
    pub organization_name: String,
    pub organization_type: String,
    pub representative_name: String,
    pub report_year: i32,
    pub income: Option<i64>,
    pub expenditure: Option<i64>,
    pub balance: Option<i64>,
    pub income_breakdown: Option<String>,
    pub expenditure_breakdown: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body of create and replace requests
///
/// The owner is never read from the body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PoliticalFundsRequest {
    #[serde(default)]
    pub organization_name: String,
    #[serde(default)]
    pub organization_type: String,
    #[serde(default)]
    pub representative_name: String,
    #[serde(default)]
    pub report_year: i32,
    pub income: Option<i64>,
    pub expenditure: Option<i64>,
    pub balance: Option<i64>,
    pub income_breakdown: Option<String>,
    pub expenditure_breakdown: Option<String>,
}

impl PoliticalFundsRequest {
    /// Copy with surrounding whitespace removed from the text fields
    pub fn trimmed(mut self) -> Self {
        self.organization_name = self.organization_name.trim().to_string();
        self.organization_type = self.organization_type.trim().to_string();
        self.representative_name = self.representative_name.trim().to_string();
        self
    }
}

/// Query parameters for political funds listing
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PoliticalFundsQuery {
    /// Exact report year
    pub year: Option<i32>,
    /// Substring of the organization name
    pub organization: Option<String>,
}
