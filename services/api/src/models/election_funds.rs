//! Election funds report models

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Election kinds a campaign finance report may be filed for
pub const ELECTION_TYPES: [&str; 12] = [
    "衆議院議員総選挙",
    "参議院議員通常選挙",
    "都道府県知事選挙",
    "都道府県議会議員選挙",
    "市町村長選挙",
    "市町村議会議員選挙",
    "政令指定都市長選挙",
    "政令指定都市議会議員選挙",
    "東京都特別区長選挙",
    "東京都特別区議会議員選挙",
    "補欠選挙",
    "再選挙",
];

/// Election funds report
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq, Eq)]
pub struct ElectionFunds {
    pub id: i32,
    pub user_id: i32,
    pub candidate_name: String,
    pub election_type: String,
    pub election_area: String,
    pub election_date: DateTime<Utc>,
    pub political_party: Option<String>,
    pub total_income: Option<i64>,
    pub total_expenditure: Option<i64>,
    pub balance: Option<i64>,
    pub donations: Option<i64>,
    pub personal_funds: Option<i64>,
    pub party_support: Option<i64>,
    pub income_breakdown: Option<String>,
    pub expenditure_breakdown: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body of create and replace requests
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ElectionFundsRequest {
    #[serde(default)]
    pub candidate_name: String,
    #[serde(default)]
    pub election_type: String,
    #[serde(default)]
    pub election_area: String,
    pub election_date: Option<DateTime<Utc>>,
    pub political_party: Option<String>,
    pub total_income: Option<i64>,
    pub total_expenditure: Option<i64>,
    pub balance: Option<i64>,
    pub donations: Option<i64>,
    pub personal_funds: Option<i64>,
    pub party_support: Option<i64>,
    pub income_breakdown: Option<String>,
    pub expenditure_breakdown: Option<String>,
}

impl ElectionFundsRequest {
    /// Copy with surrounding whitespace removed from the text fields
    ///
    /// An empty party means "no party"; a whitespace-only one stays as a
    /// blank value for validation to reject.
    pub fn trimmed(mut self) -> Self {
        self.candidate_name = self.candidate_name.trim().to_string();
        self.election_type = self.election_type.trim().to_string();
        self.election_area = self.election_area.trim().to_string();
        self.political_party = self
            .political_party
            .filter(|p| !p.is_empty())
            .map(|p| p.trim().to_string());
        self
    }
}

/// Query parameters for election funds listing
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ElectionFundsQuery {
    /// Substring of the candidate name
    pub candidate: Option<String>,
    /// Exact election type
    pub election_type: Option<String>,
    /// Substring of the election area
    pub area: Option<String>,
    /// Substring of the political party
    pub party: Option<String>,
    /// First election day included (`YYYY-MM-DD`)
    pub from: Option<NaiveDate>,
    /// Last election day included (`YYYY-MM-DD`)
    pub to: Option<NaiveDate>,
}
