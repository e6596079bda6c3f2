//! Election funds repository for database operations

use anyhow::Result;
use sqlx::{PgPool, Postgres, QueryBuilder};

use super::{contains_pattern, text_filter};
use crate::models::election_funds::{ElectionFunds, ElectionFundsQuery, ElectionFundsRequest};

const COLUMNS: &str = "id, user_id, candidate_name, election_type, election_area, election_date, \
     political_party, total_income, total_expenditure, balance, donations, personal_funds, \
     party_support, income_breakdown, expenditure_breakdown, created_at, updated_at";

/// Election funds repository for database operations
#[derive(Clone)]
pub struct ElectionFundsRepository {
    pool: PgPool,
}

impl ElectionFundsRepository {
    /// Create a new election funds repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Store a new report owned by `user_id`
    pub async fn create(&self, user_id: i32, req: &ElectionFundsRequest) -> Result<ElectionFunds> {
        let sql = format!(
            r#"
            INSERT INTO election_funds (
                user_id, candidate_name, election_type, election_area, election_date,
                political_party, total_income, total_expenditure, balance,
                donations, personal_funds, party_support,
                income_breakdown, expenditure_breakdown
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            RETURNING {COLUMNS}
            "#
        );

        let record = sqlx::query_as::<_, ElectionFunds>(&sql)
            .bind(user_id)
            .bind(&req.candidate_name)
            .bind(&req.election_type)
            .bind(&req.election_area)
            .bind(req.election_date)
            .bind(&req.political_party)
            .bind(req.total_income)
            .bind(req.total_expenditure)
            .bind(req.balance)
            .bind(req.donations)
            .bind(req.personal_funds)
            .bind(req.party_support)
            .bind(&req.income_breakdown)
            .bind(&req.expenditure_breakdown)
            .fetch_one(&self.pool)
            .await?;

        Ok(record)
    }

    /// List the reports filed by `user_id`, most recent election first
    ///
    /// `from` and `to` are inclusive calendar days in UTC.
    pub async fn list(&self, user_id: i32, query: &ElectionFundsQuery) -> Result<Vec<ElectionFunds>> {
        let records = list_query(user_id, query)
            .build_query_as::<ElectionFunds>()
            .fetch_all(&self.pool)
            .await?;

        Ok(records)
    }

    /// Get a report by ID
    pub async fn find_by_id(&self, id: i32) -> Result<Option<ElectionFunds>> {
        let sql = format!("SELECT {COLUMNS} FROM election_funds WHERE id = $1");

        let record = sqlx::query_as::<_, ElectionFunds>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(record)
    }

    /// Replace every editable field of a report
    pub async fn update(
        &self,
        id: i32,
        req: &ElectionFundsRequest,
    ) -> Result<Option<ElectionFunds>> {
        let sql = format!(
            r#"
            UPDATE election_funds
            SET candidate_name = $2,
                election_type = $3,
                election_area = $4,
                election_date = $5,
                political_party = $6,
                total_income = $7,
                total_expenditure = $8,
                balance = $9,
                donations = $10,
                personal_funds = $11,
                party_support = $12,
                income_breakdown = $13,
                expenditure_breakdown = $14,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {COLUMNS}
            "#
        );

        let record = sqlx::query_as::<_, ElectionFunds>(&sql)
            .bind(id)
            .bind(&req.candidate_name)
            .bind(&req.election_type)
            .bind(&req.election_area)
            .bind(req.election_date)
            .bind(&req.political_party)
            .bind(req.total_income)
            .bind(req.total_expenditure)
            .bind(req.balance)
            .bind(req.donations)
            .bind(req.personal_funds)
            .bind(req.party_support)
            .bind(&req.income_breakdown)
            .bind(&req.expenditure_breakdown)
            .fetch_optional(&self.pool)
            .await?;

        Ok(record)
    }

    /// Delete a report, returning whether it existed
    pub async fn delete(&self, id: i32) -> Result<bool> {
        let result = sqlx::query("DELETE FROM election_funds WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

/// SELECT over the caller's own reports, narrowed by the query filters
fn list_query(user_id: i32, query: &ElectionFundsQuery) -> QueryBuilder<'static, Postgres> {
    let mut builder =
        QueryBuilder::new(format!("SELECT {COLUMNS} FROM election_funds WHERE user_id = "));
    builder.push_bind(user_id);

    if let Some(candidate) = text_filter(&query.candidate) {
        builder
            .push(" AND candidate_name LIKE ")
            .push_bind(contains_pattern(candidate));
    }
    if let Some(election_type) = text_filter(&query.election_type) {
        builder
            .push(" AND election_type = ")
            .push_bind(election_type.to_string());
    }
    if let Some(area) = text_filter(&query.area) {
        builder
            .push(" AND election_area LIKE ")
            .push_bind(contains_pattern(area));
    }
    if let Some(party) = text_filter(&query.party) {
        builder
            .push(" AND political_party LIKE ")
            .push_bind(contains_pattern(party));
    }
    if let Some(start) = query.from.and_then(|d| d.and_hms_opt(0, 0, 0)) {
        builder
            .push(" AND election_date >= ")
            .push_bind(start.and_utc());
    }
    if let Some(end) = query
        .to
        .and_then(|d| d.succ_opt())
        .and_then(|d| d.and_hms_opt(0, 0, 0))
    {
        builder.push(" AND election_date < ").push_bind(end.and_utc());
    }
    builder.push(" ORDER BY election_date DESC, created_at DESC");

    builder
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_listing_is_scoped_to_owner() {
        let builder = list_query(7, &ElectionFundsQuery::default());

        assert!(builder.sql().ends_with(
            "FROM election_funds WHERE user_id = $1 ORDER BY election_date DESC, created_at DESC"
        ));
    }

    #[test]
    fn test_filters_narrow_the_owner_scope() {
        let query = ElectionFundsQuery {
            party: Some("Green".to_string()),
            from: NaiveDate::from_ymd_opt(2024, 1, 1),
            ..Default::default()
        };
        let builder = list_query(7, &query);

        assert!(builder.sql().contains(
            "WHERE user_id = $1 AND political_party LIKE $2 AND election_date >= $3 ORDER BY"
        ));
    }
}
