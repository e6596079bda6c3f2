//! Political funds repository for database operations

use anyhow::Result;
use sqlx::{PgPool, Postgres, QueryBuilder};

use super::{contains_pattern, text_filter};
use crate::models::political_funds::{PoliticalFunds, PoliticalFundsQuery, PoliticalFundsRequest};

const COLUMNS: &str = "id, user_id, organization_name, organization_type, representative_name, \
     report_year, income, expenditure, balance, income_breakdown, expenditure_breakdown, \
     created_at, updated_at";

/// Political funds repository for database operations
#[derive(Clone)]
pub struct PoliticalFundsRepository {
    pool: PgPool,
}

impl PoliticalFundsRepository {
    /// Create a new political funds repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Store a new report owned by `user_id`
    pub async fn create(&self, user_id: i32, req: &PoliticalFundsRequest) -> Result<PoliticalFunds> {
        let sql = format!(
            r#"
            INSERT INTO political_funds (
                user_id, organization_name, organization_type, representative_name,
                report_year, income, expenditure, balance,
                income_breakdown, expenditure_breakdown
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING {COLUMNS}
            "#
        );

        let record = sqlx::query_as::<_, PoliticalFunds>(&sql)
            .bind(user_id)
            .bind(&req.organization_name)
            .bind(&req.organization_type)
            .bind(&req.representative_name)
            .bind(req.report_year)
            .bind(req.income)
            .bind(req.expenditure)
            .bind(req.balance)
            .bind(&req.income_breakdown)
            .bind(&req.expenditure_breakdown)
            .fetch_one(&self.pool)
            .await?;

        Ok(record)
    }

    /// List the reports filed by `user_id`, newest report year first
    pub async fn list(
        &self,
        user_id: i32,
        query: &PoliticalFundsQuery,
    ) -> Result<Vec<PoliticalFunds>> {
        let records = list_query(user_id, query)
            .build_query_as::<PoliticalFunds>()
            .fetch_all(&self.pool)
            .await?;

        Ok(records)
    }

    /// Get a report by ID
    pub async fn find_by_id(&self, id: i32) -> Result<Option<PoliticalFunds>> {
        let sql = format!("SELECT {COLUMNS} FROM political_funds WHERE id = $1");

        let record = sqlx::query_as::<_, PoliticalFunds>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(record)
    }

    /// Replace every editable field of a report
    pub async fn update(
        &self,
        id: i32,
        req: &PoliticalFundsRequest,
    ) -> Result<Option<PoliticalFunds>> {
        let sql = format!(
            r#"
            UPDATE political_funds
            SET organization_name = $2,
                organization_type = $3,
                representative_name = $4,
                report_year = $5,
                income = $6,
                expenditure = $7,
                balance = $8,
                income_breakdown = $9,
                expenditure_breakdown = $10,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {COLUMNS}
            "#
        );

        let record = sqlx::query_as::<_, PoliticalFunds>(&sql)
            .bind(id)
            .bind(&req.organization_name)
            .bind(&req.organization_type)
            .bind(&req.representative_name)
            .bind(req.report_year)
            .bind(req.income)
            .bind(req.expenditure)
            .bind(req.balance)
            .bind(&req.income_breakdown)
            .bind(&req.expenditure_breakdown)
            .fetch_optional(&self.pool)
            .await?;

        Ok(record)
    }

    /// Delete a report, returning whether it existed
    pub async fn delete(&self, id: i32) -> Result<bool> {
        let result = sqlx::query("DELETE FROM political_funds WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

/// SELECT over the caller's own reports, narrowed by the query filters
fn list_query(user_id: i32, query: &PoliticalFundsQuery) -> QueryBuilder<'static, Postgres> {
    let mut builder =
        QueryBuilder::new(format!("SELECT {COLUMNS} FROM political_funds WHERE user_id = "));
    builder.push_bind(user_id);

    if let Some(year) = query.year {
        builder.push(" AND report_year = ").push_bind(year);
    }
    if let Some(organization) = text_filter(&query.organization) {
        builder
            .push(" AND organization_name LIKE ")
            .push_bind(contains_pattern(organization));
    }
    builder.push(" ORDER BY report_year DESC, created_at DESC");

    builder
}
