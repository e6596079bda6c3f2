//! Field validation for report payloads
//!
//! Validators expect already-trimmed requests and return the first problem
//! found as a message naming the field.

use chrono::{DateTime, Datelike, Months, Utc};

use crate::models::election_funds::{ELECTION_TYPES, ElectionFundsRequest};
use crate::models::political_funds::{ORGANIZATION_TYPES, PoliticalFundsRequest};

pub const MIN_REPORT_YEAR: i32 = 1990;
pub const MIN_ELECTION_YEAR: i32 = 1945;

/// How far into the future an election may be scheduled
const MAX_ELECTION_LEAD_MONTHS: u32 = 24;

/// Validate a political funds report
pub fn validate_political_funds(
    req: &PoliticalFundsRequest,
    now: DateTime<Utc>,
) -> Result<(), String> {
    validate_length("organization_name", &req.organization_name, 2, 255)?;
    validate_choice(
        "organization_type",
        &req.organization_type,
        &ORGANIZATION_TYPES,
    )?;
    validate_length("representative_name", &req.representative_name, 2, 100)?;

    let max_year = now.year() + 1;
    if req.report_year == 0 {
        return Err("report_year is required".to_string());
    }
    if !(MIN_REPORT_YEAR..=max_year).contains(&req.report_year) {
        return Err(format!(
            "report_year must be between {} and {}",
            MIN_REPORT_YEAR, max_year
        ));
    }

    validate_non_negative("income", req.income)?;
    validate_non_negative("expenditure", req.expenditure)?;
    validate_balance(req.income, req.expenditure, req.balance)
}

/// Validate an election funds report
pub fn validate_election_funds(
    req: &ElectionFundsRequest,
    now: DateTime<Utc>,
) -> Result<(), String> {
    validate_required("candidate_name", &req.candidate_name)?;
    validate_choice("election_type", &req.election_type, &ELECTION_TYPES)?;
    validate_required("election_area", &req.election_area)?;

    let date = req
        .election_date
        .ok_or_else(|| "election_date is required".to_string())?;
    if date.year() < MIN_ELECTION_YEAR {
        return Err(format!(
            "election_date must be on or after {}-01-01",
            MIN_ELECTION_YEAR
        ));
    }
    let latest = now
        .checked_add_months(Months::new(MAX_ELECTION_LEAD_MONTHS))
        .unwrap_or(now);
    if date > latest {
        return Err(format!(
            "election_date must be on or before {}",
            latest.format("%Y-%m-%d")
        ));
    }

    if let Some(party) = &req.political_party {
        if party.trim().is_empty() {
            return Err("political_party must not be blank".to_string());
        }
    }

    validate_non_negative("total_income", req.total_income)?;
    validate_non_negative("total_expenditure", req.total_expenditure)?;
    validate_non_negative("donations", req.donations)?;
    validate_non_negative("personal_funds", req.personal_funds)?;
    validate_non_negative("party_support", req.party_support)?;
    validate_balance(req.total_income, req.total_expenditure, req.balance)?;

    for (field, amount) in [
        ("donations", req.donations),
        ("personal_funds", req.personal_funds),
        ("party_support", req.party_support),
    ] {
        if let (Some(amount), Some(total)) = (amount, req.total_income) {
            if amount > total {
                return Err(format!("{} must not exceed total_income", field));
            }
        }
    }

    Ok(())
}

fn validate_required(field: &str, value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("{} is required", field));
    }
    Ok(())
}

fn validate_length(field: &str, value: &str, min: usize, max: usize) -> Result<(), String> {
    validate_required(field, value)?;

    let len = value.trim().chars().count();
    if len < min || len > max {
        return Err(format!(
            "{} must be between {} and {} characters long",
            field, min, max
        ));
    }
    Ok(())
}

fn validate_choice(field: &str, value: &str, allowed: &[&str]) -> Result<(), String> {
    validate_required(field, value)?;

    if !allowed.contains(&value.trim()) {
        return Err(format!(
            "{} must be one of: {}",
            field,
            allowed.join(", ")
        ));
    }
    Ok(())
}

fn validate_non_negative(field: &str, amount: Option<i64>) -> Result<(), String> {
    match amount {
        Some(value) if value < 0 => Err(format!("{} must not be negative", field)),
        _ => Ok(()),
    }
}

fn validate_balance(
    income: Option<i64>,
    expenditure: Option<i64>,
    balance: Option<i64>,
) -> Result<(), String> {
    if let (Some(income), Some(expenditure), Some(balance)) = (income, expenditure, balance) {
        if income.checked_sub(expenditure) != Some(balance) {
            return Err("balance must equal income minus expenditure".to_string());
        }
    }
    Ok(())
}
