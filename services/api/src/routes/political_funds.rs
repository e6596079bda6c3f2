//! Political funds report routes

use auth::models::AuthUser;
use axum::{
    Extension, Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use chrono::Utc;
use serde_json::json;
use tracing::{info, warn};

use crate::{
    error::{ApiError, ApiResult},
    models::{
        ListResponse,
        political_funds::{PoliticalFunds, PoliticalFundsQuery, PoliticalFundsRequest},
    },
    state::AppState,
    validation::validate_political_funds,
};

/// Routes mounted behind the bearer-token middleware
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/political_funds", get(list).post(create))
        .route(
            "/political_funds/:id",
            get(fetch).put(replace).delete(remove),
        )
}

fn parse_request(
    payload: Result<Json<PoliticalFundsRequest>, JsonRejection>,
) -> ApiResult<PoliticalFundsRequest> {
    let Json(payload) = payload?;
    let payload = payload.trimmed();
    validate_political_funds(&payload, Utc::now()).map_err(ApiError::BadRequest)?;
    Ok(payload)
}

/// Load a report and make sure the caller filed it
async fn owned_report(state: &AppState, id: i32, user: AuthUser) -> ApiResult<PoliticalFunds> {
    let report = state
        .political_funds
        .find_by_id(id)
        .await
        .map_err(|e| ApiError::internal("failed to load political funds report", e))?
        .ok_or_else(|| ApiError::NotFound("political funds report not found".to_string()))?;

    if report.user_id != user.id {
        warn!(
            "User {} tried to access political funds report {} owned by {}",
            user.id, id, report.user_id
        );
        return Err(ApiError::Forbidden(
            "report belongs to another user".to_string(),
        ));
    }

    Ok(report)
}

fn report_id(id: Result<Path<i32>, PathRejection>) -> ApiResult<i32> {
    id.map(|Path(id)| id)
        .map_err(|_| ApiError::BadRequest("invalid report id".to_string()))
}

/// File a new report
pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    payload: Result<Json<PoliticalFundsRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let payload = parse_request(payload)?;

    let report = state
        .political_funds
        .create(user.id, &payload)
        .await
        .map_err(|e| ApiError::internal("failed to create political funds report", e))?;

    info!("User {} filed political funds report {}", user.id, report.id);
    Ok((StatusCode::CREATED, Json(report)))
}

/// List the caller's reports with optional filters
pub async fn list(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    query: Result<Query<PoliticalFundsQuery>, QueryRejection>,
) -> ApiResult<impl IntoResponse> {
    let Query(query) = query?;

    let reports = state
        .political_funds
        .list(user.id, &query)
        .await
        .map_err(|e| ApiError::internal("failed to list political funds reports", e))?;

    Ok(Json(ListResponse::from(reports)))
}

/// Get one of the caller's reports
pub async fn fetch(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    id: Result<Path<i32>, PathRejection>,
) -> ApiResult<impl IntoResponse> {
    let report = owned_report(&state, report_id(id)?, user).await?;
    Ok(Json(report))
}

/// Replace one of the caller's reports
pub async fn replace(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    id: Result<Path<i32>, PathRejection>,
    payload: Result<Json<PoliticalFundsRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let id = report_id(id)?;
    let payload = parse_request(payload)?;
    owned_report(&state, id, user).await?;

    let report = state
        .political_funds
        .update(id, &payload)
        .await
        .map_err(|e| ApiError::internal("failed to update political funds report", e))?
        .ok_or_else(|| ApiError::NotFound("political funds report not found".to_string()))?;

    Ok(Json(report))
}

/// Delete one of the caller's reports
pub async fn remove(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    id: Result<Path<i32>, PathRejection>,
) -> ApiResult<impl IntoResponse> {
    let id = report_id(id)?;
    owned_report(&state, id, user).await?;

    let deleted = state
        .political_funds
        .delete(id)
        .await
        .map_err(|e| ApiError::internal("failed to delete political funds report", e))?;

    if deleted {
        info!("User {} deleted political funds report {}", user.id, id);
        Ok(Json(json!({ "message": "political funds report deleted" })))
    } else {
        Err(ApiError::NotFound(
            "political funds report not found".to_string(),
        ))
    }
}
