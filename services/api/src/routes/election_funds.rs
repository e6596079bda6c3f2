//! Election funds report routes

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
        election_funds::{ElectionFunds, ElectionFundsQuery, ElectionFundsRequest},
    },
    state::AppState,
    validation::validate_election_funds,
};

/// Routes mounted behind the bearer-token middleware
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/election_funds", get(list).post(create))
        .route(
            "/election_funds/:id",
            get(fetch).put(replace).delete(remove),
        )
}

fn parse_request(
    payload: Result<Json<ElectionFundsRequest>, JsonRejection>,
) -> ApiResult<ElectionFundsRequest> {
    let Json(payload) = payload?;
    let payload = payload.trimmed();
    validate_election_funds(&payload, Utc::now()).map_err(ApiError::BadRequest)?;
    Ok(payload)
}

async fn owned_report(state: &AppState, id: i32, user: AuthUser) -> ApiResult<ElectionFunds> {
    let report = state
        .election_funds
        .find_by_id(id)
        .await
        .map_err(|e| ApiError::internal("failed to load election funds report", e))?
        .ok_or_else(|| ApiError::NotFound("election funds report not found".to_string()))?;

    if report.user_id != user.id {
        warn!(
            "User {} tried to access election funds report {} owned by {}",
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
    payload: Result<Json<ElectionFundsRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let payload = parse_request(payload)?;

    let report = state
        .election_funds
        .create(user.id, &payload)
        .await
        .map_err(|e| ApiError::internal("failed to create election funds report", e))?;

    info!("User {} filed election funds report {}", user.id, report.id);
    Ok((StatusCode::CREATED, Json(report)))
}

/// List the caller's reports with optional filters
pub async fn list(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    query: Result<Query<ElectionFundsQuery>, QueryRejection>,
) -> ApiResult<impl IntoResponse> {
    let Query(query) = query?;

    if let (Some(from), Some(to)) = (query.from, query.to) {
        if from > to {
            return Err(ApiError::BadRequest(
                "from must not be later than to".to_string(),
            ));
        }
    }

    let reports = state
        .election_funds
        .list(user.id, &query)
        .await
        .map_err(|e| ApiError::internal("failed to list election funds reports", e))?;

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
    payload: Result<Json<ElectionFundsRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let id = report_id(id)?;
    let payload = parse_request(payload)?;
    owned_report(&state, id, user).await?;

    let report = state
        .election_funds
        .update(id, &payload)
        .await
        .map_err(|e| ApiError::internal("failed to update election funds report", e))?
        .ok_or_else(|| ApiError::NotFound("election funds report not found".to_string()))?;

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
        .election_funds
        .delete(id)
        .await
        .map_err(|e| ApiError::internal("failed to delete election funds report", e))?;

    if deleted {
        info!("User {} deleted election funds report {}", user.id, id);
        Ok(Json(json!({ "message": "election funds report deleted" })))
    } else {
        Err(ApiError::NotFound(
            "election funds report not found".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::tests::{send, signed_in, test_app};

    fn valid_body() -> serde_json::Value {
        json!({
            "candidate_name": "山田太郎",
            "election_type": "参議院議員通常選挙",
            "election_area": "東京都",
            "election_date": "2022-07-10T00:00:00Z",
            "political_party": "無所属",
            "total_income": 500,
            "total_expenditure": 300,
            "balance": 200,
            "donations": 100
        })
    }

    #[tokio::test]
    async fn test_requires_token() {
        let (app, _, _) = test_app();

        let (status, body) = send(&app, "GET", "/api/v1/election_funds", Some("garbage"), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "invalid token");

        let (status, _) = send(&app, "DELETE", "/api/v1/election_funds/1", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_invalid_reports_are_rejected_before_storage() {
        let (app, _, _) = test_app();
        let (_, token) = signed_in(&app, "alice").await;

        let mut body = valid_body();
        body["election_date"] = json!("1900-01-01T00:00:00Z");
        let (status, response) =
            send(&app, "POST", "/api/v1/election_funds", Some(&token), Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(
            response["error"]
                .as_str()
                .unwrap()
                .starts_with("election_date")
        );

        let mut body = valid_body();
        body["donations"] = json!(1000);
        let (status, response) =
            send(&app, "POST", "/api/v1/election_funds", Some(&token), Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(response["error"], "donations must not exceed total_income");

        let mut body = valid_body();
        body["election_date"] = json!("yesterday");
        let (status, _) =
            send(&app, "POST", "/api/v1/election_funds", Some(&token), Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_date_range_must_be_ordered() {
        let (app, _, _) = test_app();
        let (_, token) = signed_in(&app, "alice").await;

        let (status, body) = send(
            &app,
            "GET",
            "/api/v1/election_funds?from=2024-12-31&to=2024-01-01",
            Some(&token),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "from must not be later than to");

        let (status, _) = send(
            &app,
            "GET",
            "/api/v1/election_funds?from=last-week",
            Some(&token),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
