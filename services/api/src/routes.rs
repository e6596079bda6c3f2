//! API service routes

use auth::{
    auth_middleware,
    models::AuthUser,
    validation::{validate_login, validate_signup},
};
use axum::{
    Extension, Json, Router,
    body::Body,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::{Request, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use common::database::{health_check, pool_stats};
use serde_json::json;
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::warn;

use crate::{
    error::{ApiError, ApiResult},
    models::{ListResponse, LoginRequest, LoginResponse, SignupRequest, SignupResponse},
    state::AppState,
};

pub mod election_funds;
pub mod political_funds;

/// Create the router for the API service
pub fn create_router(state: AppState) -> Router {
    let protected_routes = Router::new()
        .route("/profile", get(profile))
        .merge(political_funds::router())
        .merge(election_funds::router())
        .route_layer(middleware::from_fn_with_state(
            state.jwt_service.clone(),
            auth_middleware,
        ));

    // Layers run last-added first: the token is checked before the role.
    let admin_routes = Router::new()
        .route("/admin/users", get(list_users))
        .route("/admin/users/:id", get(get_user))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin))
        .route_layer(middleware::from_fn_with_state(
            state.jwt_service.clone(),
            auth_middleware,
        ));

    let api_routes = Router::new()
        .route("/health", get(health))
        .route("/signup", post(signup))
        .route("/login", post(login))
        .merge(protected_routes)
        .merge(admin_routes);

    Router::new()
        .route("/", get(welcome))
        .nest("/api/v1", api_routes)
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Plain-text banner
pub async fn welcome(State(state): State<AppState>) -> impl IntoResponse {
    format!(
        "Welcome to the Polimoney API (up since {})",
        state.started_at.to_rfc3339()
    )
}

/// Health check endpoint
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let pool = pool_stats(&state.db_pool);

    match health_check(&state.db_pool).await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "database": "connected",
                "pool": pool,
            })),
        ),
        Err(_) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "status": "error",
                "database": "unreachable",
                "pool": pool,
            })),
        ),
    }
}

/// Register a new user
pub async fn signup(
    State(state): State<AppState>,
    payload: Result<Json<SignupRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(payload) = payload?;
    validate_signup(&payload.username, &payload.email, &payload.password)
        .map_err(ApiError::BadRequest)?;

    let user = state
        .auth_service
        .signup(payload.username.trim(), &payload.email, &payload.password)
        .await?;

    Ok((StatusCode::CREATED, Json(SignupResponse::from(&user))))
}

/// Exchange credentials for a session token
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(payload) = payload?;
    validate_login(&payload.email, &payload.password).map_err(ApiError::BadRequest)?;

    let (user, token) = state
        .auth_service
        .login(&payload.email, &payload.password)
        .await?;

    Ok(Json(LoginResponse { user, token }))
}

/// Current user with role
pub async fn profile(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> ApiResult<impl IntoResponse> {
    let profile = state
        .users
        .find_with_role(user.id)
        .await?
        .ok_or_else(|| ApiError::NotFound("user not found".to_string()))?;

    Ok(Json(profile))
}

/// Reject callers whose role is not admin
///
/// Runs after [`auth_middleware`], so the caller identity is already known.
pub async fn require_admin(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let user = req
        .extensions()
        .get::<AuthUser>()
        .copied()
        .ok_or_else(|| ApiError::Unauthorized("authorization header is missing".to_string()))?;

    let caller = state.users.find_with_role(user.id).await?;
    match caller {
        Some(caller) if caller.is_admin() => Ok(next.run(req).await),
        _ => {
            warn!("User {} denied access to {}", user.id, req.uri().path());
            Err(ApiError::Forbidden("administrator role required".to_string()))
        }
    }
}

/// All users with their roles, newest first
pub async fn list_users(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let users = state.users.list_with_roles().await?;
    Ok(Json(ListResponse::from(users)))
}

/// One user with role
pub async fn get_user(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> ApiResult<impl IntoResponse> {
    let Path(id) = id.map_err(|_| ApiError::BadRequest("invalid user id".to_string()))?;

    let user = state
        .users
        .find_with_role(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("user not found".to_string()))?;

    Ok(Json(user))
}
