//! Middleware for bearer token validation

use axum::{
    Json,
    body::Body,
    extract::State,
    http::{Request, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use tracing::debug;

use crate::{error::TokenError, jwt::JwtService, models::AuthUser};

/// Reasons a request is turned away before reaching a protected handler
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AuthRejection {
    #[error("authorization header is missing")]
    MissingHeader,

    #[error("authorization header must be 'Bearer <token>'")]
    MalformedHeader,

    #[error("invalid token")]
    InvalidToken,

    #[error("token has expired")]
    ExpiredToken,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        let body = Json(json!({ "error": self.to_string() }));
        (StatusCode::UNAUTHORIZED, body).into_response()
    }
}

impl From<TokenError> for AuthRejection {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Expired => AuthRejection::ExpiredToken,
            _ => AuthRejection::InvalidToken,
        }
    }
}

/// Extract the bearer token from an `Authorization` header value
pub fn bearer_token(value: &str) -> Result<&str, AuthRejection> {
    let mut parts = value.split(' ');
    match (parts.next(), parts.next(), parts.next()) {
        (Some("Bearer"), Some(token), None) if !token.is_empty() => Ok(token),
        _ => Err(AuthRejection::MalformedHeader),
    }
}

/// Validate the bearer token and attach an [`AuthUser`] to the request
pub async fn auth_middleware(
    State(jwt): State<JwtService>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AuthRejection> {
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or(AuthRejection::MissingHeader)?
        .to_str()
        .map_err(|_| AuthRejection::MalformedHeader)?;

    let token = bearer_token(auth_header)?;

    let user_id = jwt.verify(token).map_err(|e| {
        debug!("Rejected bearer token: {}", e);
        AuthRejection::from(e)
    })?;

    req.extensions_mut().insert(AuthUser { id: user_id });

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AuthConfig;
    use crate::jwt::{Claims, TOKEN_TTL_SECS};
    use axum::{Extension, Router, middleware, routing::get};
    use jsonwebtoken::{EncodingKey, Header, encode};
    use std::time::{SystemTime, UNIX_EPOCH};
    use tower::ServiceExt;

    fn jwt() -> JwtService {
        JwtService::new(&AuthConfig::new("salt", "secret"))
    }

    fn app(jwt: JwtService) -> Router {
        Router::new()
            .route(
                "/me",
                get(|Extension(user): Extension<AuthUser>| async move { user.id.to_string() }),
            )
            .route_layer(middleware::from_fn_with_state(jwt, auth_middleware))
    }

    async fn call(authorization: Option<&str>) -> (StatusCode, String) {
        let mut builder = Request::builder().uri("/me");
        if let Some(value) = authorization {
            builder = builder.header(header::AUTHORIZATION, value);
        }
        let response = app(jwt())
            .oneshot(builder.body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    fn error_message(body: &str) -> String {
        let value: serde_json::Value = serde_json::from_str(body).unwrap();
        value["error"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_valid_token_reaches_handler() {
        let token = jwt().issue(42).unwrap();
        let (status, body) = call(Some(&format!("Bearer {}", token))).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "42");
    }

    #[tokio::test]
    async fn test_rejections_have_distinct_messages() {
        let now = SystemTime::now().duration_since(UNIX_EPOCH).unwrap().as_secs();
        let expired = encode(
            &Header::default(),
            &Claims {
                user_id: 1,
                iat: now - 2 * TOKEN_TTL_SECS,
                exp: now - 10,
            },
            &EncodingKey::from_secret(b"secret"),
        )
        .unwrap();

        let cases = [
            (None, AuthRejection::MissingHeader),
            (Some("Token abc".to_string()), AuthRejection::MalformedHeader),
            (Some("Bearer".to_string()), AuthRejection::MalformedHeader),
            (Some("Bearer a b".to_string()), AuthRejection::MalformedHeader),
            (Some("Bearer not-a-jwt".to_string()), AuthRejection::InvalidToken),
            (Some(format!("Bearer {}", expired)), AuthRejection::ExpiredToken),
        ];

        for (header_value, expected) in cases {
            let (status, body) = call(header_value.as_deref()).await;
            assert_eq!(status, StatusCode::UNAUTHORIZED, "{:?}", header_value);
            assert_eq!(error_message(&body), expected.to_string());
        }
    }

    #[tokio::test]
    async fn test_token_from_other_secret_is_invalid() {
        let other = JwtService::new(&AuthConfig::new("salt", "other"));
        let token = other.issue(1).unwrap();
        let (status, body) = call(Some(&format!("Bearer {}", token))).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(error_message(&body), "invalid token");
    }

    #[test]
    fn test_bearer_token_parsing() {
        assert_eq!(bearer_token("Bearer abc").unwrap(), "abc");
        assert!(bearer_token("bearer abc").is_err());
        assert!(bearer_token("Bearer ").is_err());
        assert!(bearer_token("").is_err());
    }
}
