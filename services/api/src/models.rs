//! API models for request and response payloads

use auth::models::{PublicUser, User};
use serde::{Deserialize, Serialize};

pub mod election_funds;
pub mod political_funds;

/// Request for user registration
///
/// Absent fields deserialize as empty strings so validation can name them.
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Request for login
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Response for a successful signup
pub type SignupResponse = PublicUser;

/// Response for a successful login
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub user: User,
    pub token: String,
}

/// Envelope for collection responses
#[derive(Debug, Serialize)]
pub struct ListResponse<T> {
    pub count: usize,
    pub data: Vec<T>,
}

impl<T> From<Vec<T>> for ListResponse<T> {
    fn from(data: Vec<T>) -> Self {
        Self {
            count: data.len(),
            data,
        }
    }
}
