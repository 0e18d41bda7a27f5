//! Data transfer objects for the login endpoint.

use serde::{Deserialize, Serialize};

use super::super::members::dto::MemberResponse;

/// Login payload.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Successful login: a bearer token and the member it belongs to.
#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub member: MemberResponse,
}
