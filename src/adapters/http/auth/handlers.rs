//! HTTP handler for login.

use axum::extract::State;
use axum::Json;

use crate::domain::foundation::{DomainError, ErrorCode};

use super::super::error::ApiResult;
use super::super::state::AppState;
use super::dto::{LoginRequest, LoginResponse};

/// Verifies email and password and issues a bearer token.
///
/// Unknown emails, wrong passwords and deactivated members all answer the
/// same 401 so the endpoint doesn't leak which emails exist.
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let member = state
        .members
        .find_by_email(&payload.email)
        .await?
        .ok_or_else(invalid_credentials)?;

    if !member.is_active() {
        return Err(invalid_credentials().into());
    }
    if !state.passwords.verify(&payload.password, member.password_hash()) {
        return Err(invalid_credentials().into());
    }

    let token = state.tokens.issue(&member)?;
    tracing::info!(member = %member.id(), "member logged in");

    Ok(Json(LoginResponse {
        token,
        member: (&member).into(),
    }))
}

fn invalid_credentials() -> DomainError {
    DomainError::new(ErrorCode::Unauthorized, "Invalid email or password")
}
