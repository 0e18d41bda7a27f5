//! Bearer-token middleware and extractors.
//!
//! The middleware validates the Authorization header and injects
//! `AuthenticatedMember` into request extensions. Handlers take the
//! `RequireAuth` extractor to enforce a logged-in caller, and call
//! `require_role` where a specific role is needed.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::adapters::auth::{AuthenticatedMember, TokenService};
use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::member::Role;

use super::super::error::ApiError;

/// Middleware state - the token verifier.
pub type AuthState = Arc<TokenService>;

/// Validates the Bearer token and injects the member into extensions.
///
/// Missing tokens pass through untouched so that public routes under the
/// same layer keep working; `RequireAuth` answers 401 for them. An invalid
/// or expired token is rejected here.
pub async fn auth_middleware(
    State(tokens): State<AuthState>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "));

    match token {
        Some(token) => match tokens.verify(token) {
            Ok(member) => {
                request.extensions_mut().insert(member);
                next.run(request).await
            }
            Err(err) => ApiError(err).into_response(),
        },
        None => next.run(request).await,
    }
}

/// Extractor that requires an authenticated member.
#[derive(Debug, Clone)]
pub struct RequireAuth(pub AuthenticatedMember);

impl<S> axum::extract::FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut Parts,
        _state: &'life1 S,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            parts
                .extensions
                .get::<AuthenticatedMember>()
                .cloned()
                .map(RequireAuth)
                .ok_or(AuthRejection)
        })
    }
}

/// Checks that the caller holds `role` (admins always pass).
///
/// # Errors
///
/// - `Forbidden` when the role is missing
pub fn require_role(member: &AuthenticatedMember, role: Role) -> Result<(), DomainError> {
    if member.has_role(role) {
        return Ok(());
    }
    Err(DomainError::new(
        ErrorCode::Forbidden,
        "Insufficient role for this operation",
    ))
}

/// Rejection for requests with no authenticated member.
#[derive(Debug, Clone)]
pub struct AuthRejection;

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        (
            StatusCode::UNAUTHORIZED,
            Json(serde_json::json!({
                "code": "UNAUTHORIZED",
                "message": "Authentication required"
            })),
        )
            .into_response()
    }
}
