//! Router for auth endpoints.

use axum::routing::post;
use axum::Router;

use super::super::state::AppState;
use super::handlers::login;

/// Routes mounted at `/api/auth`. Login is the one public endpoint.
pub fn auth_routes() -> Router<AppState> {
    Router::new().route("/login", post(login))
}
