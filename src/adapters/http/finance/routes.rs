//! Router for finance endpoints.

use axum::routing::get;
use axum::Router;

use super::super::state::AppState;
use super::handlers::{ledger_summary, project_summary};

/// Routes mounted at `/api/finance`.
pub fn finance_routes() -> Router<AppState> {
    Router::new()
        .route("/summary", get(ledger_summary))
        .route("/projects/:id", get(project_summary))
}
