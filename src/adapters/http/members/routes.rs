//! Router for member endpoints.

use axum::routing::get;
use axum::Router;

use super::super::state::AppState;
use super::handlers::{create_member, delete_member, get_member, list_members, update_member};

/// Routes mounted at `/api/members`. Admin only.
pub fn member_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_members).post(create_member))
        .route(
            "/:id",
            get(get_member).put(update_member).delete(delete_member),
        )
}
