//! Router for meeting endpoints.

use axum::routing::get;
use axum::Router;

use super::super::state::AppState;
use super::handlers::{
    create_meeting, delete_meeting, get_meeting, list_meetings, update_meeting,
};

/// Routes mounted at `/api/meetings`.
pub fn meeting_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_meetings).post(create_meeting))
        .route(
            "/:id",
            get(get_meeting).put(update_meeting).delete(delete_meeting),
        )
}
