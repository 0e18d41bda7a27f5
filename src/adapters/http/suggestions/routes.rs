//! Router for suggestion endpoints.

use axum::routing::{delete, get, post};
use axum::Router;

use super::super::state::AppState;
use super::handlers::{
    add_comment, add_vote, create_suggestion, delete_suggestion, get_suggestion,
    list_suggestions, remove_comment, remove_vote, update_suggestion,
};

/// Routes mounted at `/api/suggestions`.
pub fn suggestion_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_suggestions).post(create_suggestion))
        .route(
            "/:id",
            get(get_suggestion)
                .put(update_suggestion)
                .delete(delete_suggestion),
        )
        .route("/:id/vote", post(add_vote).delete(remove_vote))
        .route("/:id/comments", post(add_comment))
        .route("/:id/comments/:comment_id", delete(remove_comment))
}
