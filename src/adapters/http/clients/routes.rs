//! Router for client endpoints.

use axum::routing::get;
use axum::Router;

use super::super::state::AppState;
use super::handlers::{create_client, delete_client, get_client, list_clients, update_client};

/// Routes mounted at `/api/clients`.
pub fn client_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_clients).post(create_client))
        .route(
            "/:id",
            get(get_client).put(update_client).delete(delete_client),
        )
}
