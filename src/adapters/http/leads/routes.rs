//! Router for lead endpoints.

use axum::routing::{get, post};
use axum::Router;

use super::super::state::AppState;
use super::handlers::{
    convert_lead, create_lead, delete_lead, get_lead, list_leads, update_lead,
};

/// Routes mounted at `/api/leads`.
pub fn lead_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_leads).post(create_lead))
        .route("/:id", get(get_lead).put(update_lead).delete(delete_lead))
        .route("/:id/convert", post(convert_lead))
}
