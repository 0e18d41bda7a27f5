//! Router for contract endpoints.

use axum::routing::{get, post, put};
use axum::Router;

use super::super::state::AppState;
use super::handlers::{
    add_payment, create_contract, delete_contract, get_contract, list_contracts, remove_payment,
    update_contract, update_payment,
};

/// Routes mounted at `/api/contracts`.
pub fn contract_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_contracts).post(create_contract))
        .route(
            "/:id",
            get(get_contract).put(update_contract).delete(delete_contract),
        )
        .route("/:id/payments", post(add_payment))
        .route(
            "/:id/payments/:payment_id",
            put(update_payment).delete(remove_payment),
        )
}
