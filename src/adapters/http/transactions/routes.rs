//! Router for ledger endpoints.

use axum::routing::get;
use axum::Router;

use super::super::state::AppState;
use super::handlers::{
    create_transaction, delete_transaction, get_transaction, list_transactions,
    update_transaction,
};

/// Routes mounted at `/api/transactions`.
pub fn transaction_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_transactions).post(create_transaction))
        .route(
            "/:id",
            get(get_transaction)
                .put(update_transaction)
                .delete(delete_transaction),
        )
}
