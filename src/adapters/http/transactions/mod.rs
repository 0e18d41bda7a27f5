//! HTTP adapter for income/expense ledger endpoints.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::transaction_routes;
