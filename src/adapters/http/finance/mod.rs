//! HTTP adapter for finance summary endpoints.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::finance_routes;
