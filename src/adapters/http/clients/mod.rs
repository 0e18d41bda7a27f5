//! HTTP adapter for client endpoints.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::client_routes;
