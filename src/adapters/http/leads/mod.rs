//! HTTP adapter for lead endpoints.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::lead_routes;
