//! HTTP adapter for meeting endpoints.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::meeting_routes;
