//! HTTP adapter for member management endpoints.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::member_routes;
