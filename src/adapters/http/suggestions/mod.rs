//! HTTP adapter for the internal suggestions board.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::suggestion_routes;
