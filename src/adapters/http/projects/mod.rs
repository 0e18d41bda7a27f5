//! HTTP adapter for project endpoints, including the task board.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::project_routes;
