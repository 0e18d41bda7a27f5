//! HTTP adapter for contract endpoints, installments included.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::contract_routes;
