//! Domain layer - aggregates, value objects, and pure business logic.

pub mod client;
pub mod contract;
pub mod finance;
pub mod foundation;
pub mod lead;
pub mod meeting;
pub mod member;
pub mod project;
pub mod suggestion;
pub mod transaction;
