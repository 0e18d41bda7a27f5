//! Opsdeck - operations backend for a services studio.
//!
//! Exposes the REST/JSON API behind the studio dashboard: CRM (clients and
//! leads), project and task boards, contracts with payment installments,
//! the income/expense ledger, meetings, and the internal suggestions board.

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
