//! HTTP adapters - the REST surface.
//!
//! Each resource has its own module with dto/handlers/routes; `router`
//! assembles them under `/api` behind the bearer middleware.

pub mod auth;
pub mod clients;
pub mod contracts;
pub mod error;
pub mod finance;
pub mod leads;
pub mod meetings;
pub mod members;
pub mod middleware;
pub mod projects;
pub mod router;
pub mod state;
pub mod suggestions;
pub mod transactions;

pub use error::{ApiError, ApiResult};
pub use router::{api_router, health_router};
pub use state::AppState;
