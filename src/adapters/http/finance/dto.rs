//! Data transfer objects for finance endpoints.
//!
//! The summary types in `domain::finance` already serialize the way the API
//! wants them, so this module only carries the query shapes.

use serde::Deserialize;

use crate::domain::foundation::Timestamp;

/// `?from=&to=` window for the ledger summary.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LedgerQuery {
    #[serde(default)]
    pub from: Option<Timestamp>,
    #[serde(default)]
    pub to: Option<Timestamp>,
}
