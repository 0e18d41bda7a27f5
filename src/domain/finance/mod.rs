//! Financial aggregation.
//!
//! The dashboard's money numbers (per-project totals, payment progress,
//! effective hourly rate, ledger balances) used to be recomputed ad hoc by
//! every route that needed them. They live here instead, as pure folds over
//! already-fetched rows; adapters only fetch.

mod summary;

pub use summary::{
    ledger_summary, project_summary, LedgerSummary, MonthlyTotals, ProjectFinanceSummary,
};
