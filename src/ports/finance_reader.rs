//! Read-only port for finance summaries.

use async_trait::async_trait;

use crate::domain::finance::{LedgerSummary, ProjectFinanceSummary};
use crate::domain::foundation::{DomainError, ProjectId, Timestamp};

/// Read-only port backing the finance endpoints.
///
/// Implementations fetch the underlying rows and delegate the arithmetic to
/// [`crate::domain::finance`]; they never aggregate in SQL, so the numbers
/// match the property-tested domain computation exactly.
#[async_trait]
pub trait FinanceReader: Send + Sync {
    /// Computes the financial summary of one project.
    ///
    /// # Errors
    ///
    /// - `ProjectNotFound` if the project doesn't exist
    async fn project_finance(
        &self,
        project_id: &ProjectId,
    ) -> Result<ProjectFinanceSummary, DomainError>;

    /// Computes ledger totals for the given window (both bounds optional).
    async fn ledger(
        &self,
        from: Option<Timestamp>,
        to: Option<Timestamp>,
    ) -> Result<LedgerSummary, DomainError>;
}
