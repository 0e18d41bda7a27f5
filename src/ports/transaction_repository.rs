//! Transaction (ledger) repository port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ProjectId, Timestamp, TransactionId};
use crate::domain::transaction::{Transaction, TransactionKind};

/// Filters for listing ledger entries. Empty filter lists everything.
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    pub kind: Option<TransactionKind>,
    pub project_id: Option<ProjectId>,
    pub from: Option<Timestamp>,
    pub to: Option<Timestamp>,
}

/// Persistence contract for [`Transaction`] records.
#[async_trait]
pub trait TransactionRepository: Send + Sync {
    /// Saves a new ledger entry.
    async fn save(&self, transaction: &Transaction) -> Result<(), DomainError>;

    /// Updates an existing ledger entry.
    ///
    /// # Errors
    ///
    /// - `TransactionNotFound` if the entry doesn't exist
    async fn update(&self, transaction: &Transaction) -> Result<(), DomainError>;

    /// Finds a ledger entry by id. Returns `None` if not found.
    async fn find_by_id(&self, id: &TransactionId) -> Result<Option<Transaction>, DomainError>;

    /// Lists ledger entries matching the filter, most recent first.
    async fn list(&self, filter: &TransactionFilter) -> Result<Vec<Transaction>, DomainError>;

    /// Deletes a ledger entry.
    ///
    /// # Errors
    ///
    /// - `TransactionNotFound` if the entry doesn't exist
    async fn delete(&self, id: &TransactionId) -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transaction_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn TransactionRepository) {}
    }
}
