//! Contract repository port.

use async_trait::async_trait;

use crate::domain::contract::Contract;
use crate::domain::foundation::{ContractId, DomainError};

/// Persistence contract for [`Contract`] aggregates.
///
/// Installments are owned rows: `update` persists the aggregate's current
/// installment set wholesale, which keeps the write path aligned with the
/// aggregate's in-memory mutations.
#[async_trait]
pub trait ContractRepository: Send + Sync {
    /// Saves a new contract and its installments.
    async fn save(&self, contract: &Contract) -> Result<(), DomainError>;

    /// Updates a contract and replaces its installment rows.
    ///
    /// # Errors
    ///
    /// - `ContractNotFound` if the contract doesn't exist
    async fn update(&self, contract: &Contract) -> Result<(), DomainError>;

    /// Finds a contract (with installments) by id. Returns `None` if not found.
    async fn find_by_id(&self, id: &ContractId) -> Result<Option<Contract>, DomainError>;

    /// Lists all contracts with their installments, newest first.
    async fn list(&self) -> Result<Vec<Contract>, DomainError>;

    /// Deletes a contract and its installments.
    ///
    /// # Errors
    ///
    /// - `ContractNotFound` if the contract doesn't exist
    async fn delete(&self, id: &ContractId) -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contract_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn ContractRepository) {}
    }
}
