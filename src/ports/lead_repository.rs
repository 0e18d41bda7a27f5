//! Lead repository port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, LeadId};
use crate::domain::lead::Lead;

/// Persistence contract for [`Lead`] records.
#[async_trait]
pub trait LeadRepository: Send + Sync {
    /// Saves a new lead.
    async fn save(&self, lead: &Lead) -> Result<(), DomainError>;

    /// Updates an existing lead (including conversion state).
    ///
    /// # Errors
    ///
    /// - `LeadNotFound` if the lead doesn't exist
    async fn update(&self, lead: &Lead) -> Result<(), DomainError>;

    /// Finds a lead by id. Returns `None` if not found.
    async fn find_by_id(&self, id: &LeadId) -> Result<Option<Lead>, DomainError>;

    /// Lists all leads, newest first.
    async fn list(&self) -> Result<Vec<Lead>, DomainError>;

    /// Deletes a lead.
    ///
    /// # Errors
    ///
    /// - `LeadNotFound` if the lead doesn't exist
    async fn delete(&self, id: &LeadId) -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lead_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn LeadRepository) {}
    }
}
