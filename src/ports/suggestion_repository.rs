//! Suggestion repository port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, SuggestionId};
use crate::domain::suggestion::Suggestion;

/// Persistence contract for [`Suggestion`] aggregates.
///
/// Votes and comments are owned rows and travel with the aggregate, the same
/// way contract installments do.
#[async_trait]
pub trait SuggestionRepository: Send + Sync {
    /// Saves a new suggestion.
    async fn save(&self, suggestion: &Suggestion) -> Result<(), DomainError>;

    /// Updates a suggestion and reconciles its vote and comment rows.
    ///
    /// # Errors
    ///
    /// - `SuggestionNotFound` if the suggestion doesn't exist
    async fn update(&self, suggestion: &Suggestion) -> Result<(), DomainError>;

    /// Finds a suggestion (with votes and comments) by id.
    async fn find_by_id(&self, id: &SuggestionId) -> Result<Option<Suggestion>, DomainError>;

    /// Lists all suggestions, most voted first, then newest.
    async fn list(&self) -> Result<Vec<Suggestion>, DomainError>;

    /// Deletes a suggestion and its votes and comments.
    ///
    /// # Errors
    ///
    /// - `SuggestionNotFound` if the suggestion doesn't exist
    async fn delete(&self, id: &SuggestionId) -> Result<(), DomainError>;
}
