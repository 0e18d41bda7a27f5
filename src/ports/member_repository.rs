//! Member repository port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, MemberId};
use crate::domain::member::Member;

/// Persistence contract for [`Member`] records.
///
/// Email uniqueness is enforced by the store; a duplicate insert surfaces as
/// `Conflict` so the HTTP layer can answer 409.
#[async_trait]
pub trait MemberRepository: Send + Sync {
    /// Saves a new member.
    ///
    /// # Errors
    ///
    /// - `Conflict` if the email is already taken
    async fn save(&self, member: &Member) -> Result<(), DomainError>;

    /// Updates an existing member.
    ///
    /// # Errors
    ///
    /// - `MemberNotFound` if the member doesn't exist
    /// - `Conflict` if the new email is already taken
    async fn update(&self, member: &Member) -> Result<(), DomainError>;

    /// Finds a member by id. Returns `None` if not found.
    async fn find_by_id(&self, id: &MemberId) -> Result<Option<Member>, DomainError>;

    /// Finds a member by email (login path). Returns `None` if not found.
    async fn find_by_email(&self, email: &str) -> Result<Option<Member>, DomainError>;

    /// Lists all members ordered by name.
    async fn list(&self) -> Result<Vec<Member>, DomainError>;

    /// Deletes a member.
    ///
    /// # Errors
    ///
    /// - `MemberNotFound` if the member doesn't exist
    async fn delete(&self, id: &MemberId) -> Result<(), DomainError>;
}
