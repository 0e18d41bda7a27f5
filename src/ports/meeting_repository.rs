//! Meeting repository port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, MeetingId, Timestamp};
use crate::domain::meeting::Meeting;

/// Time window for listing meetings. Empty range lists everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct MeetingRange {
    pub from: Option<Timestamp>,
    pub to: Option<Timestamp>,
}

/// Persistence contract for [`Meeting`] records.
#[async_trait]
pub trait MeetingRepository: Send + Sync {
    /// Saves a new meeting.
    async fn save(&self, meeting: &Meeting) -> Result<(), DomainError>;

    /// Updates an existing meeting.
    ///
    /// # Errors
    ///
    /// - `MeetingNotFound` if the meeting doesn't exist
    async fn update(&self, meeting: &Meeting) -> Result<(), DomainError>;

    /// Finds a meeting by id. Returns `None` if not found.
    async fn find_by_id(&self, id: &MeetingId) -> Result<Option<Meeting>, DomainError>;

    /// Lists meetings scheduled inside the range, soonest first.
    async fn list(&self, range: &MeetingRange) -> Result<Vec<Meeting>, DomainError>;

    /// Deletes a meeting.
    ///
    /// # Errors
    ///
    /// - `MeetingNotFound` if the meeting doesn't exist
    async fn delete(&self, id: &MeetingId) -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meeting_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn MeetingRepository) {}
    }
}
