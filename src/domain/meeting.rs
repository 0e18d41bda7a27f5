//! Meeting aggregate - a scheduled appointment, optionally tied to a client
//! or project.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    ClientId, DomainError, MeetingId, ProjectId, Timestamp, ValidationError,
};

/// Longest meeting the scheduler accepts, in minutes (one day).
pub const MAX_DURATION_MINUTES: i32 = 1440;

/// Editable meeting fields.
#[derive(Debug, Clone)]
pub struct MeetingDetails {
    pub title: String,
    pub scheduled_at: Timestamp,
    pub duration_minutes: i32,
    pub client_id: Option<ClientId>,
    pub project_id: Option<ProjectId>,
    pub location: Option<String>,
    pub notes: Option<String>,
}

/// Meeting record.
///
/// # Invariants
///
/// - `title` is non-empty
/// - `duration_minutes` is in (0, 1440]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meeting {
    id: MeetingId,
    title: String,
    scheduled_at: Timestamp,
    duration_minutes: i32,
    client_id: Option<ClientId>,
    project_id: Option<ProjectId>,
    location: Option<String>,
    notes: Option<String>,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Meeting {
    /// Creates a new meeting.
    pub fn new(id: MeetingId, details: MeetingDetails) -> Result<Self, DomainError> {
        validate_details(&details)?;
        let now = Timestamp::now();
        Ok(Self {
            id,
            title: details.title,
            scheduled_at: details.scheduled_at,
            duration_minutes: details.duration_minutes,
            client_id: details.client_id,
            project_id: details.project_id,
            location: details.location,
            notes: details.notes,
            created_at: now,
            updated_at: now,
        })
    }

    /// Reconstitutes a meeting from persistence (no validation).
    pub fn reconstitute(
        id: MeetingId,
        details: MeetingDetails,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            title: details.title,
            scheduled_at: details.scheduled_at,
            duration_minutes: details.duration_minutes,
            client_id: details.client_id,
            project_id: details.project_id,
            location: details.location,
            notes: details.notes,
            created_at,
            updated_at,
        }
    }

    /// Replaces the editable fields.
    pub fn update(&mut self, details: MeetingDetails) -> Result<(), DomainError> {
        validate_details(&details)?;
        self.title = details.title;
        self.scheduled_at = details.scheduled_at;
        self.duration_minutes = details.duration_minutes;
        self.client_id = details.client_id;
        self.project_id = details.project_id;
        self.location = details.location;
        self.notes = details.notes;
        self.updated_at = Timestamp::now();
        Ok(())
    }

    pub fn id(&self) -> &MeetingId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn scheduled_at(&self) -> &Timestamp {
        &self.scheduled_at
    }

    pub fn duration_minutes(&self) -> i32 {
        self.duration_minutes
    }

    pub fn client_id(&self) -> Option<&ClientId> {
        self.client_id.as_ref()
    }

    pub fn project_id(&self) -> Option<&ProjectId> {
        self.project_id.as_ref()
    }

    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }
}

fn validate_details(details: &MeetingDetails) -> Result<(), DomainError> {
    if details.title.trim().is_empty() {
        return Err(ValidationError::empty_field("title").into());
    }
    if details.duration_minutes <= 0 || details.duration_minutes > MAX_DURATION_MINUTES {
        return Err(ValidationError::out_of_range(
            "duration_minutes",
            1,
            MAX_DURATION_MINUTES as i64,
            details.duration_minutes as i64,
        )
        .into());
    }
    Ok(())
}
