//! Data transfer objects for meeting endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ClientId, MeetingId, ProjectId, Timestamp};
use crate::domain::meeting::{Meeting, MeetingDetails};
use crate::ports::MeetingRange;

/// Create/update payload.
#[derive(Debug, Clone, Deserialize)]
pub struct MeetingPayload {
    pub title: String,
    pub scheduled_at: Timestamp,
    pub duration_minutes: i32,
    #[serde(default)]
    pub client_id: Option<ClientId>,
    #[serde(default)]
    pub project_id: Option<ProjectId>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl MeetingPayload {
    pub fn into_details(self) -> MeetingDetails {
        MeetingDetails {
            title: self.title,
            scheduled_at: self.scheduled_at,
            duration_minutes: self.duration_minutes,
            client_id: self.client_id,
            project_id: self.project_id,
            location: self.location,
            notes: self.notes,
        }
    }
}

/// `?from=&to=` window for the list endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListMeetingsQuery {
    #[serde(default)]
    pub from: Option<Timestamp>,
    #[serde(default)]
    pub to: Option<Timestamp>,
}

impl ListMeetingsQuery {
    pub fn into_range(self) -> MeetingRange {
        MeetingRange {
            from: self.from,
            to: self.to,
        }
    }
}

/// Meeting as returned by the API.
#[derive(Debug, Clone, Serialize)]
pub struct MeetingResponse {
    pub id: MeetingId,
    pub title: String,
    pub scheduled_at: Timestamp,
    pub duration_minutes: i32,
    pub client_id: Option<ClientId>,
    pub project_id: Option<ProjectId>,
    pub location: Option<String>,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<&Meeting> for MeetingResponse {
    fn from(meeting: &Meeting) -> Self {
        Self {
            id: *meeting.id(),
            title: meeting.title().to_string(),
            scheduled_at: *meeting.scheduled_at(),
            duration_minutes: meeting.duration_minutes(),
            client_id: meeting.client_id().copied(),
            project_id: meeting.project_id().copied(),
            location: meeting.location().map(String::from),
            notes: meeting.notes().map(String::from),
            created_at: *meeting.created_at(),
            updated_at: *meeting.updated_at(),
        }
    }
}
