//! PostgreSQL implementation of MeetingRepository.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, QueryBuilder};
use uuid::Uuid;

use crate::domain::foundation::{ClientId, DomainError, ErrorCode, MeetingId, ProjectId, Timestamp};
use crate::domain::meeting::{Meeting, MeetingDetails};
use crate::ports::{MeetingRange, MeetingRepository};

use super::col;

/// PostgreSQL implementation of MeetingRepository.
#[derive(Clone)]
pub struct PostgresMeetingRepository {
    pool: PgPool,
}

impl PostgresMeetingRepository {
    /// Creates a new repository over the shared pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MeetingRepository for PostgresMeetingRepository {
    async fn save(&self, meeting: &Meeting) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO meetings (
                id, title, scheduled_at, duration_minutes, client_id, project_id,
                location, notes, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(meeting.id().as_uuid())
        .bind(meeting.title())
        .bind(meeting.scheduled_at().as_datetime())
        .bind(meeting.duration_minutes())
        .bind(meeting.client_id().map(|id| *id.as_uuid()))
        .bind(meeting.project_id().map(|id| *id.as_uuid()))
        .bind(meeting.location())
        .bind(meeting.notes())
        .bind(meeting.created_at().as_datetime())
        .bind(meeting.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to insert meeting", e))?;

        Ok(())
    }

    async fn update(&self, meeting: &Meeting) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE meetings SET
                title = $2, scheduled_at = $3, duration_minutes = $4, client_id = $5,
                project_id = $6, location = $7, notes = $8, updated_at = $9
            WHERE id = $1
            "#,
        )
        .bind(meeting.id().as_uuid())
        .bind(meeting.title())
        .bind(meeting.scheduled_at().as_datetime())
        .bind(meeting.duration_minutes())
        .bind(meeting.client_id().map(|id| *id.as_uuid()))
        .bind(meeting.project_id().map(|id| *id.as_uuid()))
        .bind(meeting.location())
        .bind(meeting.notes())
        .bind(meeting.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to update meeting", e))?;

        if result.rows_affected() == 0 {
            return Err(meeting_not_found(meeting.id()));
        }
        Ok(())
    }

    async fn find_by_id(&self, id: &MeetingId) -> Result<Option<Meeting>, DomainError> {
        let row = sqlx::query("SELECT * FROM meetings WHERE id = $1")
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to fetch meeting", e))?;

        row.map(row_to_meeting).transpose()
    }

    async fn list(&self, range: &MeetingRange) -> Result<Vec<Meeting>, DomainError> {
        let mut builder: QueryBuilder<sqlx::Postgres> =
            QueryBuilder::new("SELECT * FROM meetings WHERE 1 = 1");

        if let Some(from) = &range.from {
            builder.push(" AND scheduled_at >= ");
            builder.push_bind(*from.as_datetime());
        }
        if let Some(to) = &range.to {
            builder.push(" AND scheduled_at <= ");
            builder.push_bind(*to.as_datetime());
        }
        builder.push(" ORDER BY scheduled_at ASC");

        let rows = builder
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to list meetings", e))?;

        rows.into_iter().map(row_to_meeting).collect()
    }

    async fn delete(&self, id: &MeetingId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM meetings WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to delete meeting", e))?;

        if result.rows_affected() == 0 {
            return Err(meeting_not_found(id));
        }
        Ok(())
    }
}

fn meeting_not_found(id: &MeetingId) -> DomainError {
    DomainError::new(ErrorCode::MeetingNotFound, format!("Meeting not found: {}", id))
}

fn row_to_meeting(row: PgRow) -> Result<Meeting, DomainError> {
    let client_id: Option<Uuid> = col(&row, "client_id")?;
    let project_id: Option<Uuid> = col(&row, "project_id")?;
    Ok(Meeting::reconstitute(
        MeetingId::from_uuid(col(&row, "id")?),
        MeetingDetails {
            title: col(&row, "title")?,
            scheduled_at: Timestamp::from_datetime(col(&row, "scheduled_at")?),
            duration_minutes: col(&row, "duration_minutes")?,
            client_id: client_id.map(ClientId::from_uuid),
            project_id: project_id.map(ProjectId::from_uuid),
            location: col(&row, "location")?,
            notes: col(&row, "notes")?,
        },
        Timestamp::from_datetime(col(&row, "created_at")?),
        Timestamp::from_datetime(col(&row, "updated_at")?),
    ))
}
