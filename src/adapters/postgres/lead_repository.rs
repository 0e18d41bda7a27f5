//! PostgreSQL implementation of LeadRepository.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{ClientId, DomainError, ErrorCode, LeadId, Timestamp};
use crate::domain::lead::{Lead, LeadDetails, LeadStatus};
use crate::ports::LeadRepository;

use super::col;

/// PostgreSQL implementation of LeadRepository.
#[derive(Clone)]
pub struct PostgresLeadRepository {
    pool: PgPool,
}

impl PostgresLeadRepository {
    /// Creates a new repository over the shared pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LeadRepository for PostgresLeadRepository {
    async fn save(&self, lead: &Lead) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO leads (
                id, name, email, phone, company, source, notes, status,
                converted_client_id, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(lead.id().as_uuid())
        .bind(lead.name())
        .bind(lead.email())
        .bind(lead.phone())
        .bind(lead.company())
        .bind(lead.source())
        .bind(lead.notes())
        .bind(status_to_str(lead.status()))
        .bind(lead.converted_client_id().map(|id| *id.as_uuid()))
        .bind(lead.created_at().as_datetime())
        .bind(lead.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to insert lead", e))?;

        Ok(())
    }

    async fn update(&self, lead: &Lead) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE leads SET
                name = $2, email = $3, phone = $4, company = $5, source = $6,
                notes = $7, status = $8, converted_client_id = $9, updated_at = $10
            WHERE id = $1
            "#,
        )
        .bind(lead.id().as_uuid())
        .bind(lead.name())
        .bind(lead.email())
        .bind(lead.phone())
        .bind(lead.company())
        .bind(lead.source())
        .bind(lead.notes())
        .bind(status_to_str(lead.status()))
        .bind(lead.converted_client_id().map(|id| *id.as_uuid()))
        .bind(lead.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to update lead", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::LeadNotFound,
                format!("Lead not found: {}", lead.id()),
            ));
        }
        Ok(())
    }

    async fn find_by_id(&self, id: &LeadId) -> Result<Option<Lead>, DomainError> {
        let row = sqlx::query("SELECT * FROM leads WHERE id = $1")
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to fetch lead", e))?;

        row.map(row_to_lead).transpose()
    }

    async fn list(&self) -> Result<Vec<Lead>, DomainError> {
        let rows = sqlx::query("SELECT * FROM leads ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to list leads", e))?;

        rows.into_iter().map(row_to_lead).collect()
    }

    async fn delete(&self, id: &LeadId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM leads WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to delete lead", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::LeadNotFound,
                format!("Lead not found: {}", id),
            ));
        }
        Ok(())
    }
}

fn status_to_str(status: LeadStatus) -> &'static str {
    match status {
        LeadStatus::New => "new",
        LeadStatus::Contacted => "contacted",
        LeadStatus::Qualified => "qualified",
        LeadStatus::Lost => "lost",
        LeadStatus::Converted => "converted",
    }
}

fn str_to_status(s: &str) -> Result<LeadStatus, DomainError> {
    match s {
        "new" => Ok(LeadStatus::New),
        "contacted" => Ok(LeadStatus::Contacted),
        "qualified" => Ok(LeadStatus::Qualified),
        "lost" => Ok(LeadStatus::Lost),
        "converted" => Ok(LeadStatus::Converted),
        _ => Err(DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid lead status: {}", s),
        )),
    }
}

fn row_to_lead(row: PgRow) -> Result<Lead, DomainError> {
    let status: String = col(&row, "status")?;
    let converted: Option<Uuid> = col(&row, "converted_client_id")?;
    Ok(Lead::reconstitute(
        LeadId::from_uuid(col(&row, "id")?),
        LeadDetails {
            name: col(&row, "name")?,
            email: col(&row, "email")?,
            phone: col(&row, "phone")?,
            company: col(&row, "company")?,
            source: col(&row, "source")?,
            notes: col(&row, "notes")?,
        },
        str_to_status(&status)?,
        converted.map(ClientId::from_uuid),
        Timestamp::from_datetime(col(&row, "created_at")?),
        Timestamp::from_datetime(col(&row, "updated_at")?),
    ))
}
