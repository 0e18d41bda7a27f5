//! PostgreSQL implementation of ClientRepository.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;

use crate::domain::client::Client;
use crate::domain::foundation::{ClientId, DomainError, ErrorCode, Timestamp};
use crate::ports::ClientRepository;

use super::col;

/// PostgreSQL implementation of ClientRepository.
#[derive(Clone)]
pub struct PostgresClientRepository {
    pool: PgPool,
}

impl PostgresClientRepository {
    /// Creates a new repository over the shared pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ClientRepository for PostgresClientRepository {
    async fn save(&self, client: &Client) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO clients (id, name, email, phone, company, notes, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(client.id().as_uuid())
        .bind(client.name())
        .bind(client.email())
        .bind(client.phone())
        .bind(client.company())
        .bind(client.notes())
        .bind(client.created_at().as_datetime())
        .bind(client.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to insert client", e))?;

        Ok(())
    }

    async fn update(&self, client: &Client) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE clients SET
                name = $2, email = $3, phone = $4, company = $5, notes = $6, updated_at = $7
            WHERE id = $1
            "#,
        )
        .bind(client.id().as_uuid())
        .bind(client.name())
        .bind(client.email())
        .bind(client.phone())
        .bind(client.company())
        .bind(client.notes())
        .bind(client.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to update client", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::ClientNotFound,
                format!("Client not found: {}", client.id()),
            ));
        }
        Ok(())
    }

    async fn find_by_id(&self, id: &ClientId) -> Result<Option<Client>, DomainError> {
        let row = sqlx::query("SELECT * FROM clients WHERE id = $1")
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to fetch client", e))?;

        row.map(row_to_client).transpose()
    }

    async fn list(&self) -> Result<Vec<Client>, DomainError> {
        let rows = sqlx::query("SELECT * FROM clients ORDER BY name ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to list clients", e))?;

        rows.into_iter().map(row_to_client).collect()
    }

    async fn delete(&self, id: &ClientId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM clients WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to delete client", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::ClientNotFound,
                format!("Client not found: {}", id),
            ));
        }
        Ok(())
    }
}

fn row_to_client(row: PgRow) -> Result<Client, DomainError> {
    Ok(Client::reconstitute(
        ClientId::from_uuid(col(&row, "id")?),
        col(&row, "name")?,
        col(&row, "email")?,
        col(&row, "phone")?,
        col(&row, "company")?,
        col(&row, "notes")?,
        Timestamp::from_datetime(col(&row, "created_at")?),
        Timestamp::from_datetime(col(&row, "updated_at")?),
    ))
}
