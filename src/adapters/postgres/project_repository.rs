//! PostgreSQL implementation of ProjectRepository.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{ClientId, DomainError, ErrorCode, ProjectId, Timestamp};
use crate::domain::project::{Project, ProjectKind, ProjectStatus};
use crate::ports::ProjectRepository;

use super::col;

/// PostgreSQL implementation of ProjectRepository.
#[derive(Clone)]
pub struct PostgresProjectRepository {
    pool: PgPool,
}

impl PostgresProjectRepository {
    /// Creates a new repository over the shared pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProjectRepository for PostgresProjectRepository {
    async fn save(&self, project: &Project) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO projects (
                id, kind, client_id, name, description, status, worked_hours,
                created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(project.id().as_uuid())
        .bind(kind_to_str(project.kind()))
        .bind(project.client_id().map(|id| *id.as_uuid()))
        .bind(project.name())
        .bind(project.description())
        .bind(status_to_str(project.status()))
        .bind(project.worked_hours())
        .bind(project.created_at().as_datetime())
        .bind(project.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to insert project", e))?;

        Ok(())
    }

    async fn update(&self, project: &Project) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE projects SET
                name = $2, description = $3, status = $4, worked_hours = $5, updated_at = $6
            WHERE id = $1
            "#,
        )
        .bind(project.id().as_uuid())
        .bind(project.name())
        .bind(project.description())
        .bind(status_to_str(project.status()))
        .bind(project.worked_hours())
        .bind(project.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to update project", e))?;

        if result.rows_affected() == 0 {
            return Err(project_not_found(project.id()));
        }
        Ok(())
    }

    async fn find_by_id(&self, id: &ProjectId) -> Result<Option<Project>, DomainError> {
        let row = sqlx::query("SELECT * FROM projects WHERE id = $1")
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to fetch project", e))?;

        row.map(row_to_project).transpose()
    }

    async fn list(&self, kind: Option<ProjectKind>) -> Result<Vec<Project>, DomainError> {
        let rows = match kind {
            Some(kind) => {
                sqlx::query("SELECT * FROM projects WHERE kind = $1 ORDER BY created_at DESC")
                    .bind(kind_to_str(kind))
                    .fetch_all(&self.pool)
                    .await
            }
            None => {
                sqlx::query("SELECT * FROM projects ORDER BY created_at DESC")
                    .fetch_all(&self.pool)
                    .await
            }
        }
        .map_err(|e| DomainError::database("Failed to list projects", e))?;

        rows.into_iter().map(row_to_project).collect()
    }

    async fn delete(&self, id: &ProjectId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to delete project", e))?;

        if result.rows_affected() == 0 {
            return Err(project_not_found(id));
        }
        Ok(())
    }
}

fn project_not_found(id: &ProjectId) -> DomainError {
    DomainError::new(ErrorCode::ProjectNotFound, format!("Project not found: {}", id))
}

fn kind_to_str(kind: ProjectKind) -> &'static str {
    match kind {
        ProjectKind::Client => "client",
        ProjectKind::Internal => "internal",
    }
}

fn str_to_kind(s: &str) -> Result<ProjectKind, DomainError> {
    match s {
        "client" => Ok(ProjectKind::Client),
        "internal" => Ok(ProjectKind::Internal),
        _ => Err(DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid project kind: {}", s),
        )),
    }
}

fn status_to_str(status: ProjectStatus) -> &'static str {
    match status {
        ProjectStatus::Planning => "planning",
        ProjectStatus::Active => "active",
        ProjectStatus::Paused => "paused",
        ProjectStatus::Done => "done",
        ProjectStatus::Cancelled => "cancelled",
    }
}

fn str_to_status(s: &str) -> Result<ProjectStatus, DomainError> {
    match s {
        "planning" => Ok(ProjectStatus::Planning),
        "active" => Ok(ProjectStatus::Active),
        "paused" => Ok(ProjectStatus::Paused),
        "done" => Ok(ProjectStatus::Done),
        "cancelled" => Ok(ProjectStatus::Cancelled),
        _ => Err(DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid project status: {}", s),
        )),
    }
}

fn row_to_project(row: PgRow) -> Result<Project, DomainError> {
    let kind: String = col(&row, "kind")?;
    let status: String = col(&row, "status")?;
    let client_id: Option<Uuid> = col(&row, "client_id")?;
    Ok(Project::reconstitute(
        ProjectId::from_uuid(col(&row, "id")?),
        str_to_kind(&kind)?,
        client_id.map(ClientId::from_uuid),
        col(&row, "name")?,
        col(&row, "description")?,
        str_to_status(&status)?,
        col(&row, "worked_hours")?,
        Timestamp::from_datetime(col(&row, "created_at")?),
        Timestamp::from_datetime(col(&row, "updated_at")?),
    ))
}
