//! PostgreSQL implementation of TaskRepository.
//!
//! Board placements are applied inside a single transaction so the columns
//! can never be observed half-renumbered.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{DomainError, ErrorCode, MemberId, ProjectId, TaskId, Timestamp};
use crate::domain::project::{Task, TaskDetails, TaskKind, TaskPlacement, TaskStatus};
use crate::ports::TaskRepository;

use super::col;

/// PostgreSQL implementation of TaskRepository.
#[derive(Clone)]
pub struct PostgresTaskRepository {
    pool: PgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository over the shared pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn save(&self, task: &Task) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO tasks (
                id, project_id, title, description, kind, status, position,
                assignee_id, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(task.id().as_uuid())
        .bind(task.project_id().as_uuid())
        .bind(task.title())
        .bind(task.description())
        .bind(kind_to_str(task.kind()))
        .bind(status_to_str(task.status()))
        .bind(task.position())
        .bind(task.assignee().map(|id| *id.as_uuid()))
        .bind(task.created_at().as_datetime())
        .bind(task.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to insert task", e))?;

        Ok(())
    }

    async fn update(&self, task: &Task) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE tasks SET
                title = $2, description = $3, kind = $4, assignee_id = $5, updated_at = $6
            WHERE id = $1
            "#,
        )
        .bind(task.id().as_uuid())
        .bind(task.title())
        .bind(task.description())
        .bind(kind_to_str(task.kind()))
        .bind(task.assignee().map(|id| *id.as_uuid()))
        .bind(task.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to update task", e))?;

        if result.rows_affected() == 0 {
            return Err(task_not_found(task.id()));
        }
        Ok(())
    }

    async fn find_by_id(&self, id: &TaskId) -> Result<Option<Task>, DomainError> {
        let row = sqlx::query("SELECT * FROM tasks WHERE id = $1")
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to fetch task", e))?;

        row.map(row_to_task).transpose()
    }

    async fn list_by_project(&self, project_id: &ProjectId) -> Result<Vec<Task>, DomainError> {
        let rows = sqlx::query(
            "SELECT * FROM tasks WHERE project_id = $1 ORDER BY status, position, created_at",
        )
        .bind(project_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to list tasks", e))?;

        rows.into_iter().map(row_to_task).collect()
    }

    async fn count_in_column(
        &self,
        project_id: &ProjectId,
        status: TaskStatus,
    ) -> Result<i64, DomainError> {
        let result: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM tasks WHERE project_id = $1 AND status = $2",
        )
        .bind(project_id.as_uuid())
        .bind(status_to_str(status))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to count column tasks", e))?;

        Ok(result.0)
    }

    async fn apply_placements(
        &self,
        project_id: &ProjectId,
        placements: &[TaskPlacement],
    ) -> Result<(), DomainError> {
        if placements.is_empty() {
            return Ok(());
        }

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::database("Failed to begin board transaction", e))?;

        for placement in placements {
            sqlx::query(
                r#"
                UPDATE tasks SET status = $3, position = $4, updated_at = NOW()
                WHERE id = $1 AND project_id = $2
                "#,
            )
            .bind(placement.task_id.as_uuid())
            .bind(project_id.as_uuid())
            .bind(status_to_str(placement.status))
            .bind(placement.position)
            .execute(&mut *tx)
            .await
            .map_err(|e| DomainError::database("Failed to apply board placement", e))?;
        }

        tx.commit()
            .await
            .map_err(|e| DomainError::database("Failed to commit board transaction", e))?;
        Ok(())
    }

    async fn delete(&self, id: &TaskId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to delete task", e))?;

        if result.rows_affected() == 0 {
            return Err(task_not_found(id));
        }
        Ok(())
    }
}

fn task_not_found(id: &TaskId) -> DomainError {
    DomainError::new(ErrorCode::TaskNotFound, format!("Task not found: {}", id))
}

fn kind_to_str(kind: TaskKind) -> &'static str {
    match kind {
        TaskKind::Task => "task",
        TaskKind::Story => "story",
        TaskKind::Epic => "epic",
    }
}

fn str_to_kind(s: &str) -> Result<TaskKind, DomainError> {
    match s {
        "task" => Ok(TaskKind::Task),
        "story" => Ok(TaskKind::Story),
        "epic" => Ok(TaskKind::Epic),
        _ => Err(DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid task kind: {}", s),
        )),
    }
}

fn status_to_str(status: TaskStatus) -> &'static str {
    match status {
        TaskStatus::Backlog => "backlog",
        TaskStatus::Todo => "todo",
        TaskStatus::InProgress => "in_progress",
        TaskStatus::Review => "review",
        TaskStatus::Done => "done",
    }
}

fn str_to_status(s: &str) -> Result<TaskStatus, DomainError> {
    match s {
        "backlog" => Ok(TaskStatus::Backlog),
        "todo" => Ok(TaskStatus::Todo),
        "in_progress" => Ok(TaskStatus::InProgress),
        "review" => Ok(TaskStatus::Review),
        "done" => Ok(TaskStatus::Done),
        _ => Err(DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid task status: {}", s),
        )),
    }
}

fn row_to_task(row: PgRow) -> Result<Task, DomainError> {
    let kind: String = col(&row, "kind")?;
    let status: String = col(&row, "status")?;
    let assignee: Option<Uuid> = col(&row, "assignee_id")?;
    Ok(Task::reconstitute(
        TaskId::from_uuid(col(&row, "id")?),
        ProjectId::from_uuid(col(&row, "project_id")?),
        TaskDetails {
            title: col(&row, "title")?,
            description: col(&row, "description")?,
            kind: str_to_kind(&kind)?,
            assignee: assignee.map(MemberId::from_uuid),
        },
        str_to_status(&status)?,
        col(&row, "position")?,
        Timestamp::from_datetime(col(&row, "created_at")?),
        Timestamp::from_datetime(col(&row, "updated_at")?),
    ))
}
