//! Task repository port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ProjectId, TaskId};
use crate::domain::project::{Task, TaskPlacement};

/// Persistence contract for [`Task`] records and board reordering.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Saves a new task.
    async fn save(&self, task: &Task) -> Result<(), DomainError>;

    /// Updates an existing task's editable fields.
    ///
    /// # Errors
    ///
    /// - `TaskNotFound` if the task doesn't exist
    async fn update(&self, task: &Task) -> Result<(), DomainError>;

    /// Finds a task by id. Returns `None` if not found.
    async fn find_by_id(&self, id: &TaskId) -> Result<Option<Task>, DomainError>;

    /// Loads the full board of a project, ordered by column position.
    async fn list_by_project(&self, project_id: &ProjectId) -> Result<Vec<Task>, DomainError>;

    /// Counts tasks in one column, used to append new tasks at the bottom.
    async fn count_in_column(
        &self,
        project_id: &ProjectId,
        status: crate::domain::project::TaskStatus,
    ) -> Result<i64, DomainError>;

    /// Writes a set of board placements atomically.
    ///
    /// All rows change in one transaction so a half-applied drop can never
    /// be observed. Last write wins between concurrent movers.
    async fn apply_placements(
        &self,
        project_id: &ProjectId,
        placements: &[TaskPlacement],
    ) -> Result<(), DomainError>;

    /// Deletes a task.
    ///
    /// # Errors
    ///
    /// - `TaskNotFound` if the task doesn't exist
    async fn delete(&self, id: &TaskId) -> Result<(), DomainError>;
}
