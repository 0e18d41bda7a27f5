//! Project repository port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ProjectId};
use crate::domain::project::{Project, ProjectKind};

/// Persistence contract for [`Project`] records.
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// Saves a new project.
    async fn save(&self, project: &Project) -> Result<(), DomainError>;

    /// Updates an existing project.
    ///
    /// # Errors
    ///
    /// - `ProjectNotFound` if the project doesn't exist
    async fn update(&self, project: &Project) -> Result<(), DomainError>;

    /// Finds a project by id. Returns `None` if not found.
    async fn find_by_id(&self, id: &ProjectId) -> Result<Option<Project>, DomainError>;

    /// Lists projects, optionally filtered by kind, newest first.
    async fn list(&self, kind: Option<ProjectKind>) -> Result<Vec<Project>, DomainError>;

    /// Deletes a project and its tasks.
    ///
    /// # Errors
    ///
    /// - `ProjectNotFound` if the project doesn't exist
    async fn delete(&self, id: &ProjectId) -> Result<(), DomainError>;
}
