//! Data transfer objects for project and board endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ClientId, MemberId, ProjectId, TaskId, Timestamp};
use crate::domain::project::{
    Project, ProjectDetails, ProjectKind, ProjectStatus, Task, TaskDetails, TaskKind, TaskStatus,
};

/// Create payload. `client_id` is required for client projects and must be
/// absent for internal ones.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProjectRequest {
    pub kind: ProjectKind,
    #[serde(default)]
    pub client_id: Option<ClientId>,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Update payload. Kind and client link are fixed at creation.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateProjectRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub status: ProjectStatus,
    pub worked_hours: f64,
}

impl UpdateProjectRequest {
    pub fn into_details(self) -> ProjectDetails {
        ProjectDetails {
            name: self.name,
            description: self.description,
            status: self.status,
            worked_hours: self.worked_hours,
        }
    }
}

/// Optional `?kind=` filter for the list endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListProjectsQuery {
    #[serde(default)]
    pub kind: Option<ProjectKind>,
}

/// Project as returned by the API.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectResponse {
    pub id: ProjectId,
    pub kind: ProjectKind,
    pub client_id: Option<ClientId>,
    pub name: String,
    pub description: Option<String>,
    pub status: ProjectStatus,
    pub worked_hours: f64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<&Project> for ProjectResponse {
    fn from(project: &Project) -> Self {
        Self {
            id: *project.id(),
            kind: project.kind(),
            client_id: project.client_id().copied(),
            name: project.name().to_string(),
            description: project.description().map(String::from),
            status: project.status(),
            worked_hours: project.worked_hours(),
            created_at: *project.created_at(),
            updated_at: *project.updated_at(),
        }
    }
}

/// Create payload for a board card. New cards land at the bottom of their
/// column; `status` defaults to the backlog.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTaskRequest {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_task_kind")]
    pub kind: TaskKind,
    #[serde(default = "default_task_status")]
    pub status: TaskStatus,
    #[serde(default)]
    pub assignee_id: Option<MemberId>,
}

fn default_task_kind() -> TaskKind {
    TaskKind::Task
}

fn default_task_status() -> TaskStatus {
    TaskStatus::Backlog
}

/// Update payload for a card's content. Column and position are changed
/// through the move endpoint only.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateTaskRequest {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub kind: TaskKind,
    #[serde(default)]
    pub assignee_id: Option<MemberId>,
}

impl UpdateTaskRequest {
    pub fn into_details(self) -> TaskDetails {
        TaskDetails {
            title: self.title,
            description: self.description,
            kind: self.kind,
            assignee: self.assignee_id,
        }
    }
}

/// The drag-and-drop payload: target column and zero-based index.
#[derive(Debug, Clone, Deserialize)]
pub struct MoveTaskRequest {
    pub status: TaskStatus,
    pub position: i32,
}

/// Task as returned by the API.
#[derive(Debug, Clone, Serialize)]
pub struct TaskResponse {
    pub id: TaskId,
    pub project_id: ProjectId,
    pub title: String,
    pub description: Option<String>,
    pub kind: TaskKind,
    pub status: TaskStatus,
    pub position: i32,
    pub assignee_id: Option<MemberId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<&Task> for TaskResponse {
    fn from(task: &Task) -> Self {
        Self {
            id: *task.id(),
            project_id: *task.project_id(),
            title: task.title().to_string(),
            description: task.description().map(String::from),
            kind: task.kind(),
            status: task.status(),
            position: task.position(),
            assignee_id: task.assignee().copied(),
            created_at: *task.created_at(),
            updated_at: *task.updated_at(),
        }
    }
}
