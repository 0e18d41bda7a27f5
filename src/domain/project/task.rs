//! Task entity - one card on a project board.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    DomainError, MemberId, ProjectId, TaskId, Timestamp, ValidationError,
};

/// Granularity of a board card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskKind {
    Task,
    Story,
    Epic,
}

/// Board column a task sits in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Backlog,
    Todo,
    InProgress,
    Review,
    Done,
}

impl TaskStatus {
    /// All columns in board order.
    pub const ALL: [TaskStatus; 5] = [
        TaskStatus::Backlog,
        TaskStatus::Todo,
        TaskStatus::InProgress,
        TaskStatus::Review,
        TaskStatus::Done,
    ];
}

/// Editable task fields.
#[derive(Debug, Clone)]
pub struct TaskDetails {
    pub title: String,
    pub description: Option<String>,
    pub kind: TaskKind,
    pub assignee: Option<MemberId>,
}

/// Task record.
///
/// # Invariants
///
/// - `title` is non-empty
/// - `position` is the zero-based index within the (project, status) column;
///   columns are renumbered contiguously on every move
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    project_id: ProjectId,
    title: String,
    description: Option<String>,
    kind: TaskKind,
    status: TaskStatus,
    position: i32,
    assignee: Option<MemberId>,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Task {
    /// Creates a new task at the given column position.
    pub fn new(
        id: TaskId,
        project_id: ProjectId,
        details: TaskDetails,
        status: TaskStatus,
        position: i32,
    ) -> Result<Self, DomainError> {
        validate_details(&details)?;
        let now = Timestamp::now();
        Ok(Self {
            id,
            project_id,
            title: details.title,
            description: details.description,
            kind: details.kind,
            status,
            position: position.max(0),
            assignee: details.assignee,
            created_at: now,
            updated_at: now,
        })
    }

    /// Reconstitutes a task from persistence (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: TaskId,
        project_id: ProjectId,
        details: TaskDetails,
        status: TaskStatus,
        position: i32,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            project_id,
            title: details.title,
            description: details.description,
            kind: details.kind,
            status,
            position,
            assignee: details.assignee,
            created_at,
            updated_at,
        }
    }

    /// Replaces the editable fields. Column and position change via the board.
    pub fn update(&mut self, details: TaskDetails) -> Result<(), DomainError> {
        validate_details(&details)?;
        self.title = details.title;
        self.description = details.description;
        self.kind = details.kind;
        self.assignee = details.assignee;
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Places the task in a column at a position. Called by the board planner.
    pub fn place(&mut self, status: TaskStatus, position: i32) {
        self.status = status;
        self.position = position;
        self.updated_at = Timestamp::now();
    }

    pub fn id(&self) -> &TaskId {
        &self.id
    }

    pub fn project_id(&self) -> &ProjectId {
        &self.project_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn kind(&self) -> TaskKind {
        self.kind
    }

    pub fn status(&self) -> TaskStatus {
        self.status
    }

    pub fn position(&self) -> i32 {
        self.position
    }

    pub fn assignee(&self) -> Option<&MemberId> {
        self.assignee.as_ref()
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }
}

fn validate_details(details: &TaskDetails) -> Result<(), DomainError> {
    if details.title.trim().is_empty() {
        return Err(ValidationError::empty_field("title").into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ErrorCode;

    fn details(title: &str) -> TaskDetails {
        TaskDetails {
            title: title.to_string(),
            description: None,
            kind: TaskKind::Task,
            assignee: None,
        }
    }

    #[test]
    fn new_task_clamps_negative_position() {
        let task = Task::new(
            TaskId::new(),
            ProjectId::new(),
            details("Write copy"),
            TaskStatus::Backlog,
            -3,
        )
        .unwrap();
        assert_eq!(task.position(), 0);
    }

    #[test]
    fn rejects_blank_title() {
        let err = Task::new(
            TaskId::new(),
            ProjectId::new(),
            details("  "),
            TaskStatus::Todo,
            0,
        )
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::EmptyField);
    }

    #[test]
    fn place_moves_column_and_position() {
        let mut task = Task::new(
            TaskId::new(),
            ProjectId::new(),
            details("Review PR"),
            TaskStatus::Todo,
            2,
        )
        .unwrap();

        task.place(TaskStatus::InProgress, 0);
        assert_eq!(task.status(), TaskStatus::InProgress);
        assert_eq!(task.position(), 0);
    }
}
