//! Kanban move planning.
//!
//! The drag-and-drop endpoint receives "put task X into column S at index N".
//! Planning is pure: given the current board, it produces the full set of
//! placements that keep every affected column numbered contiguously from 0.
//! The adapter persists the placements in one transaction; concurrent movers
//! are last-write-wins.

use std::collections::HashMap;

use crate::domain::foundation::{DomainError, ErrorCode, TaskId};
use crate::domain::project::{Task, TaskStatus};

/// A (task, column, index) assignment produced by [`plan_move`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskPlacement {
    pub task_id: TaskId,
    pub status: TaskStatus,
    pub position: i32,
}

/// Plans moving `task_id` to `to_status` at `to_position`.
///
/// `tasks` must be the full board of the task's project. The target index is
/// clamped to the destination column length. Returns placements only for
/// tasks whose column or position actually changes; an empty vec means the
/// drop was a no-op.
///
/// # Errors
///
/// - `TaskNotFound` if `task_id` is not on the board
pub fn plan_move(
    tasks: &[Task],
    task_id: &TaskId,
    to_status: TaskStatus,
    to_position: i32,
) -> Result<Vec<TaskPlacement>, DomainError> {
    let moved = tasks
        .iter()
        .find(|t| t.id() == task_id)
        .ok_or_else(|| {
            DomainError::new(ErrorCode::TaskNotFound, format!("Task not found: {}", task_id))
        })?;
    let from_status = moved.status();

    let mut columns: HashMap<TaskStatus, Vec<&Task>> = HashMap::new();
    for task in tasks {
        columns.entry(task.status()).or_default().push(task);
    }
    for column in columns.values_mut() {
        // Stable tiebreak keeps insertion order deterministic when positions
        // collide (e.g. rows created before any reorder ran).
        column.sort_by_key(|t| (t.position(), *t.created_at()));
    }

    let mut source: Vec<&Task> = columns.remove(&from_status).unwrap_or_default();
    source.retain(|t| t.id() != task_id);

    let mut destination: Vec<&Task> = if to_status == from_status {
        std::mem::take(&mut source)
    } else {
        columns.remove(&to_status).unwrap_or_default()
    };

    let index = (to_position.max(0) as usize).min(destination.len());
    destination.insert(index, moved);

    let mut placements = Vec::new();
    collect_changes(&mut placements, &destination, to_status);
    if to_status != from_status {
        collect_changes(&mut placements, &source, from_status);
    }
    Ok(placements)
}

fn collect_changes(placements: &mut Vec<TaskPlacement>, column: &[&Task], status: TaskStatus) {
    for (index, task) in column.iter().enumerate() {
        let position = index as i32;
        if task.status() != status || task.position() != position {
            placements.push(TaskPlacement {
                task_id: *task.id(),
                status,
                position,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ProjectId;
    use crate::domain::project::{TaskDetails, TaskKind};

    fn task(project: &ProjectId, title: &str, status: TaskStatus, position: i32) -> Task {
        Task::new(
            TaskId::new(),
            *project,
            TaskDetails {
                title: title.to_string(),
                description: None,
                kind: TaskKind::Task,
                assignee: None,
            },
            status,
            position,
        )
        .unwrap()
    }

    fn positions(placements: &[TaskPlacement], id: &TaskId) -> Option<(TaskStatus, i32)> {
        placements
            .iter()
            .find(|p| &p.task_id == id)
            .map(|p| (p.status, p.position))
    }

    #[test]
    fn move_across_columns_renumbers_both() {
        let project = ProjectId::new();
        let a = task(&project, "a", TaskStatus::Todo, 0);
        let b = task(&project, "b", TaskStatus::Todo, 1);
        let c = task(&project, "c", TaskStatus::InProgress, 0);
        let board = vec![a.clone(), b.clone(), c.clone()];

        let placements = plan_move(&board, a.id(), TaskStatus::InProgress, 0).unwrap();

        // a lands at the top of in_progress, c shifts down, b closes the gap.
        assert_eq!(positions(&placements, a.id()), Some((TaskStatus::InProgress, 0)));
        assert_eq!(positions(&placements, c.id()), Some((TaskStatus::InProgress, 1)));
        assert_eq!(positions(&placements, b.id()), Some((TaskStatus::Todo, 0)));
    }

    #[test]
    fn move_within_column_reorders_without_loss() {
        let project = ProjectId::new();
        let a = task(&project, "a", TaskStatus::Todo, 0);
        let b = task(&project, "b", TaskStatus::Todo, 1);
        let c = task(&project, "c", TaskStatus::Todo, 2);
        let board = vec![a.clone(), b.clone(), c.clone()];

        let placements = plan_move(&board, c.id(), TaskStatus::Todo, 0).unwrap();

        assert_eq!(positions(&placements, c.id()), Some((TaskStatus::Todo, 0)));
        assert_eq!(positions(&placements, a.id()), Some((TaskStatus::Todo, 1)));
        assert_eq!(positions(&placements, b.id()), Some((TaskStatus::Todo, 2)));
    }

    #[test]
    fn target_position_is_clamped_to_column_length() {
        let project = ProjectId::new();
        let a = task(&project, "a", TaskStatus::Todo, 0);
        let b = task(&project, "b", TaskStatus::Done, 0);
        let board = vec![a.clone(), b.clone()];

        let placements = plan_move(&board, a.id(), TaskStatus::Done, 99).unwrap();
        assert_eq!(positions(&placements, a.id()), Some((TaskStatus::Done, 1)));
        // b already sits at done/0, nothing to rewrite for it.
        assert_eq!(positions(&placements, b.id()), None);
    }

    #[test]
    fn dropping_in_place_is_a_no_op() {
        let project = ProjectId::new();
        let a = task(&project, "a", TaskStatus::Todo, 0);
        let b = task(&project, "b", TaskStatus::Todo, 1);
        let board = vec![a.clone(), b];

        let placements = plan_move(&board, a.id(), TaskStatus::Todo, 0).unwrap();
        assert!(placements.is_empty());
    }

    #[test]
    fn gaps_in_stored_positions_are_compacted() {
        let project = ProjectId::new();
        // Positions 3 and 7: stale numbering from deleted rows.
        let a = task(&project, "a", TaskStatus::Todo, 3);
        let b = task(&project, "b", TaskStatus::Todo, 7);
        let board = vec![a.clone(), b.clone()];

        let placements = plan_move(&board, b.id(), TaskStatus::Todo, 0).unwrap();
        assert_eq!(positions(&placements, b.id()), Some((TaskStatus::Todo, 0)));
        assert_eq!(positions(&placements, a.id()), Some((TaskStatus::Todo, 1)));
    }

    #[test]
    fn unknown_task_is_an_error() {
        let project = ProjectId::new();
        let board = vec![task(&project, "a", TaskStatus::Todo, 0)];
        let err = plan_move(&board, &TaskId::new(), TaskStatus::Todo, 0).unwrap_err();
        assert_eq!(err.code, ErrorCode::TaskNotFound);
    }
}
