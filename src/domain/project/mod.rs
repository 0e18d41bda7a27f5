//! Project aggregate and its task board.
//!
//! A project is either client-facing (tied to a [`crate::domain::client::Client`])
//! or internal. Both kinds carry a kanban board of tasks; `board` holds the
//! pure reordering logic behind the drag-and-drop move endpoint.

mod board;
mod project;
mod task;

pub use board::{plan_move, TaskPlacement};
pub use project::{Project, ProjectDetails, ProjectKind, ProjectStatus};
pub use task::{Task, TaskDetails, TaskKind, TaskStatus};
