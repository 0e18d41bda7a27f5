//! Router for project and board endpoints.

use axum::routing::{get, post, put};
use axum::Router;

use super::super::state::AppState;
use super::handlers::{
    create_project, create_task, delete_project, delete_task, get_project, list_projects,
    list_tasks, move_task, update_project, update_task,
};

/// Routes mounted at `/api/projects`. The board lives under each project.
pub fn project_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_projects).post(create_project))
        .route(
            "/:id",
            get(get_project).put(update_project).delete(delete_project),
        )
        .route("/:id/tasks", get(list_tasks).post(create_task))
        .route(
            "/:id/tasks/:task_id",
            put(update_task).delete(delete_task),
        )
        .route("/:id/tasks/:task_id/move", post(move_task))
}
