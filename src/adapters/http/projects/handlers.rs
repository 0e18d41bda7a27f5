//! HTTP handlers for project and board endpoints.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;

use crate::domain::foundation::{DomainError, ErrorCode, ProjectId, TaskId};
use crate::domain::project::{plan_move, Project, Task, TaskDetails};

use super::super::error::ApiResult;
use super::super::middleware::RequireAuth;
use super::super::state::AppState;
use super::dto::{
    CreateProjectRequest, CreateTaskRequest, ListProjectsQuery, MoveTaskRequest, ProjectResponse,
    TaskResponse, UpdateProjectRequest, UpdateTaskRequest,
};

pub async fn list_projects(
    State(state): State<AppState>,
    RequireAuth(_member): RequireAuth,
    Query(query): Query<ListProjectsQuery>,
) -> ApiResult<Json<Vec<ProjectResponse>>> {
    let projects = state.projects.list(query.kind).await?;
    Ok(Json(projects.iter().map(ProjectResponse::from).collect()))
}

pub async fn create_project(
    State(state): State<AppState>,
    RequireAuth(_member): RequireAuth,
    Json(payload): Json<CreateProjectRequest>,
) -> ApiResult<(StatusCode, Json<ProjectResponse>)> {
    let project = Project::new(
        ProjectId::new(),
        payload.kind,
        payload.client_id,
        payload.name,
        payload.description,
    )?;
    state.projects.save(&project).await?;
    Ok((StatusCode::CREATED, Json(ProjectResponse::from(&project))))
}

pub async fn get_project(
    State(state): State<AppState>,
    RequireAuth(_member): RequireAuth,
    Path(id): Path<ProjectId>,
) -> ApiResult<Json<ProjectResponse>> {
    let project = find_project(&state, &id).await?;
    Ok(Json(ProjectResponse::from(&project)))
}

pub async fn update_project(
    State(state): State<AppState>,
    RequireAuth(_member): RequireAuth,
    Path(id): Path<ProjectId>,
    Json(payload): Json<UpdateProjectRequest>,
) -> ApiResult<Json<ProjectResponse>> {
    let mut project = find_project(&state, &id).await?;
    project.update(payload.into_details())?;
    state.projects.update(&project).await?;
    Ok(Json(ProjectResponse::from(&project)))
}

pub async fn delete_project(
    State(state): State<AppState>,
    RequireAuth(_member): RequireAuth,
    Path(id): Path<ProjectId>,
) -> ApiResult<StatusCode> {
    state.projects.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_tasks(
    State(state): State<AppState>,
    RequireAuth(_member): RequireAuth,
    Path(project_id): Path<ProjectId>,
) -> ApiResult<Json<Vec<TaskResponse>>> {
    find_project(&state, &project_id).await?;
    let tasks = state.tasks.list_by_project(&project_id).await?;
    Ok(Json(tasks.iter().map(TaskResponse::from).collect()))
}

/// Creates a card at the bottom of its column.
pub async fn create_task(
    State(state): State<AppState>,
    RequireAuth(_member): RequireAuth,
    Path(project_id): Path<ProjectId>,
    Json(payload): Json<CreateTaskRequest>,
) -> ApiResult<(StatusCode, Json<TaskResponse>)> {
    find_project(&state, &project_id).await?;

    let position = state
        .tasks
        .count_in_column(&project_id, payload.status)
        .await? as i32;

    let task = Task::new(
        TaskId::new(),
        project_id,
        TaskDetails {
            title: payload.title,
            description: payload.description,
            kind: payload.kind,
            assignee: payload.assignee_id,
        },
        payload.status,
        position,
    )?;
    state.tasks.save(&task).await?;
    Ok((StatusCode::CREATED, Json(TaskResponse::from(&task))))
}

pub async fn update_task(
    State(state): State<AppState>,
    RequireAuth(_member): RequireAuth,
    Path((project_id, task_id)): Path<(ProjectId, TaskId)>,
    Json(payload): Json<UpdateTaskRequest>,
) -> ApiResult<Json<TaskResponse>> {
    let mut task = find_task(&state, &project_id, &task_id).await?;
    task.update(payload.into_details())?;
    state.tasks.update(&task).await?;
    Ok(Json(TaskResponse::from(&task)))
}

/// The kanban drop endpoint.
///
/// Reloads the full board, plans the renumbering of both affected columns,
/// and persists every changed placement in one transaction. Responds with
/// the board as it now stands.
pub async fn move_task(
    State(state): State<AppState>,
    RequireAuth(_member): RequireAuth,
    Path((project_id, task_id)): Path<(ProjectId, TaskId)>,
    Json(payload): Json<MoveTaskRequest>,
) -> ApiResult<Json<Vec<TaskResponse>>> {
    find_task(&state, &project_id, &task_id).await?;

    let board = state.tasks.list_by_project(&project_id).await?;
    let placements = plan_move(&board, &task_id, payload.status, payload.position)?;
    state.tasks.apply_placements(&project_id, &placements).await?;

    let board = state.tasks.list_by_project(&project_id).await?;
    Ok(Json(board.iter().map(TaskResponse::from).collect()))
}

pub async fn delete_task(
    State(state): State<AppState>,
    RequireAuth(_member): RequireAuth,
    Path((project_id, task_id)): Path<(ProjectId, TaskId)>,
) -> ApiResult<StatusCode> {
    find_task(&state, &project_id, &task_id).await?;
    state.tasks.delete(&task_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn find_project(state: &AppState, id: &ProjectId) -> Result<Project, DomainError> {
    state.projects.find_by_id(id).await?.ok_or_else(|| {
        DomainError::new(ErrorCode::ProjectNotFound, format!("Project not found: {}", id))
    })
}

/// Looks up a task and checks it belongs to the project in the path.
async fn find_task(
    state: &AppState,
    project_id: &ProjectId,
    task_id: &TaskId,
) -> Result<Task, DomainError> {
    let task = state.tasks.find_by_id(task_id).await?.ok_or_else(|| {
        DomainError::new(ErrorCode::TaskNotFound, format!("Task not found: {}", task_id))
    })?;
    if task.project_id() != project_id {
        return Err(DomainError::new(
            ErrorCode::TaskNotFound,
            format!("Task not found: {}", task_id),
        ));
    }
    Ok(task)
}
