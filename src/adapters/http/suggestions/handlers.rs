//! HTTP handlers for the suggestions board.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use crate::domain::foundation::{CommentId, DomainError, ErrorCode, SuggestionId};
use crate::domain::suggestion::Suggestion;

use super::super::error::ApiResult;
use super::super::middleware::RequireAuth;
use super::super::state::AppState;
use super::dto::{
    CreateCommentRequest, CreateSuggestionRequest, SuggestionResponse, UpdateSuggestionRequest,
};

pub async fn list_suggestions(
    State(state): State<AppState>,
    RequireAuth(member): RequireAuth,
) -> ApiResult<Json<Vec<SuggestionResponse>>> {
    let suggestions = state.suggestions.list().await?;
    Ok(Json(
        suggestions
            .iter()
            .map(|s| SuggestionResponse::for_member(s, &member.id))
            .collect(),
    ))
}

pub async fn create_suggestion(
    State(state): State<AppState>,
    RequireAuth(member): RequireAuth,
    Json(payload): Json<CreateSuggestionRequest>,
) -> ApiResult<(StatusCode, Json<SuggestionResponse>)> {
    let suggestion = Suggestion::new(
        SuggestionId::new(),
        member.id,
        payload.title,
        payload.body,
    )?;
    state.suggestions.save(&suggestion).await?;
    Ok((
        StatusCode::CREATED,
        Json(SuggestionResponse::for_member(&suggestion, &member.id)),
    ))
}

pub async fn get_suggestion(
    State(state): State<AppState>,
    RequireAuth(member): RequireAuth,
    Path(id): Path<SuggestionId>,
) -> ApiResult<Json<SuggestionResponse>> {
    let suggestion = find_suggestion(&state, &id).await?;
    Ok(Json(SuggestionResponse::for_member(&suggestion, &member.id)))
}

pub async fn update_suggestion(
    State(state): State<AppState>,
    RequireAuth(member): RequireAuth,
    Path(id): Path<SuggestionId>,
    Json(payload): Json<UpdateSuggestionRequest>,
) -> ApiResult<Json<SuggestionResponse>> {
    let mut suggestion = find_suggestion(&state, &id).await?;
    suggestion.update(payload.title, payload.body, payload.status)?;
    state.suggestions.update(&suggestion).await?;
    Ok(Json(SuggestionResponse::for_member(&suggestion, &member.id)))
}

pub async fn delete_suggestion(
    State(state): State<AppState>,
    RequireAuth(_member): RequireAuth,
    Path(id): Path<SuggestionId>,
) -> ApiResult<StatusCode> {
    state.suggestions.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Casts the caller's vote. Voting twice answers 409.
pub async fn add_vote(
    State(state): State<AppState>,
    RequireAuth(member): RequireAuth,
    Path(id): Path<SuggestionId>,
) -> ApiResult<(StatusCode, Json<SuggestionResponse>)> {
    let mut suggestion = find_suggestion(&state, &id).await?;
    suggestion.add_vote(member.id)?;
    state.suggestions.update(&suggestion).await?;
    Ok((
        StatusCode::CREATED,
        Json(SuggestionResponse::for_member(&suggestion, &member.id)),
    ))
}

/// Withdraws the caller's vote. Idempotent.
pub async fn remove_vote(
    State(state): State<AppState>,
    RequireAuth(member): RequireAuth,
    Path(id): Path<SuggestionId>,
) -> ApiResult<Json<SuggestionResponse>> {
    let mut suggestion = find_suggestion(&state, &id).await?;
    suggestion.remove_vote(&member.id);
    state.suggestions.update(&suggestion).await?;
    Ok(Json(SuggestionResponse::for_member(&suggestion, &member.id)))
}

pub async fn add_comment(
    State(state): State<AppState>,
    RequireAuth(member): RequireAuth,
    Path(id): Path<SuggestionId>,
    Json(payload): Json<CreateCommentRequest>,
) -> ApiResult<(StatusCode, Json<SuggestionResponse>)> {
    let mut suggestion = find_suggestion(&state, &id).await?;
    suggestion.add_comment(CommentId::new(), member.id, payload.body)?;
    state.suggestions.update(&suggestion).await?;
    Ok((
        StatusCode::CREATED,
        Json(SuggestionResponse::for_member(&suggestion, &member.id)),
    ))
}

pub async fn remove_comment(
    State(state): State<AppState>,
    RequireAuth(member): RequireAuth,
    Path((id, comment_id)): Path<(SuggestionId, CommentId)>,
) -> ApiResult<Json<SuggestionResponse>> {
    let mut suggestion = find_suggestion(&state, &id).await?;
    suggestion.remove_comment(&comment_id)?;
    state.suggestions.update(&suggestion).await?;
    Ok(Json(SuggestionResponse::for_member(&suggestion, &member.id)))
}

async fn find_suggestion(
    state: &AppState,
    id: &SuggestionId,
) -> Result<Suggestion, DomainError> {
    state.suggestions.find_by_id(id).await?.ok_or_else(|| {
        DomainError::new(
            ErrorCode::SuggestionNotFound,
            format!("Suggestion not found: {}", id),
        )
    })
}
