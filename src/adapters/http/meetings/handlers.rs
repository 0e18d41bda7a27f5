//! HTTP handlers for meeting endpoints.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;

use crate::domain::foundation::{DomainError, ErrorCode, MeetingId};
use crate::domain::meeting::Meeting;

use super::super::error::ApiResult;
use super::super::middleware::RequireAuth;
use super::super::state::AppState;
use super::dto::{ListMeetingsQuery, MeetingPayload, MeetingResponse};

pub async fn list_meetings(
    State(state): State<AppState>,
    RequireAuth(_member): RequireAuth,
    Query(query): Query<ListMeetingsQuery>,
) -> ApiResult<Json<Vec<MeetingResponse>>> {
    let meetings = state.meetings.list(&query.into_range()).await?;
    Ok(Json(meetings.iter().map(MeetingResponse::from).collect()))
}

pub async fn create_meeting(
    State(state): State<AppState>,
    RequireAuth(_member): RequireAuth,
    Json(payload): Json<MeetingPayload>,
) -> ApiResult<(StatusCode, Json<MeetingResponse>)> {
    let meeting = Meeting::new(MeetingId::new(), payload.into_details())?;
    state.meetings.save(&meeting).await?;
    Ok((StatusCode::CREATED, Json(MeetingResponse::from(&meeting))))
}

pub async fn get_meeting(
    State(state): State<AppState>,
    RequireAuth(_member): RequireAuth,
    Path(id): Path<MeetingId>,
) -> ApiResult<Json<MeetingResponse>> {
    let meeting = find_meeting(&state, &id).await?;
    Ok(Json(MeetingResponse::from(&meeting)))
}

pub async fn update_meeting(
    State(state): State<AppState>,
    RequireAuth(_member): RequireAuth,
    Path(id): Path<MeetingId>,
    Json(payload): Json<MeetingPayload>,
) -> ApiResult<Json<MeetingResponse>> {
    let mut meeting = find_meeting(&state, &id).await?;
    meeting.update(payload.into_details())?;
    state.meetings.update(&meeting).await?;
    Ok(Json(MeetingResponse::from(&meeting)))
}

pub async fn delete_meeting(
    State(state): State<AppState>,
    RequireAuth(_member): RequireAuth,
    Path(id): Path<MeetingId>,
) -> ApiResult<StatusCode> {
    state.meetings.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn find_meeting(state: &AppState, id: &MeetingId) -> Result<Meeting, DomainError> {
    state.meetings.find_by_id(id).await?.ok_or_else(|| {
        DomainError::new(ErrorCode::MeetingNotFound, format!("Meeting not found: {}", id))
    })
}
