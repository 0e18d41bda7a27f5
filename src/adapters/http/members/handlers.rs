//! HTTP handlers for member endpoints. All require the admin role.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use crate::domain::foundation::{DomainError, ErrorCode, MemberId};
use crate::domain::member::{validate_password, Member, MemberDetails, Role};

use super::super::error::ApiResult;
use super::super::middleware::{require_role, RequireAuth};
use super::super::state::AppState;
use super::dto::{CreateMemberRequest, MemberResponse, UpdateMemberRequest};

pub async fn list_members(
    State(state): State<AppState>,
    RequireAuth(member): RequireAuth,
) -> ApiResult<Json<Vec<MemberResponse>>> {
    require_role(&member, Role::Admin)?;
    let members = state.members.list().await?;
    Ok(Json(members.iter().map(MemberResponse::from).collect()))
}

pub async fn create_member(
    State(state): State<AppState>,
    RequireAuth(caller): RequireAuth,
    Json(payload): Json<CreateMemberRequest>,
) -> ApiResult<(StatusCode, Json<MemberResponse>)> {
    require_role(&caller, Role::Admin)?;

    validate_password(&payload.password)?;
    let password_hash = state.passwords.hash(&payload.password);
    let member = Member::new(
        MemberId::new(),
        MemberDetails {
            name: payload.name,
            email: payload.email,
            roles: payload.roles,
            active: payload.active,
        },
        password_hash,
    )?;
    state.members.save(&member).await?;
    Ok((StatusCode::CREATED, Json(MemberResponse::from(&member))))
}

pub async fn get_member(
    State(state): State<AppState>,
    RequireAuth(caller): RequireAuth,
    Path(id): Path<MemberId>,
) -> ApiResult<Json<MemberResponse>> {
    require_role(&caller, Role::Admin)?;
    let member = find_member(&state, &id).await?;
    Ok(Json(MemberResponse::from(&member)))
}

pub async fn update_member(
    State(state): State<AppState>,
    RequireAuth(caller): RequireAuth,
    Path(id): Path<MemberId>,
    Json(payload): Json<UpdateMemberRequest>,
) -> ApiResult<Json<MemberResponse>> {
    require_role(&caller, Role::Admin)?;

    let mut member = find_member(&state, &id).await?;
    member.update(payload.details())?;
    if let Some(password) = &payload.password {
        validate_password(password)?;
        member.set_password_hash(state.passwords.hash(password));
    }
    state.members.update(&member).await?;
    Ok(Json(MemberResponse::from(&member)))
}

pub async fn delete_member(
    State(state): State<AppState>,
    RequireAuth(caller): RequireAuth,
    Path(id): Path<MemberId>,
) -> ApiResult<StatusCode> {
    require_role(&caller, Role::Admin)?;
    state.members.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn find_member(state: &AppState, id: &MemberId) -> Result<Member, DomainError> {
    state.members.find_by_id(id).await?.ok_or_else(|| {
        DomainError::new(ErrorCode::MemberNotFound, format!("Member not found: {}", id))
    })
}
