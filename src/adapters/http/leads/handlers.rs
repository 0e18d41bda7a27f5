//! HTTP handlers for lead endpoints.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use crate::domain::foundation::{ClientId, DomainError, ErrorCode, LeadId};
use crate::domain::lead::Lead;

use super::super::error::ApiResult;
use super::super::middleware::RequireAuth;
use super::super::state::AppState;
use super::dto::{ConvertLeadResponse, CreateLeadRequest, LeadResponse, UpdateLeadRequest};

pub async fn list_leads(
    State(state): State<AppState>,
    RequireAuth(_member): RequireAuth,
) -> ApiResult<Json<Vec<LeadResponse>>> {
    let leads = state.leads.list().await?;
    Ok(Json(leads.iter().map(LeadResponse::from).collect()))
}

pub async fn create_lead(
    State(state): State<AppState>,
    RequireAuth(_member): RequireAuth,
    Json(payload): Json<CreateLeadRequest>,
) -> ApiResult<(StatusCode, Json<LeadResponse>)> {
    let lead = Lead::new(LeadId::new(), payload.into_details())?;
    state.leads.save(&lead).await?;
    Ok((StatusCode::CREATED, Json(LeadResponse::from(&lead))))
}

pub async fn get_lead(
    State(state): State<AppState>,
    RequireAuth(_member): RequireAuth,
    Path(id): Path<LeadId>,
) -> ApiResult<Json<LeadResponse>> {
    let lead = state
        .leads
        .find_by_id(&id)
        .await?
        .ok_or_else(|| lead_not_found(&id))?;
    Ok(Json(LeadResponse::from(&lead)))
}

pub async fn update_lead(
    State(state): State<AppState>,
    RequireAuth(_member): RequireAuth,
    Path(id): Path<LeadId>,
    Json(payload): Json<UpdateLeadRequest>,
) -> ApiResult<Json<LeadResponse>> {
    let mut lead = state
        .leads
        .find_by_id(&id)
        .await?
        .ok_or_else(|| lead_not_found(&id))?;
    lead.update(payload.details.into_details(), payload.status)?;
    state.leads.update(&lead).await?;
    Ok(Json(LeadResponse::from(&lead)))
}

/// Converts a qualified lead into a client. The lead is closed as
/// `converted` and keeps a pointer to the client it became.
pub async fn convert_lead(
    State(state): State<AppState>,
    RequireAuth(_member): RequireAuth,
    Path(id): Path<LeadId>,
) -> ApiResult<(StatusCode, Json<ConvertLeadResponse>)> {
    let mut lead = state
        .leads
        .find_by_id(&id)
        .await?
        .ok_or_else(|| lead_not_found(&id))?;

    let client = lead.convert(ClientId::new())?;
    state.clients.save(&client).await?;
    state.leads.update(&lead).await?;

    Ok((
        StatusCode::CREATED,
        Json(ConvertLeadResponse {
            lead: LeadResponse::from(&lead),
            client: (&client).into(),
        }),
    ))
}

pub async fn delete_lead(
    State(state): State<AppState>,
    RequireAuth(_member): RequireAuth,
    Path(id): Path<LeadId>,
) -> ApiResult<StatusCode> {
    state.leads.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

fn lead_not_found(id: &LeadId) -> DomainError {
    DomainError::new(ErrorCode::LeadNotFound, format!("Lead not found: {}", id))
}
