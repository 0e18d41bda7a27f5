//! HTTP handlers for client endpoints.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use crate::domain::client::Client;
use crate::domain::foundation::{ClientId, DomainError, ErrorCode};

use super::super::error::ApiResult;
use super::super::middleware::RequireAuth;
use super::super::state::AppState;
use super::dto::{ClientPayload, ClientResponse};

pub async fn list_clients(
    State(state): State<AppState>,
    RequireAuth(_member): RequireAuth,
) -> ApiResult<Json<Vec<ClientResponse>>> {
    let clients = state.clients.list().await?;
    Ok(Json(clients.iter().map(ClientResponse::from).collect()))
}

pub async fn create_client(
    State(state): State<AppState>,
    RequireAuth(_member): RequireAuth,
    Json(payload): Json<ClientPayload>,
) -> ApiResult<(StatusCode, Json<ClientResponse>)> {
    let client = Client::new(ClientId::new(), payload.into_details())?;
    state.clients.save(&client).await?;
    Ok((StatusCode::CREATED, Json(ClientResponse::from(&client))))
}

pub async fn get_client(
    State(state): State<AppState>,
    RequireAuth(_member): RequireAuth,
    Path(id): Path<ClientId>,
) -> ApiResult<Json<ClientResponse>> {
    let client = state
        .clients
        .find_by_id(&id)
        .await?
        .ok_or_else(|| client_not_found(&id))?;
    Ok(Json(ClientResponse::from(&client)))
}

pub async fn update_client(
    State(state): State<AppState>,
    RequireAuth(_member): RequireAuth,
    Path(id): Path<ClientId>,
    Json(payload): Json<ClientPayload>,
) -> ApiResult<Json<ClientResponse>> {
    let mut client = state
        .clients
        .find_by_id(&id)
        .await?
        .ok_or_else(|| client_not_found(&id))?;
    client.update(payload.into_details())?;
    state.clients.update(&client).await?;
    Ok(Json(ClientResponse::from(&client)))
}

pub async fn delete_client(
    State(state): State<AppState>,
    RequireAuth(_member): RequireAuth,
    Path(id): Path<ClientId>,
) -> ApiResult<StatusCode> {
    state.clients.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

fn client_not_found(id: &ClientId) -> DomainError {
    DomainError::new(ErrorCode::ClientNotFound, format!("Client not found: {}", id))
}
