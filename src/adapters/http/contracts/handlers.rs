//! HTTP handlers for contract endpoints.
//!
//! Reads are open to any logged-in member; writes require the finance role.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use crate::domain::contract::{Contract, ContractDetails};
use crate::domain::foundation::{ContractId, DomainError, ErrorCode, Money, PaymentId};
use crate::domain::member::Role;

use super::super::error::ApiResult;
use super::super::middleware::{require_role, RequireAuth};
use super::super::state::AppState;
use super::dto::{
    ContractResponse, CreateContractRequest, CreatePaymentRequest, UpdateContractRequest,
    UpdatePaymentRequest,
};

pub async fn list_contracts(
    State(state): State<AppState>,
    RequireAuth(_member): RequireAuth,
) -> ApiResult<Json<Vec<ContractResponse>>> {
    let contracts = state.contracts.list().await?;
    Ok(Json(contracts.iter().map(ContractResponse::from).collect()))
}

pub async fn create_contract(
    State(state): State<AppState>,
    RequireAuth(member): RequireAuth,
    Json(payload): Json<CreateContractRequest>,
) -> ApiResult<(StatusCode, Json<ContractResponse>)> {
    require_role(&member, Role::Finance)?;
    let contract = Contract::new(
        ContractId::new(),
        payload.client_id,
        payload.project_id,
        ContractDetails {
            title: payload.title,
            value: Money::from_cents(payload.value_cents),
            status: payload.status,
            signed_at: payload.signed_at,
        },
    )?;
    state.contracts.save(&contract).await?;
    Ok((StatusCode::CREATED, Json(ContractResponse::from(&contract))))
}

pub async fn get_contract(
    State(state): State<AppState>,
    RequireAuth(_member): RequireAuth,
    Path(id): Path<ContractId>,
) -> ApiResult<Json<ContractResponse>> {
    let contract = find_contract(&state, &id).await?;
    Ok(Json(ContractResponse::from(&contract)))
}

pub async fn update_contract(
    State(state): State<AppState>,
    RequireAuth(member): RequireAuth,
    Path(id): Path<ContractId>,
    Json(payload): Json<UpdateContractRequest>,
) -> ApiResult<Json<ContractResponse>> {
    require_role(&member, Role::Finance)?;
    let mut contract = find_contract(&state, &id).await?;
    contract.update(payload.into_details())?;
    state.contracts.update(&contract).await?;
    Ok(Json(ContractResponse::from(&contract)))
}

pub async fn delete_contract(
    State(state): State<AppState>,
    RequireAuth(member): RequireAuth,
    Path(id): Path<ContractId>,
) -> ApiResult<StatusCode> {
    require_role(&member, Role::Finance)?;
    state.contracts.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn add_payment(
    State(state): State<AppState>,
    RequireAuth(member): RequireAuth,
    Path(id): Path<ContractId>,
    Json(payload): Json<CreatePaymentRequest>,
) -> ApiResult<(StatusCode, Json<ContractResponse>)> {
    require_role(&member, Role::Finance)?;
    let mut contract = find_contract(&state, &id).await?;
    contract.add_payment(
        PaymentId::new(),
        Money::from_cents(payload.amount_cents),
        payload.due_date,
    )?;
    state.contracts.update(&contract).await?;
    Ok((StatusCode::CREATED, Json(ContractResponse::from(&contract))))
}

pub async fn update_payment(
    State(state): State<AppState>,
    RequireAuth(member): RequireAuth,
    Path((id, payment_id)): Path<(ContractId, PaymentId)>,
    Json(payload): Json<UpdatePaymentRequest>,
) -> ApiResult<Json<ContractResponse>> {
    require_role(&member, Role::Finance)?;
    let mut contract = find_contract(&state, &id).await?;
    contract.update_payment(
        &payment_id,
        Money::from_cents(payload.amount_cents),
        payload.due_date,
        payload.paid,
    )?;
    state.contracts.update(&contract).await?;
    Ok(Json(ContractResponse::from(&contract)))
}

pub async fn remove_payment(
    State(state): State<AppState>,
    RequireAuth(member): RequireAuth,
    Path((id, payment_id)): Path<(ContractId, PaymentId)>,
) -> ApiResult<Json<ContractResponse>> {
    require_role(&member, Role::Finance)?;
    let mut contract = find_contract(&state, &id).await?;
    contract.remove_payment(&payment_id)?;
    state.contracts.update(&contract).await?;
    Ok(Json(ContractResponse::from(&contract)))
}

async fn find_contract(state: &AppState, id: &ContractId) -> Result<Contract, DomainError> {
    state.contracts.find_by_id(id).await?.ok_or_else(|| {
        DomainError::new(ErrorCode::ContractNotFound, format!("Contract not found: {}", id))
    })
}
