//! HTTP handlers for ledger endpoints. All require the finance role.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;

use crate::domain::foundation::{DomainError, ErrorCode, TransactionId};
use crate::domain::member::Role;
use crate::domain::transaction::Transaction;

use super::super::error::ApiResult;
use super::super::middleware::{require_role, RequireAuth};
use super::super::state::AppState;
use super::dto::{ListTransactionsQuery, TransactionPayload, TransactionResponse};

pub async fn list_transactions(
    State(state): State<AppState>,
    RequireAuth(member): RequireAuth,
    Query(query): Query<ListTransactionsQuery>,
) -> ApiResult<Json<Vec<TransactionResponse>>> {
    require_role(&member, Role::Finance)?;
    let transactions = state.transactions.list(&query.into_filter()).await?;
    Ok(Json(
        transactions.iter().map(TransactionResponse::from).collect(),
    ))
}

pub async fn create_transaction(
    State(state): State<AppState>,
    RequireAuth(member): RequireAuth,
    Json(payload): Json<TransactionPayload>,
) -> ApiResult<(StatusCode, Json<TransactionResponse>)> {
    require_role(&member, Role::Finance)?;
    let transaction = Transaction::new(TransactionId::new(), payload.into_details())?;
    state.transactions.save(&transaction).await?;
    Ok((
        StatusCode::CREATED,
        Json(TransactionResponse::from(&transaction)),
    ))
}

pub async fn get_transaction(
    State(state): State<AppState>,
    RequireAuth(member): RequireAuth,
    Path(id): Path<TransactionId>,
) -> ApiResult<Json<TransactionResponse>> {
    require_role(&member, Role::Finance)?;
    let transaction = find_transaction(&state, &id).await?;
    Ok(Json(TransactionResponse::from(&transaction)))
}

pub async fn update_transaction(
    State(state): State<AppState>,
    RequireAuth(member): RequireAuth,
    Path(id): Path<TransactionId>,
    Json(payload): Json<TransactionPayload>,
) -> ApiResult<Json<TransactionResponse>> {
    require_role(&member, Role::Finance)?;
    let mut transaction = find_transaction(&state, &id).await?;
    transaction.update(payload.into_details())?;
    state.transactions.update(&transaction).await?;
    Ok(Json(TransactionResponse::from(&transaction)))
}

pub async fn delete_transaction(
    State(state): State<AppState>,
    RequireAuth(member): RequireAuth,
    Path(id): Path<TransactionId>,
) -> ApiResult<StatusCode> {
    require_role(&member, Role::Finance)?;
    state.transactions.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn find_transaction(
    state: &AppState,
    id: &TransactionId,
) -> Result<Transaction, DomainError> {
    state.transactions.find_by_id(id).await?.ok_or_else(|| {
        DomainError::new(
            ErrorCode::TransactionNotFound,
            format!("Transaction not found: {}", id),
        )
    })
}
