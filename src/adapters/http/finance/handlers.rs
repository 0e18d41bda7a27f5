//! HTTP handlers for finance summaries. All require the finance role.

use axum::extract::{Path, Query, State};
use axum::Json;

use crate::domain::finance::{LedgerSummary, ProjectFinanceSummary};
use crate::domain::foundation::ProjectId;
use crate::domain::member::Role;

use super::super::error::ApiResult;
use super::super::middleware::{require_role, RequireAuth};
use super::super::state::AppState;
use super::dto::LedgerQuery;

pub async fn ledger_summary(
    State(state): State<AppState>,
    RequireAuth(member): RequireAuth,
    Query(query): Query<LedgerQuery>,
) -> ApiResult<Json<LedgerSummary>> {
    require_role(&member, Role::Finance)?;
    let summary = state.finance.ledger(query.from, query.to).await?;
    Ok(Json(summary))
}

pub async fn project_summary(
    State(state): State<AppState>,
    RequireAuth(member): RequireAuth,
    Path(id): Path<ProjectId>,
) -> ApiResult<Json<ProjectFinanceSummary>> {
    require_role(&member, Role::Finance)?;
    let summary = state.finance.project_finance(&id).await?;
    Ok(Json(summary))
}
