//! Data transfer objects for ledger endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Money, ProjectId, Timestamp, TransactionId};
use crate::domain::transaction::{Transaction, TransactionDetails, TransactionKind};
use crate::ports::TransactionFilter;

/// Create/update payload. Amounts are positive cents; direction comes from
/// `kind`.
#[derive(Debug, Clone, Deserialize)]
pub struct TransactionPayload {
    pub kind: TransactionKind,
    pub amount_cents: i64,
    pub description: String,
    pub occurred_at: Timestamp,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub project_id: Option<ProjectId>,
}

impl TransactionPayload {
    pub fn into_details(self) -> TransactionDetails {
        TransactionDetails {
            kind: self.kind,
            amount: Money::from_cents(self.amount_cents),
            description: self.description,
            occurred_at: self.occurred_at,
            category: self.category,
            project_id: self.project_id,
        }
    }
}

/// `?kind=&project_id=&from=&to=` filters for the list endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListTransactionsQuery {
    #[serde(default)]
    pub kind: Option<TransactionKind>,
    #[serde(default)]
    pub project_id: Option<ProjectId>,
    #[serde(default)]
    pub from: Option<Timestamp>,
    #[serde(default)]
    pub to: Option<Timestamp>,
}

impl ListTransactionsQuery {
    pub fn into_filter(self) -> TransactionFilter {
        TransactionFilter {
            kind: self.kind,
            project_id: self.project_id,
            from: self.from,
            to: self.to,
        }
    }
}

/// Ledger entry as returned by the API.
#[derive(Debug, Clone, Serialize)]
pub struct TransactionResponse {
    pub id: TransactionId,
    pub kind: TransactionKind,
    pub amount_cents: i64,
    pub description: String,
    pub occurred_at: Timestamp,
    pub category: Option<String>,
    pub project_id: Option<ProjectId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<&Transaction> for TransactionResponse {
    fn from(tx: &Transaction) -> Self {
        Self {
            id: *tx.id(),
            kind: tx.kind(),
            amount_cents: tx.amount().cents(),
            description: tx.description().to_string(),
            occurred_at: *tx.occurred_at(),
            category: tx.category().map(String::from),
            project_id: tx.project_id().copied(),
            created_at: *tx.created_at(),
            updated_at: *tx.updated_at(),
        }
    }
}
