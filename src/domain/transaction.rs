//! Transaction aggregate - one row in the income/expense ledger.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    DomainError, Money, ProjectId, Timestamp, TransactionId, ValidationError,
};

/// Direction of a ledger entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    Income,
    Expense,
}

/// Editable transaction fields.
#[derive(Debug, Clone)]
pub struct TransactionDetails {
    pub kind: TransactionKind,
    pub amount: Money,
    pub description: String,
    pub occurred_at: Timestamp,
    pub category: Option<String>,
    pub project_id: Option<ProjectId>,
}

/// Ledger entry.
///
/// # Invariants
///
/// - `amount` is positive; direction is carried by `kind`
/// - `description` is non-empty
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    id: TransactionId,
    kind: TransactionKind,
    amount: Money,
    description: String,
    occurred_at: Timestamp,
    category: Option<String>,
    project_id: Option<ProjectId>,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Transaction {
    /// Creates a new ledger entry.
    pub fn new(id: TransactionId, details: TransactionDetails) -> Result<Self, DomainError> {
        validate_details(&details)?;
        let now = Timestamp::now();
        Ok(Self {
            id,
            kind: details.kind,
            amount: details.amount,
            description: details.description,
            occurred_at: details.occurred_at,
            category: details.category,
            project_id: details.project_id,
            created_at: now,
            updated_at: now,
        })
    }

    /// Reconstitutes a transaction from persistence (no validation).
    pub fn reconstitute(
        id: TransactionId,
        details: TransactionDetails,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            kind: details.kind,
            amount: details.amount,
            description: details.description,
            occurred_at: details.occurred_at,
            category: details.category,
            project_id: details.project_id,
            created_at,
            updated_at,
        }
    }

    /// Replaces the editable fields.
    pub fn update(&mut self, details: TransactionDetails) -> Result<(), DomainError> {
        validate_details(&details)?;
        self.kind = details.kind;
        self.amount = details.amount;
        self.description = details.description;
        self.occurred_at = details.occurred_at;
        self.category = details.category;
        self.project_id = details.project_id;
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Signed amount: positive for income, negative for expense.
    pub fn signed_amount(&self) -> Money {
        match self.kind {
            TransactionKind::Income => self.amount,
            TransactionKind::Expense => Money::ZERO - self.amount,
        }
    }

    pub fn id(&self) -> &TransactionId {
        &self.id
    }

    pub fn kind(&self) -> TransactionKind {
        self.kind
    }

    pub fn amount(&self) -> Money {
        self.amount
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn occurred_at(&self) -> &Timestamp {
        &self.occurred_at
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn project_id(&self) -> Option<&ProjectId> {
        self.project_id.as_ref()
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }
}

fn validate_details(details: &TransactionDetails) -> Result<(), DomainError> {
    if details.description.trim().is_empty() {
        return Err(ValidationError::empty_field("description").into());
    }
    if !details.amount.is_positive() {
        return Err(DomainError::validation(
            "amount",
            "Transaction amount must be positive",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ErrorCode;

    fn details(kind: TransactionKind, cents: i64) -> TransactionDetails {
        TransactionDetails {
            kind,
            amount: Money::from_cents(cents),
            description: "Invoice 42".to_string(),
            occurred_at: Timestamp::now(),
            category: None,
            project_id: None,
        }
    }

    #[test]
    fn rejects_zero_amount() {
        let err =
            Transaction::new(TransactionId::new(), details(TransactionKind::Income, 0)).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }

    #[test]
    fn signed_amount_negates_expenses() {
        let income =
            Transaction::new(TransactionId::new(), details(TransactionKind::Income, 500)).unwrap();
        let expense =
            Transaction::new(TransactionId::new(), details(TransactionKind::Expense, 500)).unwrap();

        assert_eq!(income.signed_amount(), Money::from_cents(500));
        assert_eq!(expense.signed_amount(), Money::from_cents(-500));
    }

    #[test]
    fn update_replaces_kind_and_amount() {
        let mut tx =
            Transaction::new(TransactionId::new(), details(TransactionKind::Income, 500)).unwrap();
        tx.update(details(TransactionKind::Expense, 750)).unwrap();

        assert_eq!(tx.kind(), TransactionKind::Expense);
        assert_eq!(tx.amount(), Money::from_cents(750));
    }
}
