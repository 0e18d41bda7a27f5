//! PostgreSQL implementation of TransactionRepository.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, QueryBuilder};
use uuid::Uuid;

use crate::domain::foundation::{DomainError, ErrorCode, Money, ProjectId, Timestamp, TransactionId};
use crate::domain::transaction::{Transaction, TransactionDetails, TransactionKind};
use crate::ports::{TransactionFilter, TransactionRepository};

use super::col;

/// PostgreSQL implementation of TransactionRepository.
#[derive(Clone)]
pub struct PostgresTransactionRepository {
    pool: PgPool,
}

impl PostgresTransactionRepository {
    /// Creates a new repository over the shared pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TransactionRepository for PostgresTransactionRepository {
    async fn save(&self, transaction: &Transaction) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO transactions (
                id, kind, amount_cents, description, occurred_at, category,
                project_id, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(transaction.id().as_uuid())
        .bind(kind_to_str(transaction.kind()))
        .bind(transaction.amount().cents())
        .bind(transaction.description())
        .bind(transaction.occurred_at().as_datetime())
        .bind(transaction.category())
        .bind(transaction.project_id().map(|id| *id.as_uuid()))
        .bind(transaction.created_at().as_datetime())
        .bind(transaction.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to insert transaction", e))?;

        Ok(())
    }

    async fn update(&self, transaction: &Transaction) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE transactions SET
                kind = $2, amount_cents = $3, description = $4, occurred_at = $5,
                category = $6, project_id = $7, updated_at = $8
            WHERE id = $1
            "#,
        )
        .bind(transaction.id().as_uuid())
        .bind(kind_to_str(transaction.kind()))
        .bind(transaction.amount().cents())
        .bind(transaction.description())
        .bind(transaction.occurred_at().as_datetime())
        .bind(transaction.category())
        .bind(transaction.project_id().map(|id| *id.as_uuid()))
        .bind(transaction.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to update transaction", e))?;

        if result.rows_affected() == 0 {
            return Err(transaction_not_found(transaction.id()));
        }
        Ok(())
    }

    async fn find_by_id(&self, id: &TransactionId) -> Result<Option<Transaction>, DomainError> {
        let row = sqlx::query("SELECT * FROM transactions WHERE id = $1")
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to fetch transaction", e))?;

        row.map(row_to_transaction).transpose()
    }

    async fn list(&self, filter: &TransactionFilter) -> Result<Vec<Transaction>, DomainError> {
        let mut builder: QueryBuilder<sqlx::Postgres> =
            QueryBuilder::new("SELECT * FROM transactions WHERE 1 = 1");

        if let Some(kind) = filter.kind {
            builder.push(" AND kind = ");
            builder.push_bind(kind_to_str(kind));
        }
        if let Some(project_id) = &filter.project_id {
            builder.push(" AND project_id = ");
            builder.push_bind(*project_id.as_uuid());
        }
        if let Some(from) = &filter.from {
            builder.push(" AND occurred_at >= ");
            builder.push_bind(*from.as_datetime());
        }
        if let Some(to) = &filter.to {
            builder.push(" AND occurred_at <= ");
            builder.push_bind(*to.as_datetime());
        }
        builder.push(" ORDER BY occurred_at DESC, created_at DESC");

        let rows = builder
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to list transactions", e))?;

        rows.into_iter().map(row_to_transaction).collect()
    }

    async fn delete(&self, id: &TransactionId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM transactions WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to delete transaction", e))?;

        if result.rows_affected() == 0 {
            return Err(transaction_not_found(id));
        }
        Ok(())
    }
}

fn transaction_not_found(id: &TransactionId) -> DomainError {
    DomainError::new(
        ErrorCode::TransactionNotFound,
        format!("Transaction not found: {}", id),
    )
}

fn kind_to_str(kind: TransactionKind) -> &'static str {
    match kind {
        TransactionKind::Income => "income",
        TransactionKind::Expense => "expense",
    }
}

fn str_to_kind(s: &str) -> Result<TransactionKind, DomainError> {
    match s {
        "income" => Ok(TransactionKind::Income),
        "expense" => Ok(TransactionKind::Expense),
        _ => Err(DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid transaction kind: {}", s),
        )),
    }
}

fn row_to_transaction(row: PgRow) -> Result<Transaction, DomainError> {
    let kind: String = col(&row, "kind")?;
    let project_id: Option<Uuid> = col(&row, "project_id")?;
    Ok(Transaction::reconstitute(
        TransactionId::from_uuid(col(&row, "id")?),
        TransactionDetails {
            kind: str_to_kind(&kind)?,
            amount: Money::from_cents(col(&row, "amount_cents")?),
            description: col(&row, "description")?,
            occurred_at: Timestamp::from_datetime(col(&row, "occurred_at")?),
            category: col(&row, "category")?,
            project_id: project_id.map(ProjectId::from_uuid),
        },
        Timestamp::from_datetime(col(&row, "created_at")?),
        Timestamp::from_datetime(col(&row, "updated_at")?),
    ))
}
