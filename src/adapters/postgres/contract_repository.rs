//! PostgreSQL implementation of ContractRepository.
//!
//! Installments are owned rows: updates rewrite the installment set inside
//! the contract's transaction, mirroring the aggregate's in-memory state.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Postgres, Transaction as SqlxTransaction};
use uuid::Uuid;

use crate::domain::contract::{Contract, ContractDetails, ContractStatus, Payment};
use crate::domain::foundation::{
    ClientId, ContractId, DomainError, ErrorCode, Money, PaymentId, ProjectId, Timestamp,
};
use crate::ports::ContractRepository;

use super::col;

/// PostgreSQL implementation of ContractRepository.
#[derive(Clone)]
pub struct PostgresContractRepository {
    pool: PgPool,
}

impl PostgresContractRepository {
    /// Creates a new repository over the shared pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn load_payments(&self, contract_id: &Uuid) -> Result<Vec<Payment>, DomainError> {
        let rows = sqlx::query(
            "SELECT * FROM contract_payments WHERE contract_id = $1 ORDER BY due_date ASC",
        )
        .bind(contract_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to fetch installments", e))?;

        rows.into_iter().map(row_to_payment).collect()
    }
}

#[async_trait]
impl ContractRepository for PostgresContractRepository {
    async fn save(&self, contract: &Contract) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::database("Failed to begin contract transaction", e))?;

        sqlx::query(
            r#"
            INSERT INTO contracts (
                id, client_id, project_id, title, value_cents, status, signed_at,
                created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(contract.id().as_uuid())
        .bind(contract.client_id().as_uuid())
        .bind(contract.project_id().map(|id| *id.as_uuid()))
        .bind(contract.title())
        .bind(contract.value().cents())
        .bind(status_to_str(contract.status()))
        .bind(contract.signed_at().map(|ts| *ts.as_datetime()))
        .bind(contract.created_at().as_datetime())
        .bind(contract.updated_at().as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(|e| DomainError::database("Failed to insert contract", e))?;

        insert_payments(&mut tx, contract).await?;

        tx.commit()
            .await
            .map_err(|e| DomainError::database("Failed to commit contract transaction", e))?;
        Ok(())
    }

    async fn update(&self, contract: &Contract) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::database("Failed to begin contract transaction", e))?;

        let result = sqlx::query(
            r#"
            UPDATE contracts SET
                title = $2, value_cents = $3, status = $4, signed_at = $5, updated_at = $6
            WHERE id = $1
            "#,
        )
        .bind(contract.id().as_uuid())
        .bind(contract.title())
        .bind(contract.value().cents())
        .bind(status_to_str(contract.status()))
        .bind(contract.signed_at().map(|ts| *ts.as_datetime()))
        .bind(contract.updated_at().as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(|e| DomainError::database("Failed to update contract", e))?;

        if result.rows_affected() == 0 {
            return Err(contract_not_found(contract.id()));
        }

        sqlx::query("DELETE FROM contract_payments WHERE contract_id = $1")
            .bind(contract.id().as_uuid())
            .execute(&mut *tx)
            .await
            .map_err(|e| DomainError::database("Failed to clear installments", e))?;

        insert_payments(&mut tx, contract).await?;

        tx.commit()
            .await
            .map_err(|e| DomainError::database("Failed to commit contract transaction", e))?;
        Ok(())
    }

    async fn find_by_id(&self, id: &ContractId) -> Result<Option<Contract>, DomainError> {
        let row = sqlx::query("SELECT * FROM contracts WHERE id = $1")
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to fetch contract", e))?;

        match row {
            Some(row) => {
                let payments = self.load_payments(&col(&row, "id")?).await?;
                Ok(Some(row_to_contract(row, payments)?))
            }
            None => Ok(None),
        }
    }

    async fn list(&self) -> Result<Vec<Contract>, DomainError> {
        let rows = sqlx::query("SELECT * FROM contracts ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to list contracts", e))?;

        let mut contracts = Vec::with_capacity(rows.len());
        for row in rows {
            let payments = self.load_payments(&col(&row, "id")?).await?;
            contracts.push(row_to_contract(row, payments)?);
        }
        Ok(contracts)
    }

    async fn delete(&self, id: &ContractId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM contracts WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to delete contract", e))?;

        if result.rows_affected() == 0 {
            return Err(contract_not_found(id));
        }
        Ok(())
    }
}

async fn insert_payments(
    tx: &mut SqlxTransaction<'_, Postgres>,
    contract: &Contract,
) -> Result<(), DomainError> {
    for payment in contract.payments() {
        sqlx::query(
            r#"
            INSERT INTO contract_payments (id, contract_id, amount_cents, due_date, paid, paid_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(payment.id().as_uuid())
        .bind(contract.id().as_uuid())
        .bind(payment.amount().cents())
        .bind(payment.due_date().as_datetime())
        .bind(payment.is_paid())
        .bind(payment.paid_at().map(|ts| *ts.as_datetime()))
        .execute(&mut **tx)
        .await
        .map_err(|e| DomainError::database("Failed to insert installment", e))?;
    }
    Ok(())
}

fn contract_not_found(id: &ContractId) -> DomainError {
    DomainError::new(
        ErrorCode::ContractNotFound,
        format!("Contract not found: {}", id),
    )
}

fn status_to_str(status: ContractStatus) -> &'static str {
    match status {
        ContractStatus::Draft => "draft",
        ContractStatus::Active => "active",
        ContractStatus::Completed => "completed",
        ContractStatus::Cancelled => "cancelled",
    }
}

fn str_to_status(s: &str) -> Result<ContractStatus, DomainError> {
    match s {
        "draft" => Ok(ContractStatus::Draft),
        "active" => Ok(ContractStatus::Active),
        "completed" => Ok(ContractStatus::Completed),
        "cancelled" => Ok(ContractStatus::Cancelled),
        _ => Err(DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid contract status: {}", s),
        )),
    }
}

fn row_to_payment(row: PgRow) -> Result<Payment, DomainError> {
    let paid_at: Option<chrono::DateTime<chrono::Utc>> = col(&row, "paid_at")?;
    Ok(Payment::reconstitute(
        PaymentId::from_uuid(col(&row, "id")?),
        Money::from_cents(col(&row, "amount_cents")?),
        Timestamp::from_datetime(col(&row, "due_date")?),
        col(&row, "paid")?,
        paid_at.map(Timestamp::from_datetime),
    ))
}

fn row_to_contract(row: PgRow, payments: Vec<Payment>) -> Result<Contract, DomainError> {
    let status: String = col(&row, "status")?;
    let project_id: Option<Uuid> = col(&row, "project_id")?;
    let signed_at: Option<chrono::DateTime<chrono::Utc>> = col(&row, "signed_at")?;
    Ok(Contract::reconstitute(
        ContractId::from_uuid(col(&row, "id")?),
        ClientId::from_uuid(col(&row, "client_id")?),
        project_id.map(ProjectId::from_uuid),
        ContractDetails {
            title: col(&row, "title")?,
            value: Money::from_cents(col(&row, "value_cents")?),
            status: str_to_status(&status)?,
            signed_at: signed_at.map(Timestamp::from_datetime),
        },
        payments,
        Timestamp::from_datetime(col(&row, "created_at")?),
        Timestamp::from_datetime(col(&row, "updated_at")?),
    ))
}
