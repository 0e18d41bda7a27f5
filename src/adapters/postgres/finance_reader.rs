//! PostgreSQL implementation of FinanceReader.
//!
//! Fetches rows through the regular repositories and hands the arithmetic to
//! the domain, so SQL never computes a number the domain tests don't cover.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::finance::{ledger_summary, project_summary, LedgerSummary, ProjectFinanceSummary};
use crate::domain::foundation::{DomainError, ErrorCode, ProjectId, Timestamp};
use crate::ports::{
    ContractRepository, FinanceReader, ProjectRepository, TransactionFilter, TransactionRepository,
};

use super::{
    PostgresContractRepository, PostgresProjectRepository, PostgresTransactionRepository,
};

/// PostgreSQL implementation of FinanceReader.
#[derive(Clone)]
pub struct PostgresFinanceReader {
    projects: PostgresProjectRepository,
    transactions: PostgresTransactionRepository,
    contracts: PostgresContractRepository,
}

impl PostgresFinanceReader {
    /// Creates a new reader over the shared pool.
    pub fn new(pool: PgPool) -> Self {
        Self {
            projects: PostgresProjectRepository::new(pool.clone()),
            transactions: PostgresTransactionRepository::new(pool.clone()),
            contracts: PostgresContractRepository::new(pool),
        }
    }
}

#[async_trait]
impl FinanceReader for PostgresFinanceReader {
    async fn project_finance(
        &self,
        project_id: &ProjectId,
    ) -> Result<ProjectFinanceSummary, DomainError> {
        let project = self.projects.find_by_id(project_id).await?.ok_or_else(|| {
            DomainError::new(
                ErrorCode::ProjectNotFound,
                format!("Project not found: {}", project_id),
            )
        })?;

        let transactions = self
            .transactions
            .list(&TransactionFilter {
                project_id: Some(*project_id),
                ..TransactionFilter::default()
            })
            .await?;
        let contracts = self.contracts.list().await?;

        Ok(project_summary(&project, &transactions, &contracts))
    }

    async fn ledger(
        &self,
        from: Option<Timestamp>,
        to: Option<Timestamp>,
    ) -> Result<LedgerSummary, DomainError> {
        let transactions = self
            .transactions
            .list(&TransactionFilter {
                from,
                to,
                ..TransactionFilter::default()
            })
            .await?;

        Ok(ledger_summary(&transactions))
    }
}
