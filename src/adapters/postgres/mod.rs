//! PostgreSQL adapters - sqlx implementations of the repository ports.

mod client_repository;
mod contract_repository;
mod finance_reader;
mod lead_repository;
mod meeting_repository;
mod member_repository;
mod project_repository;
mod suggestion_repository;
mod task_repository;
mod transaction_repository;

pub use client_repository::PostgresClientRepository;
pub use contract_repository::PostgresContractRepository;
pub use finance_reader::PostgresFinanceReader;
pub use lead_repository::PostgresLeadRepository;
pub use meeting_repository::PostgresMeetingRepository;
pub use member_repository::PostgresMemberRepository;
pub use project_repository::PostgresProjectRepository;
pub use suggestion_repository::PostgresSuggestionRepository;
pub use task_repository::PostgresTaskRepository;
pub use transaction_repository::PostgresTransactionRepository;

use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use sqlx::Row;

use crate::config::DatabaseConfig;
use crate::domain::foundation::DomainError;

/// Embedded migrations, applied on startup when configured.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

/// Builds a connection pool from the database configuration.
pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .min_connections(config.min_connections)
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout())
        .connect(&config.url)
        .await
}

/// Reads one column with a uniform database-error mapping.
pub(crate) fn col<'r, T>(row: &'r PgRow, name: &str) -> Result<T, DomainError>
where
    T: sqlx::Decode<'r, sqlx::Postgres> + sqlx::Type<sqlx::Postgres>,
{
    row.try_get(name)
        .map_err(|e| DomainError::database(&format!("Failed to read column '{}'", name), e))
}
