//! Ports - contracts between the domain and the outside world.
//!
//! One repository trait per resource, implemented by the postgres adapters.
//! All methods return `Result<_, DomainError>` so handlers map failures to
//! HTTP uniformly.

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

pub use client_repository::ClientRepository;
pub use contract_repository::ContractRepository;
pub use finance_reader::FinanceReader;
pub use lead_repository::LeadRepository;
pub use meeting_repository::{MeetingRange, MeetingRepository};
pub use member_repository::MemberRepository;
pub use project_repository::ProjectRepository;
pub use suggestion_repository::SuggestionRepository;
pub use task_repository::TaskRepository;
pub use transaction_repository::{TransactionFilter, TransactionRepository};
