//! Shared application state for the HTTP layer.

use std::sync::Arc;

use crate::adapters::auth::{PasswordHasher, TokenService};
use crate::ports::{
    ClientRepository, ContractRepository, FinanceReader, LeadRepository, MeetingRepository,
    MemberRepository, ProjectRepository, SuggestionRepository, TaskRepository,
    TransactionRepository,
};

/// Everything the handlers need, injected as ports.
#[derive(Clone)]
pub struct AppState {
    pub clients: Arc<dyn ClientRepository>,
    pub leads: Arc<dyn LeadRepository>,
    pub projects: Arc<dyn ProjectRepository>,
    pub tasks: Arc<dyn TaskRepository>,
    pub contracts: Arc<dyn ContractRepository>,
    pub transactions: Arc<dyn TransactionRepository>,
    pub members: Arc<dyn MemberRepository>,
    pub meetings: Arc<dyn MeetingRepository>,
    pub suggestions: Arc<dyn SuggestionRepository>,
    pub finance: Arc<dyn FinanceReader>,
    pub tokens: Arc<TokenService>,
    pub passwords: Arc<PasswordHasher>,
}
