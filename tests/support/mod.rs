//! In-memory port implementations for exercising the real router end to end.
//!
//! Each store mirrors the contract of its postgres counterpart closely enough
//! for wiring tests: not-found errors on update/delete, the member email
//! uniqueness conflict, and the transaction list filter.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use opsdeck::adapters::auth::{PasswordHasher, TokenService};
use opsdeck::adapters::http::{api_router, AppState};
use opsdeck::config::ServerConfig;
use opsdeck::domain::client::Client;
use opsdeck::domain::contract::Contract;
use opsdeck::domain::finance::{ledger_summary, project_summary, LedgerSummary, ProjectFinanceSummary};
use opsdeck::domain::foundation::{
    ClientId, ContractId, DomainError, ErrorCode, LeadId, MeetingId, MemberId, ProjectId,
    SuggestionId, TaskId, Timestamp, TransactionId,
};
use opsdeck::domain::lead::Lead;
use opsdeck::domain::meeting::Meeting;
use opsdeck::domain::member::{Member, MemberDetails, Role};
use opsdeck::domain::project::{Project, ProjectKind, Task, TaskPlacement, TaskStatus};
use opsdeck::domain::suggestion::Suggestion;
use opsdeck::domain::transaction::Transaction;
use opsdeck::ports::{
    ClientRepository, ContractRepository, FinanceReader, LeadRepository, MeetingRange,
    MeetingRepository, MemberRepository, ProjectRepository, SuggestionRepository, TaskRepository,
    TransactionFilter, TransactionRepository,
};

fn not_found(code: ErrorCode, what: &str) -> DomainError {
    DomainError::new(code, format!("{} not found", what))
}

// ---------------------------------------------------------------------------
// Stores
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct InMemoryClients {
    rows: Mutex<Vec<Client>>,
}

#[async_trait]
impl ClientRepository for InMemoryClients {
    async fn save(&self, client: &Client) -> Result<(), DomainError> {
        self.rows.lock().unwrap().push(client.clone());
        Ok(())
    }

    async fn update(&self, client: &Client) -> Result<(), DomainError> {
        let mut rows = self.rows.lock().unwrap();
        match rows.iter().position(|c| c.id() == client.id()) {
            Some(pos) => {
                rows[pos] = client.clone();
                Ok(())
            }
            None => Err(not_found(ErrorCode::ClientNotFound, "Client")),
        }
    }

    async fn find_by_id(&self, id: &ClientId) -> Result<Option<Client>, DomainError> {
        Ok(self.rows.lock().unwrap().iter().find(|c| c.id() == id).cloned())
    }

    async fn list(&self) -> Result<Vec<Client>, DomainError> {
        Ok(self.rows.lock().unwrap().clone())
    }

    async fn delete(&self, id: &ClientId) -> Result<(), DomainError> {
        let mut rows = self.rows.lock().unwrap();
        match rows.iter().position(|c| c.id() == id) {
            Some(pos) => {
                rows.remove(pos);
                Ok(())
            }
            None => Err(not_found(ErrorCode::ClientNotFound, "Client")),
        }
    }
}

#[derive(Default)]
pub struct InMemoryLeads {
    rows: Mutex<Vec<Lead>>,
}

#[async_trait]
impl LeadRepository for InMemoryLeads {
    async fn save(&self, lead: &Lead) -> Result<(), DomainError> {
        self.rows.lock().unwrap().push(lead.clone());
        Ok(())
    }

    async fn update(&self, lead: &Lead) -> Result<(), DomainError> {
        let mut rows = self.rows.lock().unwrap();
        match rows.iter().position(|l| l.id() == lead.id()) {
            Some(pos) => {
                rows[pos] = lead.clone();
                Ok(())
            }
            None => Err(not_found(ErrorCode::LeadNotFound, "Lead")),
        }
    }

    async fn find_by_id(&self, id: &LeadId) -> Result<Option<Lead>, DomainError> {
        Ok(self.rows.lock().unwrap().iter().find(|l| l.id() == id).cloned())
    }

    async fn list(&self) -> Result<Vec<Lead>, DomainError> {
        Ok(self.rows.lock().unwrap().clone())
    }

    async fn delete(&self, id: &LeadId) -> Result<(), DomainError> {
        let mut rows = self.rows.lock().unwrap();
        match rows.iter().position(|l| l.id() == id) {
            Some(pos) => {
                rows.remove(pos);
                Ok(())
            }
            None => Err(not_found(ErrorCode::LeadNotFound, "Lead")),
        }
    }
}

#[derive(Default)]
pub struct InMemoryProjects {
    rows: Mutex<Vec<Project>>,
}

#[async_trait]
impl ProjectRepository for InMemoryProjects {
    async fn save(&self, project: &Project) -> Result<(), DomainError> {
        self.rows.lock().unwrap().push(project.clone());
        Ok(())
    }

    async fn update(&self, project: &Project) -> Result<(), DomainError> {
        let mut rows = self.rows.lock().unwrap();
        match rows.iter().position(|p| p.id() == project.id()) {
            Some(pos) => {
                rows[pos] = project.clone();
                Ok(())
            }
            None => Err(not_found(ErrorCode::ProjectNotFound, "Project")),
        }
    }

    async fn find_by_id(&self, id: &ProjectId) -> Result<Option<Project>, DomainError> {
        Ok(self.rows.lock().unwrap().iter().find(|p| p.id() == id).cloned())
    }

    async fn list(&self, kind: Option<ProjectKind>) -> Result<Vec<Project>, DomainError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|p| kind.map_or(true, |k| p.kind() == k))
            .cloned()
            .collect())
    }

    async fn delete(&self, id: &ProjectId) -> Result<(), DomainError> {
        let mut rows = self.rows.lock().unwrap();
        match rows.iter().position(|p| p.id() == id) {
            Some(pos) => {
                rows.remove(pos);
                Ok(())
            }
            None => Err(not_found(ErrorCode::ProjectNotFound, "Project")),
        }
    }
}

#[derive(Default)]
pub struct InMemoryTasks {
    rows: Mutex<Vec<Task>>,
}

#[async_trait]
impl TaskRepository for InMemoryTasks {
    async fn save(&self, task: &Task) -> Result<(), DomainError> {
        self.rows.lock().unwrap().push(task.clone());
        Ok(())
    }

    async fn update(&self, task: &Task) -> Result<(), DomainError> {
        let mut rows = self.rows.lock().unwrap();
        match rows.iter().position(|t| t.id() == task.id()) {
            Some(pos) => {
                rows[pos] = task.clone();
                Ok(())
            }
            None => Err(not_found(ErrorCode::TaskNotFound, "Task")),
        }
    }

    async fn find_by_id(&self, id: &TaskId) -> Result<Option<Task>, DomainError> {
        Ok(self.rows.lock().unwrap().iter().find(|t| t.id() == id).cloned())
    }

    async fn list_by_project(&self, project_id: &ProjectId) -> Result<Vec<Task>, DomainError> {
        let mut board: Vec<Task> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|t| t.project_id() == project_id)
            .cloned()
            .collect();
        board.sort_by_key(|t| (t.status() as u8, t.position()));
        Ok(board)
    }

    async fn count_in_column(
        &self,
        project_id: &ProjectId,
        status: TaskStatus,
    ) -> Result<i64, DomainError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|t| t.project_id() == project_id && t.status() == status)
            .count() as i64)
    }

    async fn apply_placements(
        &self,
        project_id: &ProjectId,
        placements: &[TaskPlacement],
    ) -> Result<(), DomainError> {
        let mut rows = self.rows.lock().unwrap();
        for placement in placements {
            let task = rows
                .iter_mut()
                .find(|t| t.id() == &placement.task_id && t.project_id() == project_id)
                .ok_or_else(|| not_found(ErrorCode::TaskNotFound, "Task"))?;
            task.place(placement.status, placement.position);
        }
        Ok(())
    }

    async fn delete(&self, id: &TaskId) -> Result<(), DomainError> {
        let mut rows = self.rows.lock().unwrap();
        match rows.iter().position(|t| t.id() == id) {
            Some(pos) => {
                rows.remove(pos);
                Ok(())
            }
            None => Err(not_found(ErrorCode::TaskNotFound, "Task")),
        }
    }
}

#[derive(Default)]
pub struct InMemoryContracts {
    rows: Mutex<Vec<Contract>>,
}

#[async_trait]
impl ContractRepository for InMemoryContracts {
    async fn save(&self, contract: &Contract) -> Result<(), DomainError> {
        self.rows.lock().unwrap().push(contract.clone());
        Ok(())
    }

    async fn update(&self, contract: &Contract) -> Result<(), DomainError> {
        let mut rows = self.rows.lock().unwrap();
        match rows.iter().position(|c| c.id() == contract.id()) {
            Some(pos) => {
                rows[pos] = contract.clone();
                Ok(())
            }
            None => Err(not_found(ErrorCode::ContractNotFound, "Contract")),
        }
    }

    async fn find_by_id(&self, id: &ContractId) -> Result<Option<Contract>, DomainError> {
        Ok(self.rows.lock().unwrap().iter().find(|c| c.id() == id).cloned())
    }

    async fn list(&self) -> Result<Vec<Contract>, DomainError> {
        Ok(self.rows.lock().unwrap().clone())
    }

    async fn delete(&self, id: &ContractId) -> Result<(), DomainError> {
        let mut rows = self.rows.lock().unwrap();
        match rows.iter().position(|c| c.id() == id) {
            Some(pos) => {
                rows.remove(pos);
                Ok(())
            }
            None => Err(not_found(ErrorCode::ContractNotFound, "Contract")),
        }
    }
}

#[derive(Default)]
pub struct InMemoryTransactions {
    rows: Mutex<Vec<Transaction>>,
}

impl InMemoryTransactions {
    fn matches(filter: &TransactionFilter, tx: &Transaction) -> bool {
        if let Some(kind) = filter.kind {
            if tx.kind() != kind {
                return false;
            }
        }
        if let Some(project_id) = filter.project_id {
            if tx.project_id() != Some(&project_id) {
                return false;
            }
        }
        if let Some(from) = &filter.from {
            if tx.occurred_at().is_before(from) {
                return false;
            }
        }
        if let Some(to) = &filter.to {
            if tx.occurred_at().is_after(to) {
                return false;
            }
        }
        true
    }
}

#[async_trait]
impl TransactionRepository for InMemoryTransactions {
    async fn save(&self, transaction: &Transaction) -> Result<(), DomainError> {
        self.rows.lock().unwrap().push(transaction.clone());
        Ok(())
    }

    async fn update(&self, transaction: &Transaction) -> Result<(), DomainError> {
        let mut rows = self.rows.lock().unwrap();
        match rows.iter().position(|t| t.id() == transaction.id()) {
            Some(pos) => {
                rows[pos] = transaction.clone();
                Ok(())
            }
            None => Err(not_found(ErrorCode::TransactionNotFound, "Transaction")),
        }
    }

    async fn find_by_id(&self, id: &TransactionId) -> Result<Option<Transaction>, DomainError> {
        Ok(self.rows.lock().unwrap().iter().find(|t| t.id() == id).cloned())
    }

    async fn list(&self, filter: &TransactionFilter) -> Result<Vec<Transaction>, DomainError> {
        let mut rows: Vec<Transaction> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|t| Self::matches(filter, t))
            .cloned()
            .collect();
        rows.sort_by_key(|t| std::cmp::Reverse(*t.occurred_at()));
        Ok(rows)
    }

    async fn delete(&self, id: &TransactionId) -> Result<(), DomainError> {
        let mut rows = self.rows.lock().unwrap();
        match rows.iter().position(|t| t.id() == id) {
            Some(pos) => {
                rows.remove(pos);
                Ok(())
            }
            None => Err(not_found(ErrorCode::TransactionNotFound, "Transaction")),
        }
    }
}

#[derive(Default)]
pub struct InMemoryMembers {
    rows: Mutex<Vec<Member>>,
}

#[async_trait]
impl MemberRepository for InMemoryMembers {
    async fn save(&self, member: &Member) -> Result<(), DomainError> {
        let mut rows = self.rows.lock().unwrap();
        if rows.iter().any(|m| m.email() == member.email()) {
            return Err(DomainError::new(
                ErrorCode::Conflict,
                format!("Email already in use: {}", member.email()),
            ));
        }
        rows.push(member.clone());
        Ok(())
    }

    async fn update(&self, member: &Member) -> Result<(), DomainError> {
        let mut rows = self.rows.lock().unwrap();
        if rows
            .iter()
            .any(|m| m.email() == member.email() && m.id() != member.id())
        {
            return Err(DomainError::new(
                ErrorCode::Conflict,
                format!("Email already in use: {}", member.email()),
            ));
        }
        match rows.iter().position(|m| m.id() == member.id()) {
            Some(pos) => {
                rows[pos] = member.clone();
                Ok(())
            }
            None => Err(not_found(ErrorCode::MemberNotFound, "Member")),
        }
    }

    async fn find_by_id(&self, id: &MemberId) -> Result<Option<Member>, DomainError> {
        Ok(self.rows.lock().unwrap().iter().find(|m| m.id() == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Member>, DomainError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|m| m.email() == email)
            .cloned())
    }

    async fn list(&self) -> Result<Vec<Member>, DomainError> {
        Ok(self.rows.lock().unwrap().clone())
    }

    async fn delete(&self, id: &MemberId) -> Result<(), DomainError> {
        let mut rows = self.rows.lock().unwrap();
        match rows.iter().position(|m| m.id() == id) {
            Some(pos) => {
                rows.remove(pos);
                Ok(())
            }
            None => Err(not_found(ErrorCode::MemberNotFound, "Member")),
        }
    }
}

#[derive(Default)]
pub struct InMemoryMeetings {
    rows: Mutex<Vec<Meeting>>,
}

#[async_trait]
impl MeetingRepository for InMemoryMeetings {
    async fn save(&self, meeting: &Meeting) -> Result<(), DomainError> {
        self.rows.lock().unwrap().push(meeting.clone());
        Ok(())
    }

    async fn update(&self, meeting: &Meeting) -> Result<(), DomainError> {
        let mut rows = self.rows.lock().unwrap();
        match rows.iter().position(|m| m.id() == meeting.id()) {
            Some(pos) => {
                rows[pos] = meeting.clone();
                Ok(())
            }
            None => Err(not_found(ErrorCode::MeetingNotFound, "Meeting")),
        }
    }

    async fn find_by_id(&self, id: &MeetingId) -> Result<Option<Meeting>, DomainError> {
        Ok(self.rows.lock().unwrap().iter().find(|m| m.id() == id).cloned())
    }

    async fn list(&self, range: &MeetingRange) -> Result<Vec<Meeting>, DomainError> {
        let mut rows: Vec<Meeting> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|m| {
                let after_from = range
                    .from
                    .map_or(true, |from| !m.scheduled_at().is_before(&from));
                let before_to = range.to.map_or(true, |to| !m.scheduled_at().is_after(&to));
                after_from && before_to
            })
            .cloned()
            .collect();
        rows.sort_by_key(|m| *m.scheduled_at());
        Ok(rows)
    }

    async fn delete(&self, id: &MeetingId) -> Result<(), DomainError> {
        let mut rows = self.rows.lock().unwrap();
        match rows.iter().position(|m| m.id() == id) {
            Some(pos) => {
                rows.remove(pos);
                Ok(())
            }
            None => Err(not_found(ErrorCode::MeetingNotFound, "Meeting")),
        }
    }
}

#[derive(Default)]
pub struct InMemorySuggestions {
    rows: Mutex<Vec<Suggestion>>,
}

#[async_trait]
impl SuggestionRepository for InMemorySuggestions {
    async fn save(&self, suggestion: &Suggestion) -> Result<(), DomainError> {
        self.rows.lock().unwrap().push(suggestion.clone());
        Ok(())
    }

    async fn update(&self, suggestion: &Suggestion) -> Result<(), DomainError> {
        let mut rows = self.rows.lock().unwrap();
        match rows.iter().position(|s| s.id() == suggestion.id()) {
            Some(pos) => {
                rows[pos] = suggestion.clone();
                Ok(())
            }
            None => Err(not_found(ErrorCode::SuggestionNotFound, "Suggestion")),
        }
    }

    async fn find_by_id(&self, id: &SuggestionId) -> Result<Option<Suggestion>, DomainError> {
        Ok(self.rows.lock().unwrap().iter().find(|s| s.id() == id).cloned())
    }

    async fn list(&self) -> Result<Vec<Suggestion>, DomainError> {
        let mut rows = self.rows.lock().unwrap().clone();
        rows.sort_by_key(|s| std::cmp::Reverse(s.vote_count()));
        Ok(rows)
    }

    async fn delete(&self, id: &SuggestionId) -> Result<(), DomainError> {
        let mut rows = self.rows.lock().unwrap();
        match rows.iter().position(|s| s.id() == id) {
            Some(pos) => {
                rows.remove(pos);
                Ok(())
            }
            None => Err(not_found(ErrorCode::SuggestionNotFound, "Suggestion")),
        }
    }
}

/// Composes the project, transaction, and contract stores the same way the
/// postgres reader does, so summaries come from the pure domain fold.
pub struct InMemoryFinance {
    projects: Arc<InMemoryProjects>,
    transactions: Arc<InMemoryTransactions>,
    contracts: Arc<InMemoryContracts>,
}

#[async_trait]
impl FinanceReader for InMemoryFinance {
    async fn project_finance(
        &self,
        project_id: &ProjectId,
    ) -> Result<ProjectFinanceSummary, DomainError> {
        let project = self
            .projects
            .find_by_id(project_id)
            .await?
            .ok_or_else(|| not_found(ErrorCode::ProjectNotFound, "Project"))?;
        let transactions = self
            .transactions
            .list(&TransactionFilter {
                project_id: Some(*project_id),
                ..Default::default()
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
                ..Default::default()
            })
            .await?;
        Ok(ledger_summary(&transactions))
    }
}

// ---------------------------------------------------------------------------
// Backend harness
// ---------------------------------------------------------------------------

/// A full application state over in-memory stores, with handles kept for
/// seeding and inspection.
pub struct TestBackend {
    pub clients: Arc<InMemoryClients>,
    pub leads: Arc<InMemoryLeads>,
    pub projects: Arc<InMemoryProjects>,
    pub tasks: Arc<InMemoryTasks>,
    pub contracts: Arc<InMemoryContracts>,
    pub transactions: Arc<InMemoryTransactions>,
    pub members: Arc<InMemoryMembers>,
    pub meetings: Arc<InMemoryMeetings>,
    pub suggestions: Arc<InMemorySuggestions>,
    pub tokens: Arc<TokenService>,
    pub passwords: Arc<PasswordHasher>,
    state: AppState,
}

impl TestBackend {
    pub fn new() -> Self {
        let clients = Arc::new(InMemoryClients::default());
        let leads = Arc::new(InMemoryLeads::default());
        let projects = Arc::new(InMemoryProjects::default());
        let tasks = Arc::new(InMemoryTasks::default());
        let contracts = Arc::new(InMemoryContracts::default());
        let transactions = Arc::new(InMemoryTransactions::default());
        let members = Arc::new(InMemoryMembers::default());
        let meetings = Arc::new(InMemoryMeetings::default());
        let suggestions = Arc::new(InMemorySuggestions::default());
        let finance = Arc::new(InMemoryFinance {
            projects: projects.clone(),
            transactions: transactions.clone(),
            contracts: contracts.clone(),
        });
        let tokens = Arc::new(TokenService::new("wiring-test-secret", Duration::from_secs(3600)));
        // Low iteration count keeps the seeded logins fast.
        let passwords = Arc::new(PasswordHasher::with_iterations(10));

        let state = AppState {
            clients: clients.clone(),
            leads: leads.clone(),
            projects: projects.clone(),
            tasks: tasks.clone(),
            contracts: contracts.clone(),
            transactions: transactions.clone(),
            members: members.clone(),
            meetings: meetings.clone(),
            suggestions: suggestions.clone(),
            finance,
            tokens: tokens.clone(),
            passwords: passwords.clone(),
        };

        Self {
            clients,
            leads,
            projects,
            tasks,
            contracts,
            transactions,
            members,
            meetings,
            suggestions,
            tokens,
            passwords,
            state,
        }
    }

    pub fn router(&self) -> Router {
        api_router(self.state.clone(), &ServerConfig::default())
    }

    pub async fn seed_member(&self, email: &str, password: &str, roles: &[Role]) -> Member {
        self.seed_member_with_active(email, password, roles, true).await
    }

    pub async fn seed_member_with_active(
        &self,
        email: &str,
        password: &str,
        roles: &[Role],
        active: bool,
    ) -> Member {
        let member = Member::new(
            MemberId::new(),
            MemberDetails {
                name: "Test Member".to_string(),
                email: email.to_string(),
                roles: roles.iter().copied().collect(),
                active,
            },
            self.passwords.hash(password),
        )
        .unwrap();
        self.members.save(&member).await.unwrap();
        member
    }

    pub fn token_for(&self, member: &Member) -> String {
        self.tokens.issue(member).unwrap()
    }
}

// ---------------------------------------------------------------------------
// Request helper
// ---------------------------------------------------------------------------

/// Sends one request through the router and decodes the JSON body (Null for
/// empty bodies, e.g. 204 responses).
pub async fn send(
    router: Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder()
        .method(Method::from_bytes(method.as_bytes()).unwrap())
        .uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}
