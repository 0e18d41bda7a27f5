//! Data transfer objects for contract endpoints.
//!
//! Money crosses the wire as integer cents.

use serde::{Deserialize, Serialize};

use crate::domain::contract::{Contract, ContractDetails, ContractStatus, Payment};
use crate::domain::foundation::{ClientId, ContractId, Money, PaymentId, ProjectId, Timestamp};

/// Create payload. Contracts start with no installments.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateContractRequest {
    pub client_id: ClientId,
    #[serde(default)]
    pub project_id: Option<ProjectId>,
    pub title: String,
    pub value_cents: i64,
    #[serde(default = "default_status")]
    pub status: ContractStatus,
    #[serde(default)]
    pub signed_at: Option<Timestamp>,
}

fn default_status() -> ContractStatus {
    ContractStatus::Draft
}

/// Update payload. Client and project links are fixed at creation.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateContractRequest {
    pub title: String,
    pub value_cents: i64,
    pub status: ContractStatus,
    #[serde(default)]
    pub signed_at: Option<Timestamp>,
}

impl UpdateContractRequest {
    pub fn into_details(self) -> ContractDetails {
        ContractDetails {
            title: self.title,
            value: Money::from_cents(self.value_cents),
            status: self.status,
            signed_at: self.signed_at,
        }
    }
}

/// Payload for adding an installment.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePaymentRequest {
    pub amount_cents: i64,
    pub due_date: Timestamp,
}

/// Payload for editing an installment or settling it.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdatePaymentRequest {
    pub amount_cents: i64,
    pub due_date: Timestamp,
    pub paid: bool,
}

/// Installment as returned by the API.
#[derive(Debug, Clone, Serialize)]
pub struct PaymentResponse {
    pub id: PaymentId,
    pub amount_cents: i64,
    pub due_date: Timestamp,
    pub paid: bool,
    pub paid_at: Option<Timestamp>,
}

impl From<&Payment> for PaymentResponse {
    fn from(payment: &Payment) -> Self {
        Self {
            id: *payment.id(),
            amount_cents: payment.amount().cents(),
            due_date: *payment.due_date(),
            paid: payment.is_paid(),
            paid_at: payment.paid_at().copied(),
        }
    }
}

/// Contract as returned by the API, installments included.
#[derive(Debug, Clone, Serialize)]
pub struct ContractResponse {
    pub id: ContractId,
    pub client_id: ClientId,
    pub project_id: Option<ProjectId>,
    pub title: String,
    pub value_cents: i64,
    pub status: ContractStatus,
    pub signed_at: Option<Timestamp>,
    pub payments: Vec<PaymentResponse>,
    pub installments_total_cents: i64,
    pub installments_paid_cents: i64,
    pub payment_progress: f64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<&Contract> for ContractResponse {
    fn from(contract: &Contract) -> Self {
        Self {
            id: *contract.id(),
            client_id: *contract.client_id(),
            project_id: contract.project_id().copied(),
            title: contract.title().to_string(),
            value_cents: contract.value().cents(),
            status: contract.status(),
            signed_at: contract.signed_at().copied(),
            payments: contract.payments().iter().map(PaymentResponse::from).collect(),
            installments_total_cents: contract.installments_total().cents(),
            installments_paid_cents: contract.installments_paid().cents(),
            payment_progress: contract.payment_progress(),
            created_at: *contract.created_at(),
            updated_at: *contract.updated_at(),
        }
    }
}
