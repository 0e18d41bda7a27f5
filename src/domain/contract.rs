//! Contract aggregate with its payment installments.
//!
//! Installments are owned by the contract: they are loaded and saved with it
//! and never referenced from outside. Paid progress is always derived from
//! the installment rows, never stored.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    ClientId, ContractId, DomainError, ErrorCode, Money, PaymentId, ProjectId, Timestamp,
    ValidationError,
};

/// Contract lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContractStatus {
    Draft,
    Active,
    Completed,
    Cancelled,
}

/// One payment installment of a contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    id: PaymentId,
    amount: Money,
    due_date: Timestamp,
    paid: bool,
    paid_at: Option<Timestamp>,
}

impl Payment {
    /// Creates an unpaid installment.
    pub fn new(id: PaymentId, amount: Money, due_date: Timestamp) -> Result<Self, DomainError> {
        if !amount.is_positive() {
            return Err(DomainError::validation(
                "amount",
                "Installment amount must be positive",
            ));
        }
        Ok(Self {
            id,
            amount,
            due_date,
            paid: false,
            paid_at: None,
        })
    }

    /// Reconstitutes an installment from persistence.
    pub fn reconstitute(
        id: PaymentId,
        amount: Money,
        due_date: Timestamp,
        paid: bool,
        paid_at: Option<Timestamp>,
    ) -> Self {
        Self {
            id,
            amount,
            due_date,
            paid,
            paid_at,
        }
    }

    pub fn id(&self) -> &PaymentId {
        &self.id
    }

    pub fn amount(&self) -> Money {
        self.amount
    }

    pub fn due_date(&self) -> &Timestamp {
        &self.due_date
    }

    pub fn is_paid(&self) -> bool {
        self.paid
    }

    pub fn paid_at(&self) -> Option<&Timestamp> {
        self.paid_at.as_ref()
    }
}

/// Editable contract fields.
#[derive(Debug, Clone)]
pub struct ContractDetails {
    pub title: String,
    pub value: Money,
    pub status: ContractStatus,
    pub signed_at: Option<Timestamp>,
}

/// Contract record.
///
/// # Invariants
///
/// - `title` is non-empty
/// - `value` is positive
/// - installment amounts are positive
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contract {
    id: ContractId,
    client_id: ClientId,
    project_id: Option<ProjectId>,
    title: String,
    value: Money,
    status: ContractStatus,
    signed_at: Option<Timestamp>,
    payments: Vec<Payment>,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Contract {
    /// Creates a new draft contract with no installments.
    pub fn new(
        id: ContractId,
        client_id: ClientId,
        project_id: Option<ProjectId>,
        details: ContractDetails,
    ) -> Result<Self, DomainError> {
        validate_details(&details)?;
        let now = Timestamp::now();
        Ok(Self {
            id,
            client_id,
            project_id,
            title: details.title,
            value: details.value,
            status: details.status,
            signed_at: details.signed_at,
            payments: Vec::new(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Reconstitutes a contract from persistence (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: ContractId,
        client_id: ClientId,
        project_id: Option<ProjectId>,
        details: ContractDetails,
        payments: Vec<Payment>,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            client_id,
            project_id,
            title: details.title,
            value: details.value,
            status: details.status,
            signed_at: details.signed_at,
            payments,
            created_at,
            updated_at,
        }
    }

    /// Replaces the editable fields.
    pub fn update(&mut self, details: ContractDetails) -> Result<(), DomainError> {
        validate_details(&details)?;
        self.title = details.title;
        self.value = details.value;
        self.status = details.status;
        self.signed_at = details.signed_at;
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Adds an installment.
    pub fn add_payment(
        &mut self,
        id: PaymentId,
        amount: Money,
        due_date: Timestamp,
    ) -> Result<&Payment, DomainError> {
        let payment = Payment::new(id, amount, due_date)?;
        self.payments.push(payment);
        self.updated_at = Timestamp::now();
        Ok(self.payments.last().unwrap_or_else(|| unreachable!()))
    }

    /// Edits an installment's amount and due date, and settles or reopens it.
    pub fn update_payment(
        &mut self,
        payment_id: &PaymentId,
        amount: Money,
        due_date: Timestamp,
        paid: bool,
    ) -> Result<(), DomainError> {
        if !amount.is_positive() {
            return Err(DomainError::validation(
                "amount",
                "Installment amount must be positive",
            ));
        }
        let payment = self
            .payments
            .iter_mut()
            .find(|p| p.id() == payment_id)
            .ok_or_else(|| payment_not_found(payment_id))?;

        payment.amount = amount;
        payment.due_date = due_date;
        if paid && !payment.paid {
            payment.paid = true;
            payment.paid_at = Some(Timestamp::now());
        } else if !paid {
            payment.paid = false;
            payment.paid_at = None;
        }
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Removes an installment.
    pub fn remove_payment(&mut self, payment_id: &PaymentId) -> Result<(), DomainError> {
        let before = self.payments.len();
        self.payments.retain(|p| p.id() != payment_id);
        if self.payments.len() == before {
            return Err(payment_not_found(payment_id));
        }
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Sum of all installment amounts.
    pub fn installments_total(&self) -> Money {
        self.payments.iter().map(Payment::amount).sum()
    }

    /// Sum of the paid installment amounts.
    pub fn installments_paid(&self) -> Money {
        self.payments
            .iter()
            .filter(|p| p.is_paid())
            .map(Payment::amount)
            .sum()
    }

    /// Paid fraction of the scheduled installments, in [0, 1].
    pub fn payment_progress(&self) -> f64 {
        self.installments_paid().ratio_of(self.installments_total())
    }

    pub fn id(&self) -> &ContractId {
        &self.id
    }

    pub fn client_id(&self) -> &ClientId {
        &self.client_id
    }

    pub fn project_id(&self) -> Option<&ProjectId> {
        self.project_id.as_ref()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn value(&self) -> Money {
        self.value
    }

    pub fn status(&self) -> ContractStatus {
        self.status
    }

    pub fn signed_at(&self) -> Option<&Timestamp> {
        self.signed_at.as_ref()
    }

    pub fn payments(&self) -> &[Payment] {
        &self.payments
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }
}

fn validate_details(details: &ContractDetails) -> Result<(), DomainError> {
    if details.title.trim().is_empty() {
        return Err(ValidationError::empty_field("title").into());
    }
    if !details.value.is_positive() {
        return Err(DomainError::validation(
            "value",
            "Contract value must be positive",
        ));
    }
    Ok(())
}

fn payment_not_found(id: &PaymentId) -> DomainError {
    DomainError::new(ErrorCode::PaymentNotFound, format!("Payment not found: {}", id))
}
