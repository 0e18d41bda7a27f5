//! Lead aggregate - a prospect that may become a client.
//!
//! Leads move through a small status funnel and can be converted into a
//! [`Client`] exactly once; conversion keeps the lead around for funnel
//! reporting and records which client it produced.

use serde::{Deserialize, Serialize};

use crate::domain::client::{Client, ClientDetails};
use crate::domain::foundation::{
    ClientId, DomainError, ErrorCode, LeadId, Timestamp, ValidationError,
};

/// Funnel position of a lead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadStatus {
    New,
    Contacted,
    Qualified,
    Lost,
    Converted,
}

/// Editable lead fields.
#[derive(Debug, Clone, Default)]
pub struct LeadDetails {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub source: Option<String>,
    pub notes: Option<String>,
}

/// Lead record.
///
/// # Invariants
///
/// - `name` is non-empty
/// - `converted_client_id` is present iff status is `Converted`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lead {
    id: LeadId,
    name: String,
    email: Option<String>,
    phone: Option<String>,
    company: Option<String>,
    source: Option<String>,
    notes: Option<String>,
    status: LeadStatus,
    converted_client_id: Option<ClientId>,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Lead {
    /// Creates a new lead in the `New` status.
    pub fn new(id: LeadId, details: LeadDetails) -> Result<Self, DomainError> {
        validate_details(&details)?;
        let now = Timestamp::now();
        Ok(Self {
            id,
            name: details.name,
            email: details.email,
            phone: details.phone,
            company: details.company,
            source: details.source,
            notes: details.notes,
            status: LeadStatus::New,
            converted_client_id: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// Reconstitutes a lead from persistence (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: LeadId,
        details: LeadDetails,
        status: LeadStatus,
        converted_client_id: Option<ClientId>,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            name: details.name,
            email: details.email,
            phone: details.phone,
            company: details.company,
            source: details.source,
            notes: details.notes,
            status,
            converted_client_id,
            created_at,
            updated_at,
        }
    }

    /// Replaces the editable fields and funnel status.
    ///
    /// The `Converted` status can only be reached through [`Lead::convert`].
    pub fn update(&mut self, details: LeadDetails, status: LeadStatus) -> Result<(), DomainError> {
        validate_details(&details)?;
        if self.status == LeadStatus::Converted {
            return Err(DomainError::new(
                ErrorCode::AlreadyConverted,
                "Converted leads can no longer be edited",
            ));
        }
        if status == LeadStatus::Converted {
            return Err(DomainError::new(
                ErrorCode::InvalidStateTransition,
                "Use the convert operation to mark a lead converted",
            ));
        }
        self.name = details.name;
        self.email = details.email;
        self.phone = details.phone;
        self.company = details.company;
        self.source = details.source;
        self.notes = details.notes;
        self.status = status;
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Converts this lead into a client, marking the lead `Converted`.
    ///
    /// # Errors
    ///
    /// - `AlreadyConverted` if the lead was converted before
    /// - `InvalidStateTransition` if the lead was marked lost
    pub fn convert(&mut self, client_id: ClientId) -> Result<Client, DomainError> {
        match self.status {
            LeadStatus::Converted => {
                return Err(DomainError::new(
                    ErrorCode::AlreadyConverted,
                    format!("Lead already converted: {}", self.id),
                ))
            }
            LeadStatus::Lost => {
                return Err(DomainError::new(
                    ErrorCode::InvalidStateTransition,
                    "Lost leads cannot be converted",
                ))
            }
            _ => {}
        }

        let client = Client::new(
            client_id,
            ClientDetails {
                name: self.name.clone(),
                email: self.email.clone(),
                phone: self.phone.clone(),
                company: self.company.clone(),
                notes: self.notes.clone(),
            },
        )?;

        self.status = LeadStatus::Converted;
        self.converted_client_id = Some(client_id);
        self.updated_at = Timestamp::now();
        Ok(client)
    }

    pub fn id(&self) -> &LeadId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }

    pub fn company(&self) -> Option<&str> {
        self.company.as_deref()
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    pub fn status(&self) -> LeadStatus {
        self.status
    }

    pub fn converted_client_id(&self) -> Option<&ClientId> {
        self.converted_client_id.as_ref()
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }
}

fn validate_details(details: &LeadDetails) -> Result<(), DomainError> {
    if details.name.trim().is_empty() {
        return Err(ValidationError::empty_field("name").into());
    }
    if let Some(email) = &details.email {
        if !email.contains('@') {
            return Err(ValidationError::invalid_format("email", "missing @ symbol").into());
        }
    }
    Ok(())
}
