//! Client aggregate - a company or person the studio does work for.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ClientId, DomainError, Timestamp, ValidationError};

/// Maximum length for a client name.
pub const MAX_NAME_LENGTH: usize = 200;

/// Editable client fields, shared between create and update paths.
#[derive(Debug, Clone, Default)]
pub struct ClientDetails {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub notes: Option<String>,
}

/// Client record.
///
/// # Invariants
///
/// - `name` is non-empty and at most 200 characters
/// - `email`, when present, contains an `@`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    id: ClientId,
    name: String,
    email: Option<String>,
    phone: Option<String>,
    company: Option<String>,
    notes: Option<String>,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Client {
    /// Creates a new client.
    pub fn new(id: ClientId, details: ClientDetails) -> Result<Self, DomainError> {
        validate_details(&details)?;
        let now = Timestamp::now();
        Ok(Self {
            id,
            name: details.name,
            email: details.email,
            phone: details.phone,
            company: details.company,
            notes: details.notes,
            created_at: now,
            updated_at: now,
        })
    }

    /// Reconstitutes a client from persistence (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: ClientId,
        name: String,
        email: Option<String>,
        phone: Option<String>,
        company: Option<String>,
        notes: Option<String>,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            name,
            email,
            phone,
            company,
            notes,
            created_at,
            updated_at,
        }
    }

    /// Replaces the editable fields.
    pub fn update(&mut self, details: ClientDetails) -> Result<(), DomainError> {
        validate_details(&details)?;
        self.name = details.name;
        self.email = details.email;
        self.phone = details.phone;
        self.company = details.company;
        self.notes = details.notes;
        self.updated_at = Timestamp::now();
        Ok(())
    }

    pub fn id(&self) -> &ClientId {
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

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }
}

fn validate_details(details: &ClientDetails) -> Result<(), DomainError> {
    if details.name.trim().is_empty() {
        return Err(ValidationError::empty_field("name").into());
    }
    if details.name.len() > MAX_NAME_LENGTH {
        return Err(ValidationError::out_of_range(
            "name",
            1,
            MAX_NAME_LENGTH as i64,
            details.name.len() as i64,
        )
        .into());
    }
    if let Some(email) = &details.email {
        if !email.contains('@') {
            return Err(ValidationError::invalid_format("email", "missing @ symbol").into());
        }
    }
    Ok(())
}
