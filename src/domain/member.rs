//! Member aggregate - a staff login with role-based access.
//!
//! Password policy (length >= 6) is enforced where the plaintext is still
//! visible: the auth adapter hashes only after the member module accepts it.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, ErrorCode, MemberId, Timestamp, ValidationError};

/// Minimum plaintext password length.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Access roles. A member holds at least one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Finance,
    Projects,
    Sales,
}

/// Editable member fields (password handled separately).
#[derive(Debug, Clone)]
pub struct MemberDetails {
    pub name: String,
    pub email: String,
    pub roles: BTreeSet<Role>,
    pub active: bool,
}

/// Staff member record.
///
/// # Invariants
///
/// - `name` is non-empty
/// - `email` contains an `@` (uniqueness is a storage concern)
/// - `roles` is non-empty
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    id: MemberId,
    name: String,
    email: String,
    password_hash: String,
    roles: BTreeSet<Role>,
    active: bool,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Member {
    /// Creates a new active member with an already-hashed password.
    pub fn new(
        id: MemberId,
        details: MemberDetails,
        password_hash: String,
    ) -> Result<Self, DomainError> {
        validate_details(&details)?;
        let now = Timestamp::now();
        Ok(Self {
            id,
            name: details.name,
            email: details.email,
            password_hash,
            roles: details.roles,
            active: details.active,
            created_at: now,
            updated_at: now,
        })
    }

    /// Reconstitutes a member from persistence (no validation).
    pub fn reconstitute(
        id: MemberId,
        details: MemberDetails,
        password_hash: String,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            name: details.name,
            email: details.email,
            password_hash,
            roles: details.roles,
            active: details.active,
            created_at,
            updated_at,
        }
    }

    /// Replaces the editable fields.
    pub fn update(&mut self, details: MemberDetails) -> Result<(), DomainError> {
        validate_details(&details)?;
        self.name = details.name;
        self.email = details.email;
        self.roles = details.roles;
        self.active = details.active;
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Replaces the stored password hash.
    pub fn set_password_hash(&mut self, password_hash: String) {
        self.password_hash = password_hash;
        self.updated_at = Timestamp::now();
    }

    /// True when the member holds the role, or is an admin.
    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&Role::Admin) || self.roles.contains(&role)
    }

    pub fn id(&self) -> &MemberId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    pub fn roles(&self) -> &BTreeSet<Role> {
        &self.roles
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }
}

/// Checks the plaintext password policy at the edge, before hashing.
pub fn validate_password(plaintext: &str) -> Result<(), DomainError> {
    if plaintext.len() < MIN_PASSWORD_LENGTH {
        return Err(ValidationError::out_of_range(
            "password",
            MIN_PASSWORD_LENGTH as i64,
            i64::MAX,
            plaintext.len() as i64,
        )
        .into());
    }
    Ok(())
}

fn validate_details(details: &MemberDetails) -> Result<(), DomainError> {
    if details.name.trim().is_empty() {
        return Err(ValidationError::empty_field("name").into());
    }
    if !details.email.contains('@') {
        return Err(ValidationError::invalid_format("email", "missing @ symbol").into());
    }
    if details.roles.is_empty() {
        return Err(DomainError::new(
            ErrorCode::ValidationFailed,
            "At least one role must be selected",
        ));
    }
    Ok(())
}
