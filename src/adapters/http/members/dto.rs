//! Data transfer objects for member endpoints.
//!
//! The password hash never leaves the server; responses carry only the
//! public profile.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{MemberId, Timestamp};
use crate::domain::member::{Member, MemberDetails, Role};

/// Create payload. The plaintext password is validated and hashed at the
/// edge, then discarded.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateMemberRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub roles: BTreeSet<Role>,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

/// Update payload. `password`, when present, resets the credential.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateMemberRequest {
    pub name: String,
    pub email: String,
    pub roles: BTreeSet<Role>,
    pub active: bool,
    #[serde(default)]
    pub password: Option<String>,
}

impl UpdateMemberRequest {
    pub fn details(&self) -> MemberDetails {
        MemberDetails {
            name: self.name.clone(),
            email: self.email.clone(),
            roles: self.roles.clone(),
            active: self.active,
        }
    }
}

/// Member as returned by the API.
#[derive(Debug, Clone, Serialize)]
pub struct MemberResponse {
    pub id: MemberId,
    pub name: String,
    pub email: String,
    pub roles: BTreeSet<Role>,
    pub active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<&Member> for MemberResponse {
    fn from(member: &Member) -> Self {
        Self {
            id: *member.id(),
            name: member.name().to_string(),
            email: member.email().to_string(),
            roles: member.roles().clone(),
            active: member.is_active(),
            created_at: *member.created_at(),
            updated_at: *member.updated_at(),
        }
    }
}
