//! Data transfer objects for lead endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ClientId, LeadId, Timestamp};
use crate::domain::lead::{Lead, LeadDetails, LeadStatus};

use super::super::clients::dto::ClientResponse;

/// Create payload. New leads always start in the `new` status.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateLeadRequest {
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl CreateLeadRequest {
    pub fn into_details(self) -> LeadDetails {
        LeadDetails {
            name: self.name,
            email: self.email,
            phone: self.phone,
            company: self.company,
            source: self.source,
            notes: self.notes,
        }
    }
}

/// Update payload - the editable fields plus the pipeline status.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateLeadRequest {
    #[serde(flatten)]
    pub details: CreateLeadRequest,
    pub status: LeadStatus,
}

/// Lead as returned by the API.
#[derive(Debug, Clone, Serialize)]
pub struct LeadResponse {
    pub id: LeadId,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub source: Option<String>,
    pub notes: Option<String>,
    pub status: LeadStatus,
    pub converted_client_id: Option<ClientId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<&Lead> for LeadResponse {
    fn from(lead: &Lead) -> Self {
        Self {
            id: *lead.id(),
            name: lead.name().to_string(),
            email: lead.email().map(String::from),
            phone: lead.phone().map(String::from),
            company: lead.company().map(String::from),
            source: lead.source().map(String::from),
            notes: lead.notes().map(String::from),
            status: lead.status(),
            converted_client_id: lead.converted_client_id().copied(),
            created_at: *lead.created_at(),
            updated_at: *lead.updated_at(),
        }
    }
}

/// Response of the convert endpoint - the closed lead and the new client.
#[derive(Debug, Clone, Serialize)]
pub struct ConvertLeadResponse {
    pub lead: LeadResponse,
    pub client: ClientResponse,
}
