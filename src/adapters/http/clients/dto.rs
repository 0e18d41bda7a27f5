//! Data transfer objects for client endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::client::{Client, ClientDetails};
use crate::domain::foundation::{ClientId, Timestamp};

/// Create/update payload. The same shape serves both since every field of a
/// client is editable.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientPayload {
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl ClientPayload {
    pub fn into_details(self) -> ClientDetails {
        ClientDetails {
            name: self.name,
            email: self.email,
            phone: self.phone,
            company: self.company,
            notes: self.notes,
        }
    }
}

/// Client as returned by the API.
#[derive(Debug, Clone, Serialize)]
pub struct ClientResponse {
    pub id: ClientId,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<&Client> for ClientResponse {
    fn from(client: &Client) -> Self {
        Self {
            id: *client.id(),
            name: client.name().to_string(),
            email: client.email().map(String::from),
            phone: client.phone().map(String::from),
            company: client.company().map(String::from),
            notes: client.notes().map(String::from),
            created_at: *client.created_at(),
            updated_at: *client.updated_at(),
        }
    }
}
