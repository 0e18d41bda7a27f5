//! Client repository port.

use async_trait::async_trait;

use crate::domain::client::Client;
use crate::domain::foundation::{ClientId, DomainError};

/// Persistence contract for [`Client`] records.
#[async_trait]
pub trait ClientRepository: Send + Sync {
    /// Saves a new client.
    async fn save(&self, client: &Client) -> Result<(), DomainError>;

    /// Updates an existing client.
    ///
    /// # Errors
    ///
    /// - `ClientNotFound` if the client doesn't exist
    async fn update(&self, client: &Client) -> Result<(), DomainError>;

    /// Finds a client by id. Returns `None` if not found.
    async fn find_by_id(&self, id: &ClientId) -> Result<Option<Client>, DomainError>;

    /// Lists all clients ordered by name.
    async fn list(&self) -> Result<Vec<Client>, DomainError>;

    /// Deletes a client.
    ///
    /// # Errors
    ///
    /// - `ClientNotFound` if the client doesn't exist
    async fn delete(&self, id: &ClientId) -> Result<(), DomainError>;
}
