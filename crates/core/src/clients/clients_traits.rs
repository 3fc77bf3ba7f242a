use async_trait::async_trait;

use super::clients_model::{Client, ClientInput, NewClient};
use crate::errors::Result;
use crate::RecordId;

/// Trait for client repository operations. Every lookup is scoped to an owner.
#[async_trait]
pub trait ClientRepositoryTrait: Send + Sync {
    /// Owner's clients, newest first.
    fn list(&self, owner: RecordId) -> Result<Vec<Client>>;
    fn find(&self, owner: RecordId, id: RecordId) -> Result<Option<Client>>;
    async fn create(&self, new_client: NewClient) -> Result<Client>;
    async fn update(&self, client: Client) -> Result<Client>;
    /// Deletes the client and, by cascade, its customer contacts.
    async fn delete(&self, owner: RecordId, id: RecordId) -> Result<usize>;
}

/// Trait for client service operations
#[async_trait]
pub trait ClientServiceTrait: Send + Sync {
    fn list_clients(&self, owner: RecordId) -> Result<Vec<Client>>;
    fn get_client(&self, owner: RecordId, id: RecordId) -> Result<Client>;
    async fn create_client(&self, owner: RecordId, input: ClientInput) -> Result<Client>;
    async fn update_client(&self, owner: RecordId, id: RecordId, input: ClientInput)
        -> Result<Client>;
    async fn delete_client(&self, owner: RecordId, id: RecordId) -> Result<()>;
}
