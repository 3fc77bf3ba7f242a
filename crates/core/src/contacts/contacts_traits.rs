use async_trait::async_trait;

use super::contacts_model::{ContactInput, CustomerContact, NewCustomerContact};
use crate::errors::Result;
use crate::RecordId;

#[async_trait]
pub trait ContactRepositoryTrait: Send + Sync {
    /// Contacts of one client, newest first. `ids` narrows the selection.
    fn list_for_client(
        &self,
        owner: RecordId,
        client_id: RecordId,
        ids: Option<&[RecordId]>,
    ) -> Result<Vec<CustomerContact>>;
    fn find(&self, owner: RecordId, id: RecordId) -> Result<Option<CustomerContact>>;
    async fn create_many(&self, contacts: Vec<NewCustomerContact>) -> Result<Vec<CustomerContact>>;
    async fn update(&self, contact: CustomerContact) -> Result<CustomerContact>;
    async fn delete(&self, owner: RecordId, id: RecordId) -> Result<usize>;
}

#[async_trait]
pub trait ContactServiceTrait: Send + Sync {
    fn list_contacts(&self, owner: RecordId, client_id: Option<RecordId>)
        -> Result<Vec<CustomerContact>>;
    fn get_contact(&self, owner: RecordId, id: RecordId) -> Result<CustomerContact>;
    async fn create_contact(&self, owner: RecordId, input: ContactInput) -> Result<CustomerContact>;
    /// Creates every contact under `client_id`; the batch is all-or-nothing.
    async fn bulk_create(
        &self,
        owner: RecordId,
        client_id: Option<RecordId>,
        contacts: Option<Vec<ContactInput>>,
    ) -> Result<Vec<CustomerContact>>;
    async fn update_contact(
        &self,
        owner: RecordId,
        id: RecordId,
        input: ContactInput,
    ) -> Result<CustomerContact>;
    async fn delete_contact(&self, owner: RecordId, id: RecordId) -> Result<()>;
}
