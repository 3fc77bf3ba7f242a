use async_trait::async_trait;
use log::debug;
use std::sync::Arc;

use super::contacts_model::{ContactInput, CustomerContact};
use super::contacts_traits::{ContactRepositoryTrait, ContactServiceTrait};
use crate::clients::ClientRepositoryTrait;
use crate::errors::{Error, Result, ValidationError};
use crate::RecordId;

const NOT_FOUND: &str = "Customer contact";

pub struct ContactService {
    repository: Arc<dyn ContactRepositoryTrait>,
    client_repository: Arc<dyn ClientRepositoryTrait>,
}

impl ContactService {
    pub fn new(
        repository: Arc<dyn ContactRepositoryTrait>,
        client_repository: Arc<dyn ClientRepositoryTrait>,
    ) -> Self {
        Self {
            repository,
            client_repository,
        }
    }

    /// Contacts may only hang off clients the caller owns.
    fn ensure_client(&self, owner: RecordId, client_id: RecordId) -> Result<()> {
        self.client_repository
            .find(owner, client_id)?
            .map(|_| ())
            .ok_or_else(|| Error::not_found("Client"))
    }
}

#[async_trait]
impl ContactServiceTrait for ContactService {
    fn list_contacts(
        &self,
        owner: RecordId,
        client_id: Option<RecordId>,
    ) -> Result<Vec<CustomerContact>> {
        let client_id =
            client_id.ok_or_else(|| ValidationError::MissingField("clientId".to_string()))?;
        self.repository.list_for_client(owner, client_id, None)
    }

    fn get_contact(&self, owner: RecordId, id: RecordId) -> Result<CustomerContact> {
        self.repository
            .find(owner, id)?
            .ok_or_else(|| Error::not_found(NOT_FOUND))
    }

    async fn create_contact(&self, owner: RecordId, input: ContactInput) -> Result<CustomerContact> {
        let new_contact = input.into_new(owner)?;
        self.ensure_client(owner, new_contact.client_id)?;
        let mut created = self.repository.create_many(vec![new_contact]).await?;
        created
            .pop()
            .ok_or_else(|| Error::Unexpected("contact insert returned no row".to_string()))
    }

    async fn bulk_create(
        &self,
        owner: RecordId,
        client_id: Option<RecordId>,
        contacts: Option<Vec<ContactInput>>,
    ) -> Result<Vec<CustomerContact>> {
        let (Some(client_id), Some(contacts)) = (client_id, contacts) else {
            return Err(ValidationError::InvalidInput(
                "clientId and contacts array are required".to_string(),
            )
            .into());
        };
        self.ensure_client(owner, client_id)?;

        let new_contacts = contacts
            .into_iter()
            .map(|mut input| {
                input.client_id = Some(client_id);
                input.into_new(owner)
            })
            .collect::<Result<Vec<_>>>()?;
        debug!(
            "Bulk creating {} contacts for client {}",
            new_contacts.len(),
            client_id
        );
        self.repository.create_many(new_contacts).await
    }

    async fn update_contact(
        &self,
        owner: RecordId,
        id: RecordId,
        input: ContactInput,
    ) -> Result<CustomerContact> {
        let mut contact = self.get_contact(owner, id)?;
        if let Some(client_id) = input.client_id {
            self.ensure_client(owner, client_id)?;
        }
        input.apply_to(&mut contact)?;
        self.repository.update(contact).await
    }

    async fn delete_contact(&self, owner: RecordId, id: RecordId) -> Result<()> {
        if self.repository.delete(owner, id).await? == 0 {
            return Err(Error::not_found(NOT_FOUND));
        }
        Ok(())
    }
}
