use async_trait::async_trait;
use log::debug;
use std::sync::Arc;

use super::clients_model::{Client, ClientInput};
use super::clients_traits::{ClientRepositoryTrait, ClientServiceTrait};
use crate::errors::{Error, Result};
use crate::RecordId;

/// Service for managing clients
pub struct ClientService {
    repository: Arc<dyn ClientRepositoryTrait>,
}

impl ClientService {
    pub fn new(repository: Arc<dyn ClientRepositoryTrait>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl ClientServiceTrait for ClientService {
    fn list_clients(&self, owner: RecordId) -> Result<Vec<Client>> {
        self.repository.list(owner)
    }

    fn get_client(&self, owner: RecordId, id: RecordId) -> Result<Client> {
        self.repository
            .find(owner, id)?
            .ok_or_else(|| Error::not_found("Client"))
    }

    async fn create_client(&self, owner: RecordId, input: ClientInput) -> Result<Client> {
        let new_client = input.into_new(owner)?;
        debug!("Creating client '{}' for user {}", new_client.name, owner);
        self.repository.create(new_client).await
    }

    async fn update_client(
        &self,
        owner: RecordId,
        id: RecordId,
        input: ClientInput,
    ) -> Result<Client> {
        let mut client = self.get_client(owner, id)?;
        input.apply_to(&mut client)?;
        self.repository.update(client).await
    }

    async fn delete_client(&self, owner: RecordId, id: RecordId) -> Result<()> {
        if self.repository.delete(owner, id).await? == 0 {
            return Err(Error::not_found("Client"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::MemoryStore;

    #[tokio::test]
    async fn crud_is_scoped_to_owner() {
        let store = Arc::new(MemoryStore::new());
        let service = ClientService::new(store.clone());
        let input: ClientInput = serde_json::from_str(
            r#"{"name":"Acme","phoneNumber":"+1","email":"a@x.io","tags":["retail"]}"#,
        )
        .unwrap();
        let client = service.create_client(1, input).await.unwrap();

        assert!(service.get_client(2, client.id).is_err());
        let err = service.delete_client(2, client.id).await.unwrap_err();
        assert_eq!(err.to_string(), "Client not found");

        let update: ClientInput = serde_json::from_str(r#"{"phoneNumber":"+2"}"#).unwrap();
        let updated = service.update_client(1, client.id, update).await.unwrap();
        assert_eq!(updated.phone_number, "+2");
        assert_eq!(updated.tags, vec!["retail".to_string()]);

        service.delete_client(1, client.id).await.unwrap();
        assert!(service.list_clients(1).unwrap().is_empty());
    }
}
