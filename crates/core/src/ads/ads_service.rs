use async_trait::async_trait;
use chrono::Local;
use log::info;
use std::sync::Arc;

use super::ads_model::{AdFilter, AdInput, AdWithClient, GeneratedAd};
use super::ads_traits::{AdRepositoryTrait, AdServiceTrait};
use crate::clients::ClientRepositoryTrait;
use crate::errors::{Error, Result};
use crate::RecordId;

pub struct AdService {
    repository: Arc<dyn AdRepositoryTrait>,
    client_repository: Arc<dyn ClientRepositoryTrait>,
}

impl AdService {
    pub fn new(
        repository: Arc<dyn AdRepositoryTrait>,
        client_repository: Arc<dyn ClientRepositoryTrait>,
    ) -> Self {
        Self {
            repository,
            client_repository,
        }
    }

    fn ensure_client(&self, owner: RecordId, client_id: Option<RecordId>) -> Result<()> {
        match client_id {
            Some(id) if self.client_repository.find(owner, id)?.is_none() => {
                Err(Error::not_found("Client"))
            }
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl AdServiceTrait for AdService {
    fn list_ads(&self, owner: RecordId, filter: AdFilter) -> Result<Vec<AdWithClient>> {
        self.repository.list(owner, &filter)
    }

    fn get_ad(&self, owner: RecordId, id: RecordId) -> Result<AdWithClient> {
        self.repository
            .find(owner, id)?
            .ok_or_else(|| Error::not_found("Ad"))
    }

    async fn create_ad(&self, owner: RecordId, input: AdInput) -> Result<AdWithClient> {
        let new_ad = input.into_new(owner)?;
        self.ensure_client(owner, new_ad.client_id)?;
        let ad = self.repository.create(new_ad).await?;
        self.get_ad(owner, ad.id)
    }

    async fn update_ad(
        &self,
        owner: RecordId,
        id: RecordId,
        input: AdInput,
    ) -> Result<AdWithClient> {
        let mut ad = self.get_ad(owner, id)?.ad;
        self.ensure_client(owner, input.client_id)?;
        input.apply_to(&mut ad)?;
        self.repository.update(ad).await?;
        self.get_ad(owner, id)
    }

    async fn delete_ad(&self, owner: RecordId, id: RecordId) -> Result<()> {
        if self.repository.delete(owner, id).await? == 0 {
            return Err(Error::not_found("Ad"));
        }
        Ok(())
    }

    async fn save_generated(
        &self,
        owner: RecordId,
        generated: GeneratedAd,
    ) -> Result<AdWithClient> {
        self.ensure_client(owner, generated.client_id)?;
        let ad = self
            .repository
            .create(generated.into_new(owner, Local::now().date_naive()))
            .await?;
        info!("Stored AI generated ad {} for user {}", ad.id, owner);
        self.get_ad(owner, ad.id)
    }
}
