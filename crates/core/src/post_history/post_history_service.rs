use async_trait::async_trait;
use std::sync::Arc;

use super::post_history_model::{PostFilter, PostHistoryInput, PostWithAd};
use super::post_history_traits::{PostHistoryRepositoryTrait, PostHistoryServiceTrait};
use crate::ads::AdRepositoryTrait;
use crate::errors::{Error, Result};
use crate::RecordId;

pub struct PostHistoryService {
    repository: Arc<dyn PostHistoryRepositoryTrait>,
    ad_repository: Arc<dyn AdRepositoryTrait>,
}

impl PostHistoryService {
    pub fn new(
        repository: Arc<dyn PostHistoryRepositoryTrait>,
        ad_repository: Arc<dyn AdRepositoryTrait>,
    ) -> Self {
        Self {
            repository,
            ad_repository,
        }
    }
}

#[async_trait]
impl PostHistoryServiceTrait for PostHistoryService {
    fn list_posts(&self, owner: RecordId, filter: PostFilter) -> Result<Vec<PostWithAd>> {
        self.repository.list(owner, &filter)
    }

    fn get_post(&self, owner: RecordId, id: RecordId) -> Result<PostWithAd> {
        self.repository
            .find(owner, id)?
            .ok_or_else(|| Error::not_found("Post"))
    }

    async fn create_post(&self, owner: RecordId, input: PostHistoryInput) -> Result<PostWithAd> {
        let entry = input.into_new(owner)?;
        if self.ad_repository.find(owner, entry.ad_id)?.is_none() {
            return Err(Error::not_found("Ad"));
        }
        let post = self.repository.create(entry).await?;
        self.get_post(owner, post.id)
    }
}
