use async_trait::async_trait;

use super::post_history_model::{
    NewPostHistory, PostFilter, PostHistory, PostHistoryInput, PostWithAd,
};
use crate::errors::Result;
use crate::RecordId;

#[async_trait]
pub trait PostHistoryRepositoryTrait: Send + Sync {
    /// Owner's entries matching the filter, most recently published first.
    fn list(&self, owner: RecordId, filter: &PostFilter) -> Result<Vec<PostWithAd>>;
    fn find(&self, owner: RecordId, id: RecordId) -> Result<Option<PostWithAd>>;
    async fn create(&self, entry: NewPostHistory) -> Result<PostHistory>;
}

#[async_trait]
pub trait PostHistoryServiceTrait: Send + Sync {
    fn list_posts(&self, owner: RecordId, filter: PostFilter) -> Result<Vec<PostWithAd>>;
    fn get_post(&self, owner: RecordId, id: RecordId) -> Result<PostWithAd>;
    async fn create_post(&self, owner: RecordId, input: PostHistoryInput) -> Result<PostWithAd>;
}
