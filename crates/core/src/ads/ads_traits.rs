use async_trait::async_trait;

use super::ads_model::{Ad, AdFilter, AdInput, AdWithClient, GeneratedAd, NewAd};
use crate::errors::Result;
use crate::RecordId;

#[async_trait]
pub trait AdRepositoryTrait: Send + Sync {
    /// Owner's ads matching the filter, newest first.
    fn list(&self, owner: RecordId, filter: &AdFilter) -> Result<Vec<AdWithClient>>;
    fn find(&self, owner: RecordId, id: RecordId) -> Result<Option<AdWithClient>>;
    async fn create(&self, new_ad: NewAd) -> Result<Ad>;
    async fn update(&self, ad: Ad) -> Result<Ad>;
    async fn delete(&self, owner: RecordId, id: RecordId) -> Result<usize>;
}

#[async_trait]
pub trait AdServiceTrait: Send + Sync {
    fn list_ads(&self, owner: RecordId, filter: AdFilter) -> Result<Vec<AdWithClient>>;
    fn get_ad(&self, owner: RecordId, id: RecordId) -> Result<AdWithClient>;
    async fn create_ad(&self, owner: RecordId, input: AdInput) -> Result<AdWithClient>;
    async fn update_ad(&self, owner: RecordId, id: RecordId, input: AdInput)
        -> Result<AdWithClient>;
    async fn delete_ad(&self, owner: RecordId, id: RecordId) -> Result<()>;
    /// Stores AI output as a draft ad.
    async fn save_generated(&self, owner: RecordId, generated: GeneratedAd)
        -> Result<AdWithClient>;
}
