//! Ads module - ad content, hand-written or AI generated.

mod ads_model;
mod ads_service;
mod ads_traits;

pub use ads_model::{
    generated_ad_title, Ad, AdContent, AdFilter, AdInput, AdStatus, AdSummary, AdType,
    AdWithClient, GeneratedAd, NewAd,
};
pub use ads_service::AdService;
pub use ads_traits::{AdRepositoryTrait, AdServiceTrait};
