//! Post history module - audit trail of social publishing attempts.

mod post_history_model;
mod post_history_service;
mod post_history_traits;

pub use post_history_model::{
    NewPostHistory, Platform, PostFilter, PostHistory, PostHistoryInput, PostStatus, PostWithAd,
};
pub use post_history_service::PostHistoryService;
pub use post_history_traits::{PostHistoryRepositoryTrait, PostHistoryServiceTrait};
