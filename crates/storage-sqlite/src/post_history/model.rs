use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::utils::{ad_summary, now, AdColumns};
use pitchdesk_core::post_history::{NewPostHistory, PostHistory, PostWithAd};
use pitchdesk_core::utils::{enum_from_text, enum_to_text};

#[derive(Queryable, Identifiable, Selectable, Debug, Clone)]
#[diesel(table_name = crate::schema::post_history)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct PostHistoryDB {
    pub id: i32,
    pub ad_id: i32,
    pub platform: String,
    pub post_id: Option<String>,
    pub status: String,
    pub message: Option<String>,
    pub error: Option<String>,
    pub published_at: NaiveDateTime,
    pub created_by: i32,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = crate::schema::post_history)]
pub struct NewPostHistoryDB {
    pub ad_id: i32,
    pub platform: String,
    pub post_id: Option<String>,
    pub status: String,
    pub message: Option<String>,
    pub error: Option<String>,
    pub published_at: NaiveDateTime,
    pub created_by: i32,
}

impl From<PostHistoryDB> for PostHistory {
    fn from(db: PostHistoryDB) -> Self {
        Self {
            id: db.id,
            ad_id: db.ad_id,
            platform: enum_from_text(&db.platform),
            post_id: db.post_id,
            status: enum_from_text(&db.status),
            message: db.message,
            error: db.error,
            published_at: db.published_at,
            created_by: db.created_by,
        }
    }
}

pub fn post_with_ad((post, ad): (PostHistoryDB, Option<AdColumns>)) -> PostWithAd {
    PostWithAd {
        post: post.into(),
        ad: ad_summary(ad),
    }
}

impl From<NewPostHistory> for NewPostHistoryDB {
    fn from(domain: NewPostHistory) -> Self {
        Self {
            ad_id: domain.ad_id,
            platform: enum_to_text(&domain.platform),
            post_id: domain.post_id,
            status: enum_to_text(&domain.status),
            message: domain.message,
            error: domain.error,
            published_at: domain.published_at.unwrap_or_else(now),
            created_by: domain.created_by,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pitchdesk_core::post_history::{Platform, PostStatus};

    #[test]
    fn joined_ad_is_summarised() {
        let row = PostHistoryDB {
            id: 11,
            ad_id: 4,
            platform: "instagram".to_string(),
            post_id: Some("ig_1".to_string()),
            status: "success".to_string(),
            message: None,
            error: None,
            published_at: now(),
            created_by: 1,
        };

        let joined = post_with_ad((row.clone(), Some((4, "Spring sale".to_string(), None))));
        assert_eq!(joined.post.platform, Platform::Instagram);
        assert_eq!(joined.post.status, PostStatus::Success);
        assert_eq!(joined.ad.map(|ad| ad.title).as_deref(), Some("Spring sale"));

        assert!(post_with_ad((row, None)).ad.is_none());
    }
}
