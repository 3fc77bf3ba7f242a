//! Database model for ads. The nested content object is stored as three columns.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::utils::{client_summary, decode_list, encode_list, now, ClientColumns};
use pitchdesk_core::ads::{Ad, AdContent, AdWithClient, NewAd};
use pitchdesk_core::utils::{enum_from_text, enum_to_text};

#[derive(Queryable, Identifiable, Selectable, AsChangeset, Debug, Clone)]
#[diesel(table_name = crate::schema::ads)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[diesel(treat_none_as_null = true)]
pub struct AdDB {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub ad_type: String,
    pub ai_generated: bool,
    pub ai_prompt: Option<String>,
    pub content_images: String,
    pub content_videos: String,
    pub content_text: String,
    pub status: String,
    pub client_id: Option<i32>,
    pub created_by: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = crate::schema::ads)]
pub struct NewAdDB {
    pub title: String,
    pub description: Option<String>,
    pub ad_type: String,
    pub ai_generated: bool,
    pub ai_prompt: Option<String>,
    pub content_images: String,
    pub content_videos: String,
    pub content_text: String,
    pub status: String,
    pub client_id: Option<i32>,
    pub created_by: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<AdDB> for Ad {
    fn from(db: AdDB) -> Self {
        Self {
            id: db.id,
            title: db.title,
            description: db.description,
            ad_type: enum_from_text(&db.ad_type),
            ai_generated: db.ai_generated,
            ai_prompt: db.ai_prompt,
            content: AdContent {
                images: decode_list(&db.content_images),
                videos: decode_list(&db.content_videos),
                text: db.content_text,
            },
            status: enum_from_text(&db.status),
            client_id: db.client_id,
            created_by: db.created_by,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}

/// Joins an ad row with the columns of its client, when present.
pub fn ad_with_client((ad, client): (AdDB, Option<ClientColumns>)) -> AdWithClient {
    AdWithClient {
        ad: ad.into(),
        client: client_summary(client),
    }
}

impl From<Ad> for AdDB {
    fn from(domain: Ad) -> Self {
        Self {
            id: domain.id,
            title: domain.title,
            description: domain.description,
            ad_type: enum_to_text(&domain.ad_type),
            ai_generated: domain.ai_generated,
            ai_prompt: domain.ai_prompt,
            content_images: encode_list(&domain.content.images),
            content_videos: encode_list(&domain.content.videos),
            content_text: domain.content.text,
            status: enum_to_text(&domain.status),
            client_id: domain.client_id,
            created_by: domain.created_by,
            created_at: domain.created_at,
            updated_at: now(),
        }
    }
}

impl From<NewAd> for NewAdDB {
    fn from(domain: NewAd) -> Self {
        let timestamp = now();
        Self {
            title: domain.title,
            description: domain.description,
            ad_type: enum_to_text(&domain.ad_type),
            ai_generated: domain.ai_generated,
            ai_prompt: domain.ai_prompt,
            content_images: encode_list(&domain.content.images),
            content_videos: encode_list(&domain.content.videos),
            content_text: domain.content.text,
            status: enum_to_text(&domain.status),
            client_id: domain.client_id,
            created_by: domain.created_by,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }
}
