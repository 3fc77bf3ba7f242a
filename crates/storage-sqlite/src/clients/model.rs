//! Database model for clients.
//!
//! Social links and location are flattened into columns of the row.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::utils::{decode_list, encode_list, now};
use pitchdesk_core::clients::{Client, Coordinates, Location, NewClient, SocialMedia};

#[derive(Queryable, Identifiable, Selectable, AsChangeset, Debug, Clone)]
#[diesel(table_name = crate::schema::clients)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[diesel(treat_none_as_null = true)]
pub struct ClientDB {
    pub id: i32,
    pub name: String,
    pub business_name: Option<String>,
    pub phone_number: String,
    pub email: String,
    pub facebook: Option<String>,
    pub instagram: Option<String>,
    pub twitter: Option<String>,
    pub linkedin: Option<String>,
    pub website: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub zip_code: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub tags: String,
    pub created_by: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = crate::schema::clients)]
pub struct NewClientDB {
    pub name: String,
    pub business_name: Option<String>,
    pub phone_number: String,
    pub email: String,
    pub facebook: Option<String>,
    pub instagram: Option<String>,
    pub twitter: Option<String>,
    pub linkedin: Option<String>,
    pub website: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub zip_code: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub tags: String,
    pub created_by: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<ClientDB> for Client {
    fn from(db: ClientDB) -> Self {
        Self {
            id: db.id,
            name: db.name,
            business_name: db.business_name,
            phone_number: db.phone_number,
            email: db.email,
            social_media: SocialMedia {
                facebook: db.facebook,
                instagram: db.instagram,
                twitter: db.twitter,
                linkedin: db.linkedin,
                website: db.website,
            },
            location: Location {
                address: db.address,
                city: db.city,
                state: db.state,
                country: db.country,
                zip_code: db.zip_code,
                coordinates: Coordinates {
                    lat: db.lat,
                    lng: db.lng,
                },
            },
            tags: decode_list(&db.tags),
            created_by: db.created_by,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}

impl From<Client> for ClientDB {
    fn from(domain: Client) -> Self {
        Self {
            id: domain.id,
            name: domain.name,
            business_name: domain.business_name,
            phone_number: domain.phone_number,
            email: domain.email,
            facebook: domain.social_media.facebook,
            instagram: domain.social_media.instagram,
            twitter: domain.social_media.twitter,
            linkedin: domain.social_media.linkedin,
            website: domain.social_media.website,
            address: domain.location.address,
            city: domain.location.city,
            state: domain.location.state,
            country: domain.location.country,
            zip_code: domain.location.zip_code,
            lat: domain.location.coordinates.lat,
            lng: domain.location.coordinates.lng,
            tags: encode_list(&domain.tags),
            created_by: domain.created_by,
            created_at: domain.created_at,
            updated_at: now(),
        }
    }
}

impl From<NewClient> for NewClientDB {
    fn from(domain: NewClient) -> Self {
        let timestamp = now();
        Self {
            name: domain.name,
            business_name: domain.business_name,
            phone_number: domain.phone_number,
            email: domain.email,
            facebook: domain.social_media.facebook,
            instagram: domain.social_media.instagram,
            twitter: domain.social_media.twitter,
            linkedin: domain.social_media.linkedin,
            website: domain.social_media.website,
            address: domain.location.address,
            city: domain.location.city,
            state: domain.location.state,
            country: domain.location.country,
            zip_code: domain.location.zip_code,
            lat: domain.location.coordinates.lat,
            lng: domain.location.coordinates.lng,
            tags: encode_list(&domain.tags),
            created_by: domain.created_by,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }
}
