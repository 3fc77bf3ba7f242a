//! Database model for users.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::utils::now;
use pitchdesk_core::users::{NewUser, User, UserCredentials};
use pitchdesk_core::utils::{enum_from_text, enum_to_text};

#[derive(Queryable, Identifiable, Selectable, Debug, Clone)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct UserDB {
    pub id: i32,
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub role: String,
    pub is_main_user: bool,
    pub is_active: bool,
    pub created_by: Option<i32>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = crate::schema::users)]
pub struct NewUserDB {
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub role: String,
    pub is_main_user: bool,
    pub is_active: bool,
    pub created_by: Option<i32>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<UserDB> for User {
    fn from(db: UserDB) -> Self {
        Self {
            id: db.id,
            email: db.email,
            name: db.name,
            role: enum_from_text(&db.role),
            is_main_user: db.is_main_user,
            is_active: db.is_active,
            created_by: db.created_by,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}

impl From<UserDB> for UserCredentials {
    fn from(db: UserDB) -> Self {
        let password_hash = db.password_hash.clone();
        Self {
            user: db.into(),
            password_hash,
        }
    }
}

impl From<NewUser> for NewUserDB {
    fn from(domain: NewUser) -> Self {
        let timestamp = now();
        Self {
            email: domain.email,
            password_hash: domain.password_hash,
            name: domain.name,
            role: enum_to_text(&domain.role),
            is_main_user: domain.is_main_user,
            is_active: true,
            created_by: domain.created_by,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }
}
