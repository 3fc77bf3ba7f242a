use async_trait::async_trait;
use diesel::prelude::*;
use std::sync::Arc;

use super::model::{NewUserDB, UserDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::users;
use crate::utils::now;
use pitchdesk_core::errors::{Error, Result};
use pitchdesk_core::users::{NewUser, User, UserCredentials, UserRepositoryTrait};
use pitchdesk_core::utils::enum_to_text;
use pitchdesk_core::RecordId;

pub struct UserRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl UserRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl UserRepositoryTrait for UserRepository {
    fn find_by_id(&self, user_id: RecordId) -> Result<Option<User>> {
        let mut conn = get_connection(&self.pool)?;
        let row = users::table
            .find(user_id)
            .select(UserDB::as_select())
            .first::<UserDB>(&mut conn)
            .optional()
            .into_core()?;
        Ok(row.map(User::from))
    }

    fn find_credentials(&self, email: &str) -> Result<Option<UserCredentials>> {
        let mut conn = get_connection(&self.pool)?;
        let row = users::table
            .filter(users::email.eq(email))
            .select(UserDB::as_select())
            .first::<UserDB>(&mut conn)
            .optional()
            .into_core()?;
        Ok(row.map(UserCredentials::from))
    }

    fn list_created_by(&self, creator: RecordId) -> Result<Vec<User>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = users::table
            .filter(users::created_by.eq(creator))
            .select(UserDB::as_select())
            .order((users::created_at.desc(), users::id.desc()))
            .load::<UserDB>(&mut conn)
            .into_core()?;
        Ok(rows.into_iter().map(User::from).collect())
    }

    async fn create(&self, new_user: NewUser) -> Result<User> {
        self.writer
            .exec(move |conn| {
                let row: NewUserDB = new_user.into();
                let created = diesel::insert_into(users::table)
                    .values(&row)
                    .returning(UserDB::as_returning())
                    .get_result::<UserDB>(conn)
                    .into_core()?;
                Ok(created.into())
            })
            .await
    }

    async fn update(&self, user: User) -> Result<User> {
        self.writer
            .exec(move |conn| {
                let updated = diesel::update(users::table.find(user.id))
                    .set((
                        users::name.eq(&user.name),
                        users::role.eq(enum_to_text(&user.role)),
                        users::is_active.eq(user.is_active),
                        users::updated_at.eq(now()),
                    ))
                    .returning(UserDB::as_returning())
                    .get_result::<UserDB>(conn)
                    .optional()
                    .into_core()?;
                updated
                    .map(User::from)
                    .ok_or_else(|| Error::not_found("User"))
            })
            .await
    }

    async fn delete(&self, user_id: RecordId) -> Result<usize> {
        self.writer
            .exec(move |conn| {
                diesel::delete(users::table.find(user_id))
                    .execute(conn)
                    .into_core()
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::setup;
    use pitchdesk_core::users::UserRole;

    #[tokio::test]
    async fn credentials_lookup_and_team_listing() {
        let db = setup();
        let repo = UserRepository::new(db.pool.clone(), db.writer.clone());
        let owner = db.user("owner@example.com").await;

        let member = repo
            .create(NewUser {
                email: "member@example.com".to_string(),
                password_hash: "secret-hash".to_string(),
                name: "Member".to_string(),
                role: UserRole::User,
                is_main_user: false,
                created_by: Some(owner),
            })
            .await
            .unwrap();
        assert!(member.is_active);

        let creds = repo.find_credentials("member@example.com").unwrap().unwrap();
        assert_eq!(creds.password_hash, "secret-hash");
        assert_eq!(creds.user.role, UserRole::User);
        assert!(repo.find_credentials("nobody@example.com").unwrap().is_none());

        let team = repo.list_created_by(owner).unwrap();
        assert_eq!(team.len(), 1);
        assert_eq!(team[0].id, member.id);

        let mut changed = member.clone();
        changed.is_active = false;
        changed.role = UserRole::Admin;
        let saved = repo.update(changed).await.unwrap();
        assert!(!saved.is_active);
        assert_eq!(saved.role, UserRole::Admin);

        assert_eq!(repo.delete(member.id).await.unwrap(), 1);
        assert!(repo.find_by_id(member.id).unwrap().is_none());
    }

    #[tokio::test]
    async fn duplicate_email_is_a_unique_violation() {
        let db = setup();
        db.user("dup@example.com").await;
        let repo = UserRepository::new(db.pool.clone(), db.writer.clone());
        let err = repo
            .create(NewUser {
                email: "dup@example.com".to_string(),
                password_hash: "x".to_string(),
                name: "Dup".to_string(),
                role: UserRole::User,
                is_main_user: false,
                created_by: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Database(pitchdesk_core::errors::DatabaseError::UniqueViolation(_))
        ));
    }
}
