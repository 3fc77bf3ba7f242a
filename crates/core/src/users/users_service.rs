use async_trait::async_trait;
use log::{debug, info};
use std::sync::Arc;

use super::users_model::{
    normalize_email, validate_account_fields, NewTeamMember, NewUser, Registration, User,
    UserRole, UserUpdate,
};
use super::users_traits::{CredentialHasher, UserRepositoryTrait, UserServiceTrait};
use crate::errors::{Error, Result, ValidationError};
use crate::RecordId;

pub const MAIN_USER_REQUIRED: &str = "Access denied. Main user privileges required.";
const INVALID_CREDENTIALS: &str = "Invalid credentials";

/// Service for sign up, sign in and team management.
pub struct UserService {
    repository: Arc<dyn UserRepositoryTrait>,
    hasher: Arc<dyn CredentialHasher>,
}

impl UserService {
    pub fn new(repository: Arc<dyn UserRepositoryTrait>, hasher: Arc<dyn CredentialHasher>) -> Self {
        Self { repository, hasher }
    }

    fn ensure_email_available(&self, email: &str) -> Result<()> {
        if self.repository.find_credentials(email)?.is_some() {
            return Err(ValidationError::InvalidInput("User already exists".to_string()).into());
        }
        Ok(())
    }

    fn require_main_user(actor: &User) -> Result<()> {
        if actor.is_main_user {
            Ok(())
        } else {
            Err(Error::Forbidden(MAIN_USER_REQUIRED.to_string()))
        }
    }

    /// Finds a sub-user created by `actor`.
    fn owned_member(&self, actor: &User, id: RecordId) -> Result<User> {
        self.repository
            .find_by_id(id)?
            .filter(|user| user.created_by == Some(actor.id))
            .ok_or_else(|| Error::not_found("User"))
    }
}

#[async_trait]
impl UserServiceTrait for UserService {
    async fn register(&self, registration: Registration) -> Result<User> {
        validate_account_fields(
            &registration.email,
            &registration.password,
            &registration.name,
        )?;
        let email = normalize_email(&registration.email);
        self.ensure_email_available(&email)?;

        let role = if registration.is_main_user {
            UserRole::Admin
        } else {
            UserRole::User
        };
        let user = self
            .repository
            .create(NewUser {
                email,
                password_hash: self.hasher.hash(&registration.password)?,
                name: registration.name.trim().to_string(),
                role,
                is_main_user: registration.is_main_user,
                created_by: None,
            })
            .await?;
        info!("Registered user {}", user.id);
        Ok(user)
    }

    fn authenticate(&self, email: &str, password: &str) -> Result<User> {
        let credentials = self
            .repository
            .find_credentials(&normalize_email(email))?
            .ok_or_else(|| Error::Unauthorized(INVALID_CREDENTIALS.to_string()))?;

        if !self.hasher.verify(password, &credentials.password_hash)? {
            debug!("Password mismatch for user {}", credentials.user.id);
            return Err(Error::Unauthorized(INVALID_CREDENTIALS.to_string()));
        }
        if !credentials.user.is_active {
            return Err(Error::Unauthorized("Account is inactive".to_string()));
        }
        Ok(credentials.user)
    }

    fn get_active_user(&self, id: RecordId) -> Result<User> {
        self.repository
            .find_by_id(id)?
            .filter(|user| user.is_active)
            .ok_or_else(|| Error::Unauthorized("User not found or inactive".to_string()))
    }

    fn list_team(&self, actor: &User) -> Result<Vec<User>> {
        Self::require_main_user(actor)?;
        self.repository.list_created_by(actor.id)
    }

    async fn create_team_member(&self, actor: &User, member: NewTeamMember) -> Result<User> {
        Self::require_main_user(actor)?;
        validate_account_fields(&member.email, &member.password, &member.name)?;
        let email = normalize_email(&member.email);
        self.ensure_email_available(&email)?;

        self.repository
            .create(NewUser {
                email,
                password_hash: self.hasher.hash(&member.password)?,
                name: member.name.trim().to_string(),
                role: member.role.unwrap_or_default(),
                is_main_user: false,
                created_by: Some(actor.id),
            })
            .await
    }

    async fn update_team_member(
        &self,
        actor: &User,
        id: RecordId,
        update: UserUpdate,
    ) -> Result<User> {
        Self::require_main_user(actor)?;
        let mut user = self.owned_member(actor, id)?;
        update.apply_to(&mut user);
        self.repository.update(user).await
    }

    async fn delete_team_member(&self, actor: &User, id: RecordId) -> Result<()> {
        Self::require_main_user(actor)?;
        let user = self.owned_member(actor, id)?;
        self.repository.delete(user.id).await?;
        Ok(())
    }
}
