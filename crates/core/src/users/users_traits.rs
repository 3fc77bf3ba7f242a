use async_trait::async_trait;

use super::users_model::{NewTeamMember, NewUser, Registration, User, UserCredentials, UserUpdate};
use crate::errors::Result;
use crate::RecordId;

/// Trait for user repository operations
#[async_trait]
pub trait UserRepositoryTrait: Send + Sync {
    fn find_by_id(&self, id: RecordId) -> Result<Option<User>>;
    /// Lookup by lowercased email, including the password hash.
    fn find_credentials(&self, email: &str) -> Result<Option<UserCredentials>>;
    fn list_created_by(&self, creator: RecordId) -> Result<Vec<User>>;
    async fn create(&self, new_user: NewUser) -> Result<User>;
    async fn update(&self, user: User) -> Result<User>;
    async fn delete(&self, id: RecordId) -> Result<usize>;
}

/// Password hashing primitive, implemented at the edge with a real KDF.
pub trait CredentialHasher: Send + Sync {
    fn hash(&self, password: &str) -> Result<String>;
    fn verify(&self, password: &str, hash: &str) -> Result<bool>;
}

/// Trait for user service operations
#[async_trait]
pub trait UserServiceTrait: Send + Sync {
    async fn register(&self, registration: Registration) -> Result<User>;
    fn authenticate(&self, email: &str, password: &str) -> Result<User>;
    /// Resolves the user behind a token; inactive or missing users are rejected.
    fn get_active_user(&self, id: RecordId) -> Result<User>;
    fn list_team(&self, actor: &User) -> Result<Vec<User>>;
    async fn create_team_member(&self, actor: &User, member: NewTeamMember) -> Result<User>;
    async fn update_team_member(&self, actor: &User, id: RecordId, update: UserUpdate)
        -> Result<User>;
    async fn delete_team_member(&self, actor: &User, id: RecordId) -> Result<()>;
}
