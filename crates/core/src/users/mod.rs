//! Users module - accounts, roles and team management.

mod users_model;
mod users_service;
mod users_traits;

pub use users_model::{
    NewTeamMember, NewUser, Registration, User, UserCredentials, UserRole, UserUpdate,
};
pub use users_service::{UserService, MAIN_USER_REQUIRED};
pub use users_traits::{CredentialHasher, UserRepositoryTrait, UserServiceTrait};
