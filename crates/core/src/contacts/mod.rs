//! Customer contacts module - the people behind a client.

mod contacts_model;
mod contacts_service;
mod contacts_traits;

pub use contacts_model::{ContactInput, CustomerContact, NewCustomerContact};
pub use contacts_service::ContactService;
pub use contacts_traits::{ContactRepositoryTrait, ContactServiceTrait};
