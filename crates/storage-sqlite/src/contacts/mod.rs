//! SQLite storage implementation for customer contacts.

mod model;
mod repository;

pub use model::{ContactDB, NewContactDB};
pub use repository::ContactRepository;
