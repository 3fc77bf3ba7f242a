//! SQLite storage implementation for clients.

mod model;
mod repository;

pub use model::{ClientDB, NewClientDB};
pub use repository::ClientRepository;
