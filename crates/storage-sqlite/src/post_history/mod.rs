//! SQLite storage implementation for the social publishing log.

mod model;
mod repository;

pub use model::{NewPostHistoryDB, PostHistoryDB};
pub use repository::PostHistoryRepository;
