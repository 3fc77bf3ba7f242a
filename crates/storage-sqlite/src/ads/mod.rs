//! SQLite storage implementation for ads.

mod model;
mod repository;

pub use model::{AdDB, NewAdDB};
pub use repository::AdRepository;
