//! SQLite storage implementation for message templates.

mod model;
mod repository;

pub use model::{NewTemplateDB, TemplateDB};
pub use repository::TemplateRepository;
