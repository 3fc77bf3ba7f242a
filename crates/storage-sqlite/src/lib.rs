//! SQLite storage implementation for PitchDesk.
//!
//! This crate provides all database-related functionality using Diesel ORM with SQLite.
//! It implements the repository traits defined in `pitchdesk-core` and contains:
//! - Database connection pooling and management
//! - Diesel migrations
//! - Repository implementations for every tenant-scoped entity
//! - Database-specific row types (with Diesel derives)
//!
//! # Architecture
//!
//! This crate is the only place in the application where Diesel dependencies exist.
//! `core` is database-agnostic and works with traits.
//!
//! ```text
//!        core (domain)
//!              │
//!              ▼
//!   storage-sqlite (this crate)
//!              │
//!              ▼
//!          SQLite DB
//! ```
//!
//! Nested API shapes (social media, location, ad content) are stored as flat
//! columns and reassembled in the row conversions. List-valued fields are
//! TEXT columns holding a JSON array.

pub mod db;
pub mod errors;
pub mod schema;
pub mod utils;

// Repository implementations
pub mod ads;
pub mod clients;
pub mod contacts;
pub mod notes;
pub mod post_history;
pub mod templates;
pub mod users;

// Re-export database utilities
pub use db::{create_pool, get_connection, init, run_migrations, DbConnection, DbPool, WriteHandle};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

// Re-export repositories
pub use ads::AdRepository;
pub use clients::ClientRepository;
pub use contacts::ContactRepository;
pub use notes::NoteRepository;
pub use post_history::PostHistoryRepository;
pub use templates::TemplateRepository;
pub use users::UserRepository;

// Re-export from pitchdesk-core for convenience
pub use pitchdesk_core::errors::{DatabaseError, Error, Result};
