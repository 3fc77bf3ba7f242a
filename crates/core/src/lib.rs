//! PitchDesk Core - Domain entities, services, and traits.
//!
//! This crate contains the business rules of the CRM: tenant scoping,
//! input validation and the reshaping between flat storage records and the
//! nested shapes the API exposes. It is database-agnostic and defines
//! repository traits that are implemented by the `storage-sqlite` crate,
//! and outreach traits implemented by the `outreach` crate.

pub mod ads;
pub mod clients;
pub mod constants;
pub mod contacts;
pub mod errors;
pub mod insights;
pub mod notes;
pub mod outreach;
pub mod post_history;
pub mod templates;
pub mod users;
pub mod utils;

#[cfg(test)]
pub(crate) mod test_support;

/// Identifier of a stored record, assigned by the database.
pub type RecordId = i32;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
