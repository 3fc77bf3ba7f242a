//! Shared helpers for domain models.

pub mod ids;
pub mod text;

pub use text::{enum_from_text, enum_to_text, is_valid_email, non_blank};
