/// Maximum number of AI-relevant notes fed into a prompt as client context.
pub const AI_CONTEXT_NOTES_LIMIT: usize = 10;

/// Window used by the dashboard's "recent clients" counter.
pub const RECENT_CLIENTS_DAYS: i64 = 30;

/// Subject used for outgoing email when the caller does not provide one.
pub const DEFAULT_EMAIL_SUBJECT: &str = "Message from Marketing Platform";

/// Country bucket for clients without a stored country.
pub const UNKNOWN_COUNTRY: &str = "Unknown";
