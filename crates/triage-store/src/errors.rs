//! Ticket store error types.
//!
//! Unlike the scoring pipeline, store operations fail loudly: callers get a
//! typed variant and decide how to report it.

use thiserror::Error;

/// Errors from ticket persistence and intake.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Database operation failed.
    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// A JSON column could not be encoded or decoded.
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// Creating the database directory failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// No ticket with this id.
    #[error("Ticket not found: {0}")]
    NotFound(i64),

    /// Status outside `new`, `in-progress`, `resolved`.
    #[error("Invalid status: {0} (expected new, in-progress or resolved)")]
    InvalidStatus(String),

    /// Ticket type outside `support`, `suggestion`, `recommendation`.
    #[error("Invalid ticket type: {0} (expected support, suggestion or recommendation)")]
    InvalidTicketType(String),

    /// Priority outside `critical`, `high`, `normal`.
    #[error("Invalid priority: {0} (expected critical, high or normal)")]
    InvalidPriority(String),

    /// Message was empty or whitespace.
    #[error("Message cannot be empty")]
    EmptyMessage,
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
