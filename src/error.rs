//! Error types for the cartstash library.
//!
//! These errors flow between the storage adapters and the cart session;
//! the session's public operations collapse every variant into a safe
//! default (`None` / `false` / no-op) so callers never see them.

use crate::models::SchemaVersion;

/// All errors that can occur inside the cart persistence layer.
#[derive(Debug, thiserror::Error)]
pub enum CartStashError {
    /// JSON serialization or deserialization failed. On the load path
    /// this is the "malformed stored data" case.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The storage backend failed or is unavailable (I/O error, lock
    /// poisoning, quota, missing storage context).
    #[error("storage error: {0}")]
    Storage(Box<dyn core::error::Error + Send + Sync>),

    /// A stored cart carries a schema version other than the one this
    /// build expects. The stored entry is incompatible wholesale; no
    /// partial migration is attempted.
    #[error("stored cart schema version {found} does not match expected {expected}")]
    VersionMismatch {
        /// Version found in the stored entry.
        found: SchemaVersion,
        /// Version this build expects.
        expected: SchemaVersion,
    },
}

/// Convenience alias used throughout the crate.
pub type Result<T> = core::result::Result<T, CartStashError>;
