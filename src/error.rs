//! Error types for roster-photo-upload
//!
//! Two levels of failure exist in the pipeline:
//! - Pipeline-level errors (`MalformedArchive`, `NoEligibleItems`, `Config`,
//!   `BatchInFlight`) abort a batch before or instead of any per-item work and
//!   are reported once, outside the result list.
//! - Item-level failures (`CorruptEntry`, remote rejections) never abort the
//!   batch; they are recovered locally and expressed as an `Error` outcome for
//!   that item.

use thiserror::Error;

/// Result type alias for roster-photo-upload operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for roster-photo-upload
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "base_url")
        key: Option<String>,
    },

    /// The archive container could not be parsed at all
    #[error("malformed archive: {0}")]
    MalformedArchive(String),

    /// The archive parsed but contains no qualifying image entries
    #[error("archive contains no eligible image entries")]
    NoEligibleItems,

    /// A specific entry's bytes could not be decompressed or read
    #[error("corrupt archive entry '{name}': {reason}")]
    CorruptEntry {
        /// Full internal path of the entry within the archive
        name: String,
        /// The reason the entry could not be read
        reason: String,
    },

    /// A batch is already running; only one batch may be in flight at a time
    #[error("a batch upload is already in flight")]
    BatchInFlight,

    /// Network error
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
}
