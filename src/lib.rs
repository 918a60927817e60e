//! # roster-photo-upload
//!
//! Backend library for bulk-loading employee profile photos from a ZIP
//! archive into a remote directory service.
//!
//! ## Design Philosophy
//!
//! roster-photo-upload is designed to be:
//! - **Library-first** - No CLI or UI, purely a Rust crate for embedding
//! - **Event-driven** - Consumers subscribe to per-item progress events,
//!   or poll a snapshot; no rendering concern leaks into the pipeline
//! - **Failure-isolating** - One bad photo never aborts the batch; every
//!   eligible entry yields exactly one success/failure outcome
//!
//! ## Quick Start
//!
//! ```no_run
//! use roster_photo_upload::{BatchUploader, Config};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let uploader = BatchUploader::new(Config {
//!         base_url: "https://api.example.com/v1".to_string(),
//!         credential: "dXNlcjpwYXNz".to_string(),
//!         ..Default::default()
//!     })?;
//!
//!     // Subscribe to per-item progress
//!     let mut events = uploader.subscribe();
//!     tokio::spawn(async move {
//!         while let Ok(event) = events.recv().await {
//!             println!("Event: {:?}", event);
//!         }
//!     });
//!
//!     let archive_bytes = tokio::fs::read("photos.zip").await?;
//!     let outcomes = uploader.run(archive_bytes).await?;
//!     println!("{} photos processed", outcomes.len());
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Archive reading
pub mod archive;
/// Batch orchestration
pub mod batch;
/// Configuration types
pub mod config;
/// Entry filtering and identifier derivation
pub mod eligibility;
/// Error types
pub mod error;
/// Core types and events
pub mod types;
/// Upload client
pub mod upload;

// Re-export commonly used types
pub use archive::{ArchiveEntry, PhotoArchive};
pub use batch::BatchUploader;
pub use config::Config;
pub use error::{Error, Result};
pub use types::{BatchEvent, BatchState, OutcomeStatus, Progress, UploadOutcome};
pub use upload::UploadClient;
