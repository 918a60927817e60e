//! Core types for roster-photo-upload

use serde::{Deserialize, Serialize};

/// Terminal status of one upload attempt
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutcomeStatus {
    /// The remote acknowledged the upload with HTTP 200
    Success,
    /// The upload failed (corrupt entry, transport failure, or remote rejection)
    Error,
}

/// Per-item result record
///
/// Exactly one outcome is produced for every eligible item, in the same
/// relative order the items were enumerated from the archive. Immutable once
/// constructed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadOutcome {
    /// Identifier derived from the item's filename stem (e.g., employee ID)
    pub identifier: String,
    /// Final path segment of the archive entry (e.g., `4521.png`)
    pub display_name: String,
    /// Success or Error
    pub status: OutcomeStatus,
    /// Failure message, present only when `status` is `Error`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl UploadOutcome {
    /// Construct a success outcome
    pub fn success(identifier: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            display_name: display_name.into(),
            status: OutcomeStatus::Success,
            message: None,
        }
    }

    /// Construct an error outcome with a failure message
    pub fn failure(
        identifier: impl Into<String>,
        display_name: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            display_name: display_name.into(),
            status: OutcomeStatus::Error,
            message: Some(message.into()),
        }
    }

    /// Whether this outcome is a success
    pub fn is_success(&self) -> bool {
        self.status == OutcomeStatus::Success
    }
}

/// Batch progress counters
///
/// `total` is fixed once the eligible set is known, before the first upload
/// begins; `completed` increases by exactly one after every item and never
/// exceeds `total`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    /// Number of items fully resolved (success or failure) so far
    pub completed: usize,
    /// Number of eligible items in this batch
    pub total: usize,
}

impl Progress {
    /// Whether every eligible item has been processed
    pub fn is_complete(&self) -> bool {
        self.completed == self.total
    }
}

impl std::fmt::Display for Progress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.completed, self.total)
    }
}

/// Externally observable orchestrator state
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BatchState {
    /// No batch in flight; the result list is empty
    Idle,
    /// A batch is in flight; progress and partial results are visible
    Running,
}

/// Event emitted during a batch run
///
/// Published via the broadcast channel returned by
/// [`BatchUploader::subscribe`](crate::BatchUploader::subscribe). One
/// `ItemCompleted` is emitted per eligible item, never batched, so a
/// subscriber sees strictly incremental progress.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BatchEvent {
    /// The eligible set has been fixed and the first upload is about to start
    Started {
        /// Number of eligible items in the batch
        total: usize,
    },

    /// One item fully resolved (success or failure)
    ItemCompleted {
        /// The item's outcome record
        outcome: UploadOutcome,
        /// Progress after this item
        progress: Progress,
    },

    /// Every eligible item has been processed
    Completed {
        /// Final progress; `completed == total`
        progress: Progress,
    },

    /// The run was cancelled at an item boundary
    Cancelled {
        /// Progress at the point of cancellation
        progress: Progress,
    },

    /// A pipeline-level failure aborted the run before any item completed
    Failed {
        /// Human-readable description of the failure
        error: String,
    },
}
