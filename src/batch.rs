//! Batch orchestration
//!
//! [`BatchUploader`] drives the eligible entries of one archive through the
//! upload client strictly in enumeration order, one at a time, isolating
//! failures per item. Observers get both a push surface (the broadcast event
//! channel) and a pull surface ([`BatchUploader::snapshot`]).
//!
//! Two pipeline-level failures abort a run before any network activity:
//! an unparsable archive and an archive with zero eligible entries. Everything
//! else is scoped to one item and never stops the batch.

use crate::archive::PhotoArchive;
use crate::config::Config;
use crate::eligibility::plan_uploads;
use crate::error::{Error, Result};
use crate::types::{BatchEvent, BatchState, Progress, UploadOutcome};
use crate::upload::UploadClient;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Mutable state shared between a running batch and its observers
struct RunState {
    state: BatchState,
    progress: Progress,
    outcomes: Vec<UploadOutcome>,
}

/// Sequential batch uploader for one archive of photos
///
/// Cloneable: all shared fields are Arc-wrapped, so clones observe and control
/// the same batch. Only one batch may be in flight at a time.
#[derive(Clone)]
pub struct BatchUploader {
    client: UploadClient,
    event_tx: broadcast::Sender<BatchEvent>,
    run_state: Arc<Mutex<RunState>>,
    /// Token for the current run; replaced at every batch start
    cancel_token: Arc<Mutex<CancellationToken>>,
}

impl BatchUploader {
    /// Create a new batch uploader
    ///
    /// Validates the configuration and builds the HTTP client and the event
    /// broadcast channel.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        let client = UploadClient::new(&config)?;
        let (event_tx, _rx) = broadcast::channel(config.event_buffer);
        Ok(Self {
            client,
            event_tx,
            run_state: Arc::new(Mutex::new(RunState {
                state: BatchState::Idle,
                progress: Progress::default(),
                outcomes: Vec::new(),
            })),
            cancel_token: Arc::new(Mutex::new(CancellationToken::new())),
        })
    }

    /// Subscribe to batch events
    ///
    /// Multiple subscribers are supported; each receives all events
    /// independently. One [`BatchEvent::ItemCompleted`] is emitted per item.
    pub fn subscribe(&self) -> broadcast::Receiver<BatchEvent> {
        self.event_tx.subscribe()
    }

    /// Current orchestrator state
    pub fn state(&self) -> BatchState {
        self.lock_state().state
    }

    /// Pull-based observation: current progress and the ordered result list
    ///
    /// While a batch is running the list holds the outcomes of the items
    /// resolved so far; its length always equals `progress.completed`.
    pub fn snapshot(&self) -> (Progress, Vec<UploadOutcome>) {
        let state = self.lock_state();
        (state.progress, state.outcomes.clone())
    }

    /// Request cooperative cancellation of the current run
    ///
    /// Checked only at the item boundary; an in-flight upload is never
    /// interrupted. A no-op when no batch is running.
    pub fn cancel(&self) {
        self.lock_cancel().cancel();
    }

    /// Run one batch over the raw bytes of a photo archive
    ///
    /// Fails fast with [`Error::MalformedArchive`] or
    /// [`Error::NoEligibleItems`] before any upload; both are also published
    /// once as [`BatchEvent::Failed`], with the result list left empty. On
    /// normal completion returns one outcome per eligible item, in
    /// enumeration order. A second call while a batch is in flight is
    /// rejected with [`Error::BatchInFlight`].
    pub async fn run(&self, archive_bytes: Vec<u8>) -> Result<Vec<UploadOutcome>> {
        let cancel = {
            let mut state = self.lock_state();
            if state.state == BatchState::Running {
                return Err(Error::BatchInFlight);
            }
            state.state = BatchState::Running;
            state.progress = Progress::default();
            state.outcomes.clear();

            let token = CancellationToken::new();
            *self.lock_cancel() = token.clone();
            token
        };

        let result = self.run_inner(archive_bytes, cancel).await;
        self.lock_state().state = BatchState::Idle;

        if let Err(e) = &result {
            warn!(error = %e, "batch upload aborted");
            self.emit(BatchEvent::Failed {
                error: e.to_string(),
            });
        }
        result
    }

    async fn run_inner(
        &self,
        archive_bytes: Vec<u8>,
        cancel: CancellationToken,
    ) -> Result<Vec<UploadOutcome>> {
        let mut archive = PhotoArchive::open(archive_bytes)?;
        let planned = plan_uploads(&mut archive)?;
        if planned.is_empty() {
            return Err(Error::NoEligibleItems);
        }

        // Fix total before the first upload begins
        let total = planned.len();
        self.lock_state().progress.total = total;
        info!(total, "starting photo batch upload");
        self.emit(BatchEvent::Started { total });

        for item in planned {
            if cancel.is_cancelled() {
                let (progress, outcomes) = self.snapshot();
                warn!(%progress, "batch cancelled at item boundary");
                self.emit(BatchEvent::Cancelled { progress });
                return Ok(outcomes);
            }

            // A corrupt entry resolves this item as an error; the batch continues
            let outcome = match archive.read_entry(item.index) {
                Ok(content) => {
                    self.client
                        .upload(&item.identifier, &item.display_name, item.mime_type, content)
                        .await
                }
                Err(e) => {
                    warn!(identifier = %item.identifier, error = %e, "entry unreadable, recording failure");
                    UploadOutcome::failure(&item.identifier, &item.display_name, e.to_string())
                }
            };

            let progress = {
                let mut state = self.lock_state();
                state.outcomes.push(outcome.clone());
                state.progress.completed += 1;
                state.progress
            };
            debug!(identifier = %outcome.identifier, success = outcome.is_success(), %progress, "item completed");
            self.emit(BatchEvent::ItemCompleted { outcome, progress });
        }

        let (progress, outcomes) = self.snapshot();
        info!(%progress, "photo batch upload finished");
        self.emit(BatchEvent::Completed { progress });
        Ok(outcomes)
    }

    /// Emit an event to all subscribers; silently dropped when no one listens
    fn emit(&self, event: BatchEvent) {
        self.event_tx.send(event).ok();
    }

    fn lock_state(&self) -> MutexGuard<'_, RunState> {
        self.run_state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn lock_cancel(&self) -> MutexGuard<'_, CancellationToken> {
        self.cancel_token
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
