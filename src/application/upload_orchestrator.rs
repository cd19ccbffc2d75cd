//! Upload orchestrator use case
//!
//! Runs one upload attempt end to end: load, sniff, probe, upload, wait for
//! durable storage, insert. Each stage returns a `Result` and the first
//! failure ends the attempt.
//!
//! Attempts are numbered. Every time an attempt resumes from an await it
//! checks that it is still the newest one; if a later submission has
//! started, it stops without touching the published status.

use crate::application::dto::{
    AttemptOutcome, PipelineState, PipelineStatus, Submission, SubmissionInput, UploadResult,
};
use crate::application::error::PipelineError;
use crate::application::image_validator::ImageValidator;
use crate::domain::entities::ImageDescriptor;
use crate::domain::repositories::{
    AssetUploader, ContentTypeProbe, DocumentInserter, ImageDecoder, InsertRequest, UploadRequest,
};
use parking_lot::Mutex;
use tokio::sync::watch;

/// Why a stage stopped early
#[derive(Debug)]
enum StageError {
    Failed(PipelineError),
    Superseded,
}

impl From<PipelineError> for StageError {
    fn from(value: PipelineError) -> Self {
        StageError::Failed(value)
    }
}

/// The single state machine coordinating upload attempts
///
/// Owns the pipeline status. Observers get a read-only
/// [`watch::Receiver`] through [`subscribe`](Self::subscribe); only the
/// orchestrator writes to it.
pub struct UploadOrchestrator<P, D, U, I>
where
    P: ContentTypeProbe,
    D: ImageDecoder,
    U: AssetUploader,
    I: DocumentInserter,
{
    validator: ImageValidator<P, D>,
    uploader: U,
    inserter: I,
    /// Sequence number of the newest attempt
    current_attempt: Mutex<u64>,
    status: watch::Sender<PipelineStatus>,
}

impl<P, D, U, I> UploadOrchestrator<P, D, U, I>
where
    P: ContentTypeProbe,
    D: ImageDecoder,
    U: AssetUploader,
    I: DocumentInserter,
{
    /// Creates a new orchestrator in the `Idle` state
    pub fn new(validator: ImageValidator<P, D>, uploader: U, inserter: I) -> Self {
        let (status, _) = watch::channel(PipelineStatus::default());
        Self {
            validator,
            uploader,
            inserter,
            current_attempt: Mutex::new(0),
            status,
        }
    }

    /// Subscribes to status changes
    pub fn subscribe(&self) -> watch::Receiver<PipelineStatus> {
        self.status.subscribe()
    }

    /// Returns the current status snapshot
    pub fn status(&self) -> PipelineStatus {
        self.status.borrow().clone()
    }

    /// Runs a full upload attempt
    ///
    /// Any attempt still in flight is superseded: it stops at its next
    /// resumption point and resolves to [`AttemptOutcome::Superseded`].
    pub async fn submit(&self, submission: Submission) -> AttemptOutcome {
        let attempt = self.begin_attempt();

        let outcome = match self.run(attempt, &submission).await {
            Ok(result) => {
                tracing::info!(
                    attempt,
                    reference = %result.asset_reference,
                    mime = %result.descriptor.mime_type(),
                    dimensions = %result.descriptor.dimensions(),
                    "image inserted"
                );
                (PipelineState::Succeeded, Ok(result))
            }
            Err(StageError::Failed(err)) => {
                tracing::warn!(attempt, kind = %err.kind(), error = %err, "upload attempt failed");
                (PipelineState::Failed(err.clone()), Err(err))
            }
            Err(StageError::Superseded) => {
                tracing::debug!(attempt, "attempt superseded, discarding");
                return AttemptOutcome::Superseded;
            }
        };

        let (state, result) = outcome;
        match self.transition(attempt, state) {
            Ok(()) => AttemptOutcome::Completed(result),
            Err(_) => {
                tracing::debug!(attempt, "attempt superseded before it could finish");
                AttemptOutcome::Superseded
            }
        }
    }

    /// Validates input without uploading it
    ///
    /// Returns the descriptor the upload service would receive. The
    /// published status is not touched.
    pub async fn validate(&self, input: &SubmissionInput) -> Result<ImageDescriptor, PipelineError> {
        self.validator.validate(input).await
    }

    /// Called on the first edit to the input after an attempt finished
    ///
    /// Clears the error and success indicators by returning to `Idle`.
    /// Does nothing while an attempt is in flight. Returns whether the
    /// status changed.
    pub fn input_edited(&self) -> bool {
        let current = self.current_attempt.lock();
        let terminal = self.status.borrow().state.is_terminal();
        if !terminal {
            return false;
        }
        self.status.send_replace(PipelineStatus {
            attempt: *current,
            state: PipelineState::Idle,
        });
        tracing::debug!(attempt = *current, "input edited, status reset");
        true
    }

    async fn run(&self, attempt: u64, submission: &Submission) -> Result<UploadResult, StageError> {
        let (payload, mime) = self.validator.load(&submission.input).await?;
        self.ensure_current(attempt)?;
        let dimensions = self.validator.measure(&payload).await?;
        self.ensure_current(attempt)?;
        let descriptor = ImageDescriptor::new(payload, mime, dimensions);

        self.transition(attempt, PipelineState::Uploading)?;
        let request = UploadRequest::from_descriptor(&descriptor, submission.ai_generated);
        let handle = self
            .uploader
            .upload(request)
            .await
            .map_err(PipelineError::upload)?;
        self.ensure_current(attempt)?;

        handle
            .wait_until_stored()
            .await
            .map_err(PipelineError::upload)?;
        let asset_reference = handle.reference_id().to_string();

        self.transition(attempt, PipelineState::Inserting)?;
        let insertion = self
            .inserter
            .insert(InsertRequest::new(
                asset_reference.clone(),
                submission.alt_text.clone(),
            ))
            .await
            .map_err(PipelineError::insertion)?;

        Ok(UploadResult {
            descriptor,
            asset_reference,
            insertion,
        })
    }

    /// Starts a new attempt, superseding whatever was running
    fn begin_attempt(&self) -> u64 {
        let mut current = self.current_attempt.lock();
        *current += 1;
        let attempt = *current;

        self.status.send_replace(PipelineStatus {
            attempt,
            state: PipelineState::Idle,
        });
        self.status.send_replace(PipelineStatus {
            attempt,
            state: PipelineState::Validating,
        });
        tracing::info!(attempt, "upload attempt started");
        attempt
    }

    fn transition(&self, attempt: u64, state: PipelineState) -> Result<(), StageError> {
        let current = self.current_attempt.lock();
        if *current != attempt {
            return Err(StageError::Superseded);
        }
        tracing::debug!(attempt, to = %state, "pipeline transition");
        self.status.send_replace(PipelineStatus { attempt, state });
        Ok(())
    }

    fn ensure_current(&self, attempt: u64) -> Result<(), StageError> {
        if *self.current_attempt.lock() == attempt {
            Ok(())
        } else {
            Err(StageError::Superseded)
        }
    }
}
