//! Pipeline status DTO
//!
//! What observers of the orchestrator get to see. The three output slots of
//! the form (busy, error, success) are all derived from [`PipelineState`].

use crate::application::error::PipelineError;
use crate::domain::entities::ImageDescriptor;
use crate::domain::repositories::InsertionReceipt;
use std::fmt;

/// Where the current attempt is
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PipelineState {
    #[default]
    Idle,
    Validating,
    Uploading,
    Inserting,
    Succeeded,
    Failed(PipelineError),
}

impl PipelineState {
    /// True for `Succeeded` and `Failed`
    pub fn is_terminal(&self) -> bool {
        matches!(self, PipelineState::Succeeded | PipelineState::Failed(_))
    }

    /// True while a step is in flight
    pub fn is_busy(&self) -> bool {
        matches!(
            self,
            PipelineState::Validating | PipelineState::Uploading | PipelineState::Inserting
        )
    }

    pub fn name(&self) -> &'static str {
        match self {
            PipelineState::Idle => "idle",
            PipelineState::Validating => "validating",
            PipelineState::Uploading => "uploading",
            PipelineState::Inserting => "inserting",
            PipelineState::Succeeded => "succeeded",
            PipelineState::Failed(_) => "failed",
        }
    }
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Snapshot published to subscribers
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineStatus {
    /// Sequence number of the attempt this state belongs to (0 before any)
    pub attempt: u64,
    pub state: PipelineState,
}

impl PipelineStatus {
    /// Busy indicator
    pub fn is_busy(&self) -> bool {
        self.state.is_busy()
    }

    /// Error slot
    pub fn error(&self) -> Option<&PipelineError> {
        match &self.state {
            PipelineState::Failed(err) => Some(err),
            _ => None,
        }
    }

    /// Success indicator
    pub fn is_success(&self) -> bool {
        matches!(self.state, PipelineState::Succeeded)
    }
}

/// Outcome of a successful attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadResult {
    /// The descriptor that was uploaded
    pub descriptor: ImageDescriptor,
    /// Reference id returned by the upload service
    pub asset_reference: String,
    pub insertion: InsertionReceipt,
}

/// How a call to `submit` ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptOutcome {
    /// The attempt ran to a terminal state, which is now published
    Completed(Result<UploadResult, PipelineError>),
    /// A newer submission started first; nothing was published
    Superseded,
}

impl AttemptOutcome {
    pub fn is_superseded(&self) -> bool {
        matches!(self, AttemptOutcome::Superseded)
    }

    /// The finished result, if the attempt was not superseded
    pub fn into_result(self) -> Option<Result<UploadResult, PipelineError>> {
        match self {
            AttemptOutcome::Completed(result) => Some(result),
            AttemptOutcome::Superseded => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_slots() {
        let mut status = PipelineStatus::default();
        assert!(!status.is_busy());
        assert!(status.error().is_none());
        assert!(!status.is_success());

        status.state = PipelineState::Uploading;
        assert!(status.is_busy());

        status.state = PipelineState::Failed(PipelineError::InputEmpty);
        assert!(!status.is_busy());
        assert_eq!(status.error(), Some(&PipelineError::InputEmpty));

        status.state = PipelineState::Succeeded;
        assert!(status.is_success());
        assert!(status.state.is_terminal());
    }
}
