//! Progress reporting for CLI

use crate::application::dto::{PipelineState, PipelineStatus};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use tokio::sync::watch;

/// Spinner that mirrors the pipeline's busy indicator
pub struct StatusSpinner {
    bar: ProgressBar,
}

impl StatusSpinner {
    pub fn new() -> Self {
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::with_template("{spinner:.green} [{elapsed}] {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        bar.enable_steady_tick(Duration::from_millis(100));
        Self { bar }
    }

    /// Follows status updates until the sender is dropped
    ///
    /// Meant to be raced against the attempt itself.
    pub async fn follow(&self, mut status: watch::Receiver<PipelineStatus>) {
        loop {
            let message = state_message(&status.borrow_and_update().state);
            self.bar.set_message(message);
            if status.changed().await.is_err() {
                break;
            }
        }
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl Default for StatusSpinner {
    fn default() -> Self {
        Self::new()
    }
}

/// Human-readable line for a pipeline state
pub fn state_message(state: &PipelineState) -> &'static str {
    match state {
        PipelineState::Idle => "Waiting...",
        PipelineState::Validating => "Validating image...",
        PipelineState::Uploading => "Uploading...",
        PipelineState::Inserting => "Inserting into document...",
        PipelineState::Succeeded => "Done",
        PipelineState::Failed(_) => "Failed",
    }
}
