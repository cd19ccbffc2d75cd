//! CLI module

mod commands;
mod progress;

pub use commands::{Cli, Commands, ImageInput, UploadArgs};
pub use progress::{StatusSpinner, state_message};
