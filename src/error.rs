//! Error types for step generation.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort a step generation run.
///
/// Malformed numbers inside the model never show up here; they are absorbed
/// by the filter and sort stages.
#[derive(Debug, Error)]
pub enum StepperError {
    #[error("Error reading input file '{}': {source}", .path.display())]
    ReadInput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Error reading input: {0}")]
    ReadStream(#[source] io::Error),
    #[error("Error writing output to {target}: {source}")]
    WriteOutput {
        target: String,
        #[source]
        source: io::Error,
    },
    #[error("Pieces per step must be a positive integer, got {0}")]
    InvalidPieces(usize),
    #[error("Refusing to overwrite {}. Use --force if you really want to do this", .path.display())]
    RefuseOverwrite { path: PathBuf },
}

impl StepperError {
    pub(crate) fn write(target: impl Into<String>, source: io::Error) -> Self {
        StepperError::WriteOutput {
            target: target.into(),
            source,
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, StepperError>;
