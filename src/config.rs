//! Run configuration.
//!
//! A [`StepConfig`] is built once per run, from [`StepConfig::default`] plus
//! whatever the caller overrides, and is read-only afterwards.

use std::fmt;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use crate::axis::Axis;
use crate::error::{Result, StepperError};

/// Default number of pieces per step.
pub const DEFAULT_PIECES: usize = 10;

/// Where the stepped model is written.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum OutputTarget {
    #[default]
    Stdout,
    File(PathBuf),
}

impl OutputTarget {
    pub fn path(&self) -> Option<&Path> {
        match self {
            OutputTarget::Stdout => None,
            OutputTarget::File(path) => Some(path),
        }
    }
}

impl fmt::Display for OutputTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputTarget::Stdout => f.write_str("(stdout)"),
            OutputTarget::File(path) => write!(f, "'{}'", path.display()),
        }
    }
}

/// How the sorted records are cut into steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchMode {
    /// Every step holds this many pieces (the last may hold fewer).
    Pieces(NonZeroUsize),
    /// Aim for this many steps in total.
    TotalSteps(NonZeroUsize),
}

/// Configuration for one step generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepConfig {
    /// Axis to sort pieces on. Defaults to y.
    pub axis: Axis,
    /// Pieces per step. Defaults to 10; must be at least 1.
    pub pieces: usize,
    /// Total number of steps. Overrides `pieces` when set and non-zero.
    pub steps: Option<usize>,
    /// Output destination. Defaults to stdout.
    pub output: OutputTarget,
    /// Allow the output to overwrite the input file.
    pub force: bool,
}

impl Default for StepConfig {
    fn default() -> Self {
        Self {
            axis: Axis::default(),
            pieces: DEFAULT_PIECES,
            steps: None,
            output: OutputTarget::default(),
            force: false,
        }
    }
}

impl StepConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_axis(mut self, axis: Axis) -> Self {
        self.axis = axis;
        self
    }

    pub fn with_pieces(mut self, pieces: usize) -> Self {
        self.pieces = pieces;
        self
    }

    pub fn with_steps(mut self, steps: Option<usize>) -> Self {
        self.steps = steps;
        self
    }

    pub fn with_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.output = OutputTarget::File(path.into());
        self
    }

    pub fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    /// Check the configuration before any I/O happens.
    pub fn validate(&self) -> Result<()> {
        self.batch_mode().map(|_| ())
    }

    /// The batching mode this configuration selects.
    ///
    /// A step count of zero is treated as if no step count was given.
    pub fn batch_mode(&self) -> Result<BatchMode> {
        if let Some(steps) = self.steps.and_then(NonZeroUsize::new) {
            return Ok(BatchMode::TotalSteps(steps));
        }
        NonZeroUsize::new(self.pieces)
            .map(BatchMode::Pieces)
            .ok_or(StepperError::InvalidPieces(self.pieces))
    }
}
