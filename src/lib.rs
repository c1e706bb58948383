//! # ldr-stepper
//!
//! Adds build steps to LDraw brick models.
//!
//! An LDraw model lists its parts as placement lines (line type 1). This
//! library sorts those lines along one axis and inserts `0 STEP` meta
//! commands so that a viewer or instruction printer builds the model up a
//! few pieces at a time, bottom to top (or along whichever axis you pick).
//!
//! ## Overview
//!
//! Processing is a fixed chain of stages over the model's lines:
//! - **FILTER**: drop blank lines, comments and geometry primitives
//!   (line types 0, 2, 3, 4 and 5)
//! - **SORT**: stable ascending sort on the x, y or z coordinate column
//! - **STEP**: cut into batches of N pieces, or into N batches, with a
//!   `0 STEP` line between consecutive batches
//!
//! Output lines always end in CRLF, as the LDraw format requires.
//!
//! ## Example
//!
//! ```
//! use ldr_stepper::{Axis, StepConfig, generate_steps_to};
//!
//! let model = "0 Tower\n\
//!     1 4 0 -48 0 1 0 0 0 1 0 0 0 1 3001.dat\n\
//!     1 4 0 0 0 1 0 0 0 1 0 0 0 1 3001.dat\n\
//!     1 4 0 -24 0 1 0 0 0 1 0 0 0 1 3001.dat\n";
//!
//! let mut out = Vec::new();
//! let config = StepConfig::default().with_axis(Axis::Y).with_pieces(2);
//! let summary = generate_steps_to(model.as_bytes(), &mut out, &config).unwrap();
//!
//! assert_eq!(summary.records_kept, 3);
//! assert_eq!(summary.step_markers, 1);
//! assert!(String::from_utf8(out).unwrap().starts_with("1 4 0 -48 0"));
//! ```

pub mod axis;
pub mod batch;
pub mod config;
pub mod error;
pub mod executor;
pub mod filter;
pub mod pipeline;
pub mod record;
pub mod sink;
pub mod sort;
pub mod stage;

pub use axis::Axis;
pub use batch::{StepInterleave, batch_count, batch_size, interleave_steps};
pub use config::{BatchMode, DEFAULT_PIECES, OutputTarget, StepConfig};
pub use error::{Result, StepperError};
pub use executor::{StageReport, execute};
pub use filter::{accept, filter_records};
pub use pipeline::{
    LDRAW_EXTENSIONS, RunSummary, StepOutput, generate_steps, generate_steps_to,
    has_ldraw_extension, process, read_records,
};
pub use record::{IGNORED_LINE_TYPES, LINE_ENDING, Record, STEP_LINE};
pub use sink::{StepWriter, write_output};
pub use sort::{KeyCache, SortKey, sort_records};
pub use stage::{FilterStage, SortStage, Stage, StepStage, build_stages};
