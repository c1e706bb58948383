//! End-to-end step generation.
//!
//! Reads an LDraw model, runs it through `FILTER | SORT | STEP` and writes
//! the result. Everything that can fail before output starts (configuration,
//! overwrite protection, reading the input) is checked first, so those
//! failures never leave partial output behind.

use std::fs::{self, File};
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use crate::batch::{batch_count, batch_size};
use crate::config::StepConfig;
use crate::error::{Result, StepperError};
use crate::executor::{StageReport, execute};
use crate::record::Record;
use crate::sink::{StepWriter, write_output};
use crate::stage::build_stages;

/// File extensions expected for LDraw models.
pub const LDRAW_EXTENSIONS: [&str; 3] = ["ldr", "dat", "mpd"];

/// What a run did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunSummary {
    /// Lines read from the input.
    pub lines_read: usize,
    /// Lines that survived filtering.
    pub records_kept: usize,
    /// Batches written (zero when nothing was kept).
    pub batches: usize,
    /// `0 STEP` lines inserted.
    pub step_markers: usize,
}

/// Result of running the stage chain over a model held in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepOutput {
    pub records: Vec<Record>,
    pub reports: Vec<StageReport>,
    pub summary: RunSummary,
}

/// Read every line of `reader` as a record.
///
/// Lines are split on `\n` and kept as raw bytes, so text that is not valid
/// UTF-8 is carried through unchanged.
pub fn read_records<R: BufRead>(reader: R) -> std::io::Result<Vec<Record>> {
    reader
        .split(b'\n')
        .map(|line| line.map(|l| Record::from_bytes(&l)))
        .collect()
}

/// Filter, sort and batch `records` according to `config`.
pub fn process(records: Vec<Record>, config: &StepConfig) -> Result<StepOutput> {
    let mode = config.batch_mode()?;
    let mut stages = build_stages(config)?;
    let lines_read = records.len();
    let (records, reports) = execute(records, &mut stages);

    // Ignored line types include `0 STEP`, so every marker left was inserted.
    let records_kept = records.iter().filter(|r| !r.is_step_marker()).count();
    let batches = batch_count(records_kept, batch_size(mode, records_kept));
    let step_markers = batches.saturating_sub(1);

    Ok(StepOutput {
        records,
        reports,
        summary: RunSummary {
            lines_read,
            records_kept,
            batches,
            step_markers,
        },
    })
}

/// Run the pipeline from `reader` to `writer`.
///
/// The output target in `config` is ignored; `writer` receives the model.
pub fn generate_steps_to<R, W>(reader: R, writer: W, config: &StepConfig) -> Result<RunSummary>
where
    R: BufRead,
    W: Write,
{
    config.validate()?;
    let records = read_records(reader).map_err(StepperError::ReadStream)?;
    let output = process(records, config)?;

    let mut writer = StepWriter::new(writer);
    writer
        .write_records(&output.records)
        .map_err(|e| StepperError::write("writer", e))?;
    writer
        .finish()
        .map_err(|e| StepperError::write("writer", e))?;
    Ok(output.summary)
}

/// Read the model at `input_path`, insert build steps and write the result
/// to the configured output.
pub fn generate_steps(input_path: impl AsRef<Path>, config: &StepConfig) -> Result<RunSummary> {
    let input_path = input_path.as_ref();
    config.validate()?;
    check_overwrite(input_path, config)?;

    let read_error = |source| StepperError::ReadInput {
        path: input_path.to_path_buf(),
        source,
    };
    let file = File::open(input_path).map_err(read_error)?;
    let records = read_records(BufReader::new(file)).map_err(read_error)?;

    let output = process(records, config)?;
    write_output(&output.records, &config.output)?;

    let summary = output.summary;
    tracing::info!(
        input = %input_path.display(),
        output = %config.output,
        axis = %config.axis,
        lines_read = summary.lines_read,
        records_kept = summary.records_kept,
        batches = summary.batches,
        "generated steps"
    );
    Ok(summary)
}

/// True if `path` carries one of the usual LDraw extensions.
pub fn has_ldraw_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            LDRAW_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}

/// Refuse to write over the input file unless `force` is set.
fn check_overwrite(input_path: &Path, config: &StepConfig) -> Result<()> {
    if config.force {
        return Ok(());
    }
    let Some(output_path) = config.output.path() else {
        return Ok(());
    };
    // The input has to exist; a missing output cannot be the input.
    let same = match (fs::canonicalize(input_path), fs::canonicalize(output_path)) {
        (Ok(input), Ok(output)) => input == output,
        _ => false,
    };
    if same {
        return Err(StepperError::RefuseOverwrite {
            path: input_path.to_path_buf(),
        });
    }
    Ok(())
}
