//! Stage chain executor.
//!
//! Runs each stage over the complete output of the previous one and records
//! how many records went in and out of every stage.

use crate::record::Record;
use crate::stage::Stage;

/// Record counts for one executed stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageReport {
    pub stage_name: String,
    pub input_count: usize,
    pub output_count: usize,
}

impl StageReport {
    pub fn new(stage_name: impl Into<String>, input_count: usize, output_count: usize) -> Self {
        Self {
            stage_name: stage_name.into(),
            input_count,
            output_count,
        }
    }
}

/// Push `input` through `stages` in order.
///
/// Returns the final records and one report per stage.
pub fn execute(
    input: Vec<Record>,
    stages: &mut [Box<dyn Stage>],
) -> (Vec<Record>, Vec<StageReport>) {
    let mut current = input;
    let mut reports = Vec::with_capacity(stages.len());

    for stage in stages.iter_mut() {
        let input_count = current.len();
        current = stage.apply(current);
        let report = StageReport::new(stage.name(), input_count, current.len());
        tracing::debug!(
            stage = %report.stage_name,
            input = report.input_count,
            output = report.output_count,
            "stage complete"
        );
        reports.push(report);
    }

    (current, reports)
}
