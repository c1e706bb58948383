//! Pipeline stages.
//!
//! Each stage consumes the whole record stream produced by the previous one
//! and returns a new stream. The stepping pipeline is always
//! `FILTER | SORT | STEP`, built by [`build_stages`].

use crate::batch::{batch_size, interleave_steps};
use crate::config::{BatchMode, StepConfig};
use crate::error::Result;
use crate::filter;
use crate::record::Record;
use crate::sort::{KeyCache, sort_records};

/// A transformation over a stream of records.
pub trait Stage {
    /// Transform the records handed over by the previous stage.
    fn apply(&mut self, records: Vec<Record>) -> Vec<Record>;

    /// The display name of this stage.
    fn name(&self) -> &str;
}

/// FILTER - drops blank lines and ignored line types.
pub struct FilterStage;

impl Stage for FilterStage {
    fn apply(&mut self, records: Vec<Record>) -> Vec<Record> {
        filter::filter_records(records)
    }

    fn name(&self) -> &str {
        "FILTER"
    }
}

/// SORT - stable ascending sort on one axis.
pub struct SortStage {
    cache: KeyCache,
}

impl SortStage {
    pub fn new(cache: KeyCache) -> Self {
        Self { cache }
    }
}

impl Stage for SortStage {
    fn apply(&mut self, mut records: Vec<Record>) -> Vec<Record> {
        sort_records(&mut records, &mut self.cache);
        tracing::debug!(
            axis = %self.cache.axis(),
            distinct_lines = self.cache.len(),
            cache_hits = self.cache.hits(),
            "sorted records"
        );
        records
    }

    fn name(&self) -> &str {
        "SORT"
    }
}

/// STEP - cuts the stream into batches separated by `0 STEP` markers.
pub struct StepStage {
    mode: BatchMode,
}

impl StepStage {
    pub fn new(mode: BatchMode) -> Self {
        Self { mode }
    }
}

impl Stage for StepStage {
    fn apply(&mut self, records: Vec<Record>) -> Vec<Record> {
        let size = batch_size(self.mode, records.len());
        tracing::debug!(
            mode = ?self.mode,
            records = records.len(),
            batch_size = size.map_or(records.len(), |s| s.get()),
            "batching records"
        );
        interleave_steps(records, size).collect()
    }

    fn name(&self) -> &str {
        "STEP"
    }
}

/// Build the stage chain for `config`.
pub fn build_stages(config: &StepConfig) -> Result<Vec<Box<dyn Stage>>> {
    let mode = config.batch_mode()?;
    Ok(vec![
        Box::new(FilterStage),
        Box::new(SortStage::new(KeyCache::new(config.axis))),
        Box::new(StepStage::new(mode)),
    ])
}
