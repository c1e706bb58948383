//! Batching and step marker insertion.
//!
//! Sorted records are cut into consecutive batches of a fixed size and a
//! `0 STEP` marker goes between each pair of batches: never before the first
//! nor after the last.
//!
//! A batch size of `None` means "everything in one batch". That is what
//! total-steps mode degrades to when it asks for more steps than there are
//! records, or when there are no records at all.

use std::iter::Peekable;
use std::num::NonZeroUsize;

use crate::config::BatchMode;
use crate::record::Record;

/// Batch size for `mode` given `total` accepted records.
///
/// Pieces mode uses the configured size as is. Total-steps mode uses
/// `total / steps` rounded down; a result of zero yields `None`.
pub fn batch_size(mode: BatchMode, total: usize) -> Option<NonZeroUsize> {
    match mode {
        BatchMode::Pieces(pieces) => Some(pieces),
        BatchMode::TotalSteps(steps) => NonZeroUsize::new(total / steps.get()),
    }
}

/// Number of non-empty batches `total` records split into.
pub fn batch_count(total: usize, size: Option<NonZeroUsize>) -> usize {
    match (total, size) {
        (0, _) => 0,
        (_, None) => 1,
        (_, Some(size)) => total.div_ceil(size.get()),
    }
}

/// Iterator adapter yielding records with a step marker between batches.
///
/// Works on a running count, so in pieces mode it can start yielding before
/// the underlying iterator is exhausted.
pub struct StepInterleave<I: Iterator<Item = Record>> {
    records: Peekable<I>,
    size: Option<NonZeroUsize>,
    in_batch: usize,
}

impl<I: Iterator<Item = Record>> StepInterleave<I> {
    pub fn new(records: I, size: Option<NonZeroUsize>) -> Self {
        Self {
            records: records.peekable(),
            size,
            in_batch: 0,
        }
    }
}

impl<I: Iterator<Item = Record>> Iterator for StepInterleave<I> {
    type Item = Record;

    fn next(&mut self) -> Option<Record> {
        // A marker is only due once another record is known to follow.
        self.records.peek()?;
        if let Some(size) = self.size
            && self.in_batch == size.get()
        {
            self.in_batch = 0;
            return Some(Record::step_marker());
        }
        self.in_batch += 1;
        self.records.next()
    }
}

/// Convenience wrapper around [`StepInterleave::new`].
pub fn interleave_steps<I>(records: I, size: Option<NonZeroUsize>) -> StepInterleave<I::IntoIter>
where
    I: IntoIterator<Item = Record>,
{
    StepInterleave::new(records.into_iter(), size)
}
