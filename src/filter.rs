//! Line filtering.
//!
//! Only lines that can be ordered into steps survive: blank lines and the
//! ignored line types are dropped, everything else passes. Unknown or
//! non-numeric line types are kept so that extensions to the format are
//! carried through untouched.

use crate::record::{IGNORED_LINE_TYPES, Record};

/// True if `record` should take part in sorting and batching.
pub fn accept(record: &Record) -> bool {
    if record.is_blank() {
        return false;
    }
    match record.line_type() {
        Some(line_type) => !IGNORED_LINE_TYPES.contains(&line_type),
        None => true,
    }
}

/// Keep only the accepted records, preserving their order.
pub fn filter_records(records: Vec<Record>) -> Vec<Record> {
    records.into_iter().filter(accept).collect()
}
