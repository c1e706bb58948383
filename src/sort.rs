//! Axis sorting of placement lines.
//!
//! The sort key of a line is the integer at the column selected by the axis.
//! Lines whose key cannot be parsed get [`SortKey::Unparsed`], which orders
//! before every number, so malformed lines collect at the front instead of
//! aborting the sort.
//!
//! Key extraction is memoized per distinct line text for the lifetime of a
//! [`KeyCache`]; a cache belongs to a single run.

use std::collections::HashMap;

use crate::axis::Axis;
use crate::record::{Record, parse_leading_int};

/// Sort key of a record. `Unparsed` compares less than any `Value`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SortKey {
    Unparsed,
    Value(i64),
}

impl SortKey {
    /// Extract the key for `axis` from `record`.
    pub fn extract(record: &Record, axis: Axis) -> Self {
        record
            .token(axis.column())
            .and_then(parse_leading_int)
            .map_or(SortKey::Unparsed, SortKey::Value)
    }
}

/// Memoized sort keys for one axis, keyed by raw line text.
#[derive(Debug)]
pub struct KeyCache {
    axis: Axis,
    keys: HashMap<Vec<u8>, SortKey>,
    hits: usize,
}

impl KeyCache {
    pub fn new(axis: Axis) -> Self {
        Self {
            axis,
            keys: HashMap::new(),
            hits: 0,
        }
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    /// Key for `record`, computing it on first sight of its text.
    pub fn key(&mut self, record: &Record) -> SortKey {
        if let Some(key) = self.keys.get(record.as_bytes()) {
            self.hits += 1;
            return *key;
        }
        let key = SortKey::extract(record, self.axis);
        self.keys.insert(record.as_bytes().to_vec(), key);
        key
    }

    /// Number of distinct lines seen.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Lookups answered from the cache.
    pub fn hits(&self) -> usize {
        self.hits
    }
}

/// Stable ascending sort of `records` by their key on the cache's axis.
///
/// Records with equal keys keep their input order.
pub fn sort_records(records: &mut [Record], cache: &mut KeyCache) {
    records.sort_by_cached_key(|r| cache.key(r));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn placement(x: &str, y: &str, z: &str, part: &str) -> Record {
        Record::from_str(&format!("1 4 {x} {y} {z} 1 0 0 0 1 0 0 0 1 {part}"))
    }

    fn parts(records: &[Record]) -> Vec<String> {
        records
            .iter()
            .map(|r| r.to_string().rsplit(' ').next().unwrap_or("").to_string())
            .collect()
    }

    #[test]
    fn test_extract_per_axis() {
        let r = placement("10", "-20", "30", "a.dat");
        assert_eq!(SortKey::extract(&r, Axis::X), SortKey::Value(10));
        assert_eq!(SortKey::extract(&r, Axis::Y), SortKey::Value(-20));
        assert_eq!(SortKey::extract(&r, Axis::Z), SortKey::Value(30));
    }

    #[test]
    fn test_extract_truncates_decimals() {
        let r = placement("0", "-24.75", "0", "a.dat");
        assert_eq!(SortKey::extract(&r, Axis::Y), SortKey::Value(-24));
    }

    #[test]
    fn test_extract_missing_or_bad_column() {
        assert_eq!(
            SortKey::extract(&Record::from_str("1 4"), Axis::Y),
            SortKey::Unparsed
        );
        assert_eq!(
            SortKey::extract(&placement("0", "abc", "0", "a.dat"), Axis::Y),
            SortKey::Unparsed
        );
    }

    #[test]
    fn test_unparsed_orders_first() {
        assert!(SortKey::Unparsed < SortKey::Value(i64::MIN));
        assert!(SortKey::Value(-1) < SortKey::Value(0));
    }

    #[test]
    fn test_sort_ascending_numeric() {
        let mut records = vec![
            placement("0", "100", "0", "c.dat"),
            placement("0", "-8", "0", "a.dat"),
            placement("0", "24", "0", "b.dat"),
        ];
        sort_records(&mut records, &mut KeyCache::new(Axis::Y));
        assert_eq!(parts(&records), vec!["a.dat", "b.dat", "c.dat"]);
    }

    #[test]
    fn test_sort_is_stable() {
        let mut records = vec![
            placement("0", "8", "0", "first.dat"),
            placement("0", "0", "0", "zero.dat"),
            placement("0", "8", "0", "second.dat"),
            placement("0", "8", "0", "third.dat"),
        ];
        sort_records(&mut records, &mut KeyCache::new(Axis::Y));
        assert_eq!(
            parts(&records),
            vec!["zero.dat", "first.dat", "second.dat", "third.dat"]
        );
    }

    #[test]
    fn test_sort_groups_unparsed_first() {
        let mut records = vec![
            placement("0", "5", "0", "five.dat"),
            Record::from_str("FILE sub.ldr"),
            placement("0", "-5", "0", "minus.dat"),
            placement("0", "?", "0", "bad.dat"),
        ];
        sort_records(&mut records, &mut KeyCache::new(Axis::Y));
        assert_eq!(parts(&records), vec!["sub.ldr", "bad.dat", "minus.dat", "five.dat"]);
    }

    #[test]
    fn test_sort_on_x_axis() {
        let mut records = vec![
            placement("30", "0", "0", "c.dat"),
            placement("10", "0", "0", "a.dat"),
            placement("20", "0", "0", "b.dat"),
        ];
        sort_records(&mut records, &mut KeyCache::new(Axis::X));
        assert_eq!(parts(&records), vec!["a.dat", "b.dat", "c.dat"]);
    }

    #[test]
    fn test_sort_is_idempotent() {
        let mut records = vec![
            placement("0", "3", "0", "a.dat"),
            placement("0", "1", "0", "b.dat"),
            placement("0", "3", "0", "c.dat"),
            placement("0", "2", "0", "d.dat"),
        ];
        sort_records(&mut records, &mut KeyCache::new(Axis::Y));
        let once = records.clone();
        sort_records(&mut records, &mut KeyCache::new(Axis::Y));
        assert_eq!(records, once);
    }

    #[test]
    fn test_sort_keeps_non_utf8_lines() {
        let mut records = vec![
            Record::from_bytes(b"1 4 0 8 0 1 0 0 0 1 0 0 0 1 st\xfcck.dat"),
            placement("0", "-8", "0", "a.dat"),
        ];
        sort_records(&mut records, &mut KeyCache::new(Axis::Y));
        assert_eq!(
            records[1].as_bytes(),
            b"1 4 0 8 0 1 0 0 0 1 0 0 0 1 st\xfcck.dat"
        );
    }

    #[test]
    fn test_cache_memoizes_repeated_lines() {
        let mut cache = KeyCache::new(Axis::Z);
        let r = placement("0", "0", "7", "a.dat");
        assert_eq!(cache.key(&r), SortKey::Value(7));
        assert_eq!(cache.key(&r.clone()), SortKey::Value(7));
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.hits(), 1);
        assert_eq!(cache.axis(), Axis::Z);
    }
}
