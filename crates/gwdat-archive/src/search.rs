//! Numeric id search over the id table.
//!
//! A query matches a candidate id when the query's decimal digits form the
//! right-aligned tail of some decimal truncation of the candidate. With query
//! `123`, the candidates `123`, `9123` and `12345` all match (the last one by
//! dropping `45`), while `1293` does not. This is neither a textual substring
//! nor a prefix match: the digits of the query must sit at the end of what
//! remains after dropping trailing digits of the candidate.

use std::collections::BTreeSet;

use crate::index::{IdIndex, IndexRecord};

/// Which id of a record a search compares against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IdField {
    /// Match against the asset group id.
    #[default]
    BaseId,
    /// Match against the individual file id.
    FileId,
}

impl IdField {
    #[inline]
    fn of(self, record: &IndexRecord) -> u32 {
        match self {
            Self::BaseId => record.base_id,
            Self::FileId => record.file_id,
        }
    }
}

impl IdIndex {
    /// Find the base ids of every record whose `field` matches `query`.
    ///
    /// This is a full linear scan. Duplicates collapse, and the result is in
    /// ascending order. A query of `0` has no digits and matches every record.
    pub fn find(&self, query: u32, field: IdField) -> BTreeSet<u32> {
        let divisor = decimal_divisor(query);
        self.records()
            .iter()
            .filter(|record| matches_truncation(field.of(record), query, divisor))
            .map(|record| record.base_id)
            .collect()
    }

    /// Parallel variant of [`IdIndex::find`] with identical results.
    #[cfg(feature = "parallel")]
    pub fn par_find(&self, query: u32, field: IdField) -> BTreeSet<u32> {
        use rayon::prelude::*;

        let divisor = decimal_divisor(query);
        self.records()
            .par_iter()
            .filter(|record| matches_truncation(field.of(record), query, divisor))
            .map(|record| record.base_id)
            .collect()
    }
}

/// `10^n` where `n` is the number of decimal digits in `query`.
///
/// Computed in `u64` so that ten-digit queries do not overflow.
fn decimal_divisor(query: u32) -> u64 {
    let mut divisor = 1u64;
    let mut rest = query;
    while rest > 0 {
        divisor *= 10;
        rest /= 10;
    }
    divisor
}

fn matches_truncation(candidate: u32, query: u32, divisor: u64) -> bool {
    let mut candidate = candidate;
    while candidate >= query {
        if u64::from(candidate) % divisor == u64::from(query) {
            return true;
        }
        if candidate == 0 {
            break;
        }
        candidate /= 10;
    }
    false
}
