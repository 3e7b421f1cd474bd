//! Binary search over a sorted range collection
//!
//! Each probe compares the key against an interval rather than a point:
//! left when the key is below `start`, right when it is above `end`, and a
//! match otherwise. The same routine serves both keyspaces.

use crate::range::Interval;
use std::cmp::Ordering;

/// Find the index of the range containing `key`
///
/// `ranges` must be sorted by start and pairwise disjoint. With overlapping
/// ranges any one of the ranges containing the key may be returned.
pub fn find<R: Interval>(ranges: &[R], key: R::Key) -> Option<usize> {
    // Half-open window [lo, hi)
    let mut lo = 0usize;
    let mut hi = ranges.len();

    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        match ranges[mid].locate(key) {
            Ordering::Greater => hi = mid,
            Ordering::Less => lo = mid + 1,
            Ordering::Equal => return Some(mid),
        }
    }

    None
}

/// Find the range containing `key`
#[inline]
pub fn find_range<R: Interval>(ranges: &[R], key: R::Key) -> Option<&R> {
    find(ranges, key).map(|i| &ranges[i])
}
