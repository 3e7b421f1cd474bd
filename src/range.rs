//! Closed address ranges mapped to a country code

use serde::Serialize;
use std::cmp::Ordering;

/// A closed interval `[start, end]` in one keyspace
pub trait Interval {
    /// Key type of the keyspace (`u32` or `u128`)
    type Key: Ord + Copy;

    /// First address covered
    fn start(&self) -> Self::Key;

    /// Last address covered (inclusive)
    fn end(&self) -> Self::Key;

    /// Where `key` lies relative to this interval
    ///
    /// `Greater` means the interval sits after the key, `Less` means it sits
    /// before it, `Equal` means the key is inside.
    #[inline]
    fn locate(&self, key: Self::Key) -> Ordering {
        if key < self.start() {
            Ordering::Greater
        } else if key > self.end() {
            Ordering::Less
        } else {
            Ordering::Equal
        }
    }

    /// Whether `key` falls inside the interval
    #[inline]
    fn contains(&self, key: Self::Key) -> bool {
        self.locate(key) == Ordering::Equal
    }
}

/// Address range with its country code
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Range<K> {
    /// First address (inclusive)
    pub start: K,
    /// Last address (inclusive)
    pub end: K,
    /// Country code, usually ISO 3166-1 alpha-2 (not validated)
    pub country: String,
}

/// Range in the 32-bit keyspace
pub type Range32 = Range<u32>;

/// Range in the 128-bit keyspace
pub type Range128 = Range<u128>;

impl<K> Range<K> {
    /// Create a range
    pub fn new(start: K, end: K, country: impl Into<String>) -> Self {
        Self {
            start,
            end,
            country: country.into(),
        }
    }
}

impl<K: Ord + Copy> Interval for Range<K> {
    type Key = K;

    #[inline]
    fn start(&self) -> K {
        self.start
    }

    #[inline]
    fn end(&self) -> K {
        self.end
    }
}
