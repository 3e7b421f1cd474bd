//! Address range index
//!
//! Holds one sorted range collection per keyspace and answers
//! address-to-country lookups against them.
//!
//! # Lifecycle
//!
//! The index starts empty, grows one range at a time through
//! [`AddressRangeIndex::insert`], and is read-only afterwards. Insertion
//! takes `&mut self`, so once the index is shared by reference across
//! threads it can no longer change and lookups need no locking.
//!
//! # Error contract
//!
//! Malformed dataset lines are fatal while building: [`build`] stops at the
//! first bad line and returns its error. Malformed addresses at query time
//! are not errors: [`AddressRangeIndex::lookup`] returns an empty string for
//! them, exactly as for an address no range contains, so one bad entry never
//! aborts a batch.
//!
//! # Example
//!
//! ```rust
//! use ip2country::build;
//!
//! let index = build([
//!     r#""0.0.0.0","0.255.255.255","ZZ""#,
//!     r#""50.97.196.0","50.97.197.255","US""#,
//!     r#""fec0::","feff::","V6""#,
//! ])?;
//!
//! assert_eq!(index.lookup("50.97.196.208"), "US");
//! assert_eq!(index.lookup("fec0:1::"), "V6");
//! assert_eq!(index.lookup("8.8.8.8"), "");
//! # Ok::<(), ip2country::Ip2CountryError>(())
//! ```

use crate::codec::{self, AddressFamily};
use crate::error::{Ip2CountryError, Result};
use crate::file_reader;
use crate::query;
use crate::range::{Interval, Range128, Range32};
use log::{debug, trace, warn};
use rayon::prelude::*;
use serde::Serialize;
use std::collections::BTreeSet;
use std::io::BufRead;
use std::net::IpAddr;
use std::path::Path;

/// Sorted range collections for both keyspaces
#[derive(Debug, Clone, Default)]
pub struct AddressRangeIndex {
    ranges_v4: Vec<Range32>,
    ranges_v6: Vec<Range128>,
}

/// Summary of an index
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexStats {
    /// Number of IPv4 ranges
    pub v4_ranges: usize,
    /// Number of IPv6 ranges
    pub v6_ranges: usize,
    /// Number of distinct country codes across both keyspaces
    pub countries: usize,
}

/// Two ranges of the same keyspace that share at least one address
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Overlap {
    /// Keyspace holding both ranges
    pub family: AddressFamily,
    /// Position of the earlier range in its collection
    pub first: usize,
    /// Position of the later range in its collection
    pub second: usize,
}

/// Build an index from dataset lines, stopping at the first bad line
///
/// Errors are wrapped with the 1-based number of the offending line. The
/// partially built index is dropped on failure.
pub fn build<I, S>(lines: I) -> Result<AddressRangeIndex>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut index = AddressRangeIndex::new();
    for (i, line) in lines.into_iter().enumerate() {
        index.insert(line.as_ref()).map_err(|e| e.at_line(i + 1))?;
    }
    index.log_summary();
    Ok(index)
}

impl AddressRangeIndex {
    /// Create an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an index from a buffered reader, one dataset line per line
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut index = Self::new();
        for (i, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| Ip2CountryError::from(e).at_line(i + 1))?;
            index.insert(&line).map_err(|e| e.at_line(i + 1))?;
        }
        index.log_summary();
        Ok(index)
    }

    /// Load a dataset file (`.gz` is decompressed, `-` reads stdin)
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading ranges from {}", path.display());
        let reader = file_reader::open(path)
            .map_err(|e| Ip2CountryError::Io(format!("Failed to open {}: {}", path.display(), e)))?;
        Self::from_reader(reader)
    }

    /// Insert one dataset line of the form `"start","end","country"`
    ///
    /// Double quotes are stripped, then exactly three comma-separated fields
    /// are required. The keyspace is chosen from the start address; both
    /// endpoints must parse in that keyspace and `start <= end` must hold.
    pub fn insert(&mut self, line: &str) -> Result<()> {
        let unquoted;
        let line = if memchr::memchr(b'"', line.as_bytes()).is_some() {
            unquoted = line.replace('"', "");
            unquoted.as_str()
        } else {
            line
        };

        let (start, end, country) = split_fields(line)?;

        match codec::classify(start) {
            AddressFamily::V6 => {
                let (s, e) = (codec::parse_v6(start)?, codec::parse_v6(end)?);
                check_order(s, e, line)?;
                self.insert_v6(Range128::new(s, e, country));
            }
            AddressFamily::V4 => {
                let (s, e) = (codec::parse_v4(start)?, codec::parse_v4(end)?);
                check_order(s, e, line)?;
                self.insert_v4(Range32::new(s, e, country));
            }
        }

        trace!("Inserted range {} - {} ({})", start, end, country);
        Ok(())
    }

    /// Insert an already-parsed IPv4 range, keeping the collection sorted
    pub fn insert_v4(&mut self, range: Range32) {
        self.ranges_v4.push(range);
        settle_last(&mut self.ranges_v4);
    }

    /// Insert an already-parsed IPv6 range, keeping the collection sorted
    pub fn insert_v6(&mut self, range: Range128) {
        self.ranges_v6.push(range);
        settle_last(&mut self.ranges_v6);
    }

    /// Country code for an address text, or `""` when unknown
    ///
    /// Unparseable address text yields `""` rather than an error.
    pub fn lookup(&self, text: &str) -> &str {
        let found = match codec::classify(text) {
            AddressFamily::V6 => match codec::parse_v6(text) {
                Ok(key) => self.find_v6(key).map(|r| r.country.as_str()),
                Err(e) => {
                    trace!("Ignoring lookup for {:?}: {}", text, e);
                    None
                }
            },
            AddressFamily::V4 => match codec::parse_v4(text) {
                Ok(key) => self.find_v4(key).map(|r| r.country.as_str()),
                Err(e) => {
                    trace!("Ignoring lookup for {:?}: {}", text, e);
                    None
                }
            },
        };

        found.unwrap_or("")
    }

    /// Batch version of [`lookup`](Self::lookup)
    ///
    /// Every address is resolved independently on the rayon pool. The result
    /// has the same length and order as `texts`; the call returns once all
    /// lookups have finished.
    pub fn lookup_many<S>(&self, texts: &[S]) -> Vec<String>
    where
        S: AsRef<str> + Sync,
    {
        texts
            .par_iter()
            .map(|text| self.lookup(text.as_ref()).to_string())
            .collect()
    }

    /// Country code for a parsed address
    pub fn lookup_ip(&self, addr: IpAddr) -> Option<&str> {
        match addr {
            IpAddr::V4(v4) => self.find_v4(u32::from(v4)).map(|r| r.country.as_str()),
            IpAddr::V6(v6) => self.find_v6(u128::from(v6)).map(|r| r.country.as_str()),
        }
    }

    /// IPv4 range containing `key`
    pub fn find_v4(&self, key: u32) -> Option<&Range32> {
        query::find_range(&self.ranges_v4, key)
    }

    /// IPv6 range containing `key`
    pub fn find_v6(&self, key: u128) -> Option<&Range128> {
        query::find_range(&self.ranges_v6, key)
    }

    /// IPv4 ranges, sorted by start
    pub fn ranges_v4(&self) -> &[Range32] {
        &self.ranges_v4
    }

    /// IPv6 ranges, sorted by start
    pub fn ranges_v6(&self) -> &[Range128] {
        &self.ranges_v6
    }

    /// Total number of ranges across both keyspaces
    pub fn len(&self) -> usize {
        self.ranges_v4.len() + self.ranges_v6.len()
    }

    /// Whether no range has been inserted
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Range counts and distinct countries
    pub fn stats(&self) -> IndexStats {
        let countries: BTreeSet<&str> = self
            .ranges_v4
            .iter()
            .map(|r| r.country.as_str())
            .chain(self.ranges_v6.iter().map(|r| r.country.as_str()))
            .collect();

        IndexStats {
            v4_ranges: self.ranges_v4.len(),
            v6_ranges: self.ranges_v6.len(),
            countries: countries.len(),
        }
    }

    /// Every pair of ranges that share addresses
    ///
    /// Lookups assume disjoint ranges; this reports where a dataset breaks
    /// that assumption. Pairs are ordered by position of the earlier range,
    /// then of the later one.
    pub fn overlaps(&self) -> Vec<Overlap> {
        let mut found = overlapping(&self.ranges_v4, AddressFamily::V4);
        found.extend(overlapping(&self.ranges_v6, AddressFamily::V6));
        for o in &found {
            warn!(
                "{:?} ranges #{} and #{} overlap",
                o.family, o.first, o.second
            );
        }
        found
    }

    fn log_summary(&self) {
        debug!(
            "Built index: {} IPv4 ranges, {} IPv6 ranges",
            self.ranges_v4.len(),
            self.ranges_v6.len()
        );
    }
}

/// Split an unquoted line into exactly three fields
fn split_fields(line: &str) -> Result<(&str, &str, &str)> {
    let mut commas = memchr::memchr_iter(b',', line.as_bytes());
    match (commas.next(), commas.next(), commas.next()) {
        (Some(a), Some(b), None) => Ok((&line[..a], &line[a + 1..b], &line[b + 1..])),
        _ => Err(Ip2CountryError::InvalidLine(line.to_string())),
    }
}

fn check_order<K: Ord>(start: K, end: K, line: &str) -> Result<()> {
    if start > end {
        return Err(Ip2CountryError::InvalidLine(format!(
            "range start exceeds end: {}",
            line
        )));
    }
    Ok(())
}

/// Move the last element backward until the slice is sorted by start again
///
/// Only the last element may be out of place. Equal starts keep insertion
/// order.
fn settle_last<R: Interval>(ranges: &mut [R]) {
    let mut i = ranges.len().saturating_sub(1);
    while i > 0 && ranges[i].start() < ranges[i - 1].start() {
        ranges.swap(i, i - 1);
        i -= 1;
    }
}

fn overlapping<R: Interval>(ranges: &[R], family: AddressFamily) -> Vec<Overlap> {
    let mut found = Vec::new();

    // Sorted by start: once a later range begins past `range.end()`, so do
    // all the ones after it
    for (i, range) in ranges.iter().enumerate() {
        for (j, later) in ranges.iter().enumerate().skip(i + 1) {
            if later.start() > range.end() {
                break;
            }
            found.push(Overlap {
                family,
                first: i,
                second: j,
            });
        }
    }

    found
}
