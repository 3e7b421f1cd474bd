//! ip2country - IP Address to Country Lookups
//!
//! Maps IPv4 and IPv6 addresses to the country code of the registered
//! address range containing them. An index is built once from a dataset of
//! disjoint closed ranges (the DB-IP country CSV layout) and then queried any
//! number of times, from any number of threads.
//!
//! # Quick Start
//!
//! ```rust
//! use ip2country::build;
//!
//! let index = build([
//!     r#""0.0.0.0","0.255.255.255","ZZ""#,
//!     r#""50.97.196.0","50.97.197.255","US""#,
//!     r#""50.97.198.0","50.97.199.255","CN""#,
//! ])?;
//!
//! assert_eq!(index.lookup("50.97.198.135"), "CN");
//!
//! // Batch lookups run in parallel and keep input order
//! let countries = index.lookup_many(&["0.0.0.0", "50.97.196.208", "9.9.9.9"]);
//! assert_eq!(countries, vec!["ZZ", "US", ""]);
//! # Ok::<(), ip2country::Ip2CountryError>(())
//! ```
//!
//! # Architecture
//!
//! ```text
//! dataset lines ──► codec (text → u32 / u128) ──► AddressRangeIndex
//!                                                  ├── IPv4 ranges (sorted)
//!                                                  └── IPv6 ranges (sorted)
//! address text ──► codec ──► query::find (binary search) ──► country
//! ```
//!
//! Build errors are fatal and carry the offending line number. Lookup never
//! fails: unparseable or unknown addresses map to an empty string.

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Address text to integer conversion
pub mod codec;
/// Error types for index construction
pub mod error;
pub mod file_reader;
/// Address range index and build entry points
pub mod index;
/// Binary search over sorted ranges
pub mod query;
/// Range types
pub mod range;

pub use crate::codec::{classify, parse_v4, parse_v6, AddressFamily};
pub use crate::error::{ErrorKind, Ip2CountryError, Result};
pub use crate::index::{build, AddressRangeIndex, IndexStats, Overlap};
pub use crate::range::{Interval, Range, Range128, Range32};
