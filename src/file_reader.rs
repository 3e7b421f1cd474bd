//! Buffered dataset and address-list readers
//!
//! Range datasets are often shipped gzip-compressed (`dbip-country.csv.gz`).
//! [`open`] picks decompression from the file extension so callers can feed
//! either form straight into [`AddressRangeIndex::from_reader`].
//!
//! [`AddressRangeIndex::from_reader`]: crate::AddressRangeIndex::from_reader
//!
//! ```rust,no_run
//! use ip2country::{file_reader, AddressRangeIndex};
//!
//! let reader = file_reader::open("dbip-country.csv.gz")?;
//! let index = AddressRangeIndex::from_reader(reader)?;
//! println!("{}", index.lookup("1.1.1.1"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use flate2::read::GzDecoder;
use std::fs::File;
use std::io::{self, stdin, BufRead, BufReader};
use std::path::Path;

/// Read buffer size (128KB)
const BUFFER_SIZE: usize = 128 * 1024;

/// Open `path` for line-by-line reading
///
/// `-` reads stdin; a `.gz` extension (any case) is decompressed on the fly.
pub fn open<P: AsRef<Path>>(path: P) -> io::Result<Box<dyn BufRead + Send>> {
    let path = path.as_ref();

    if path.to_str() == Some("-") {
        return Ok(Box::new(BufReader::with_capacity(BUFFER_SIZE, stdin())));
    }

    let file = File::open(path)?;
    Ok(from_file(file, is_gzip(path)))
}

/// Wrap an open file, decompressing when `gzip` is set
pub fn from_file(file: File, gzip: bool) -> Box<dyn BufRead + Send> {
    if gzip {
        Box::new(BufReader::with_capacity(BUFFER_SIZE, GzDecoder::new(file)))
    } else {
        Box::new(BufReader::with_capacity(BUFFER_SIZE, file))
    }
}

fn is_gzip(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("gz"))
        .unwrap_or(false)
}
