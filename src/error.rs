/// Error types for the ip2country library
use std::fmt;

/// Result type alias for index operations
pub type Result<T> = std::result::Result<T, Ip2CountryError>;

/// Kind of a build-time failure, independent of any attached context
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Dataset line does not hold exactly three fields (or start > end)
    InvalidLine,
    /// Malformed IPv4 address text
    InvalidIpv4,
    /// Malformed IPv6 address text
    InvalidIpv6,
    /// Underlying reader failed
    Io,
}

/// Main error type for index construction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ip2CountryError {
    /// Dataset line is structurally invalid
    InvalidLine(String),

    /// IPv4 address could not be parsed
    InvalidIpv4(String),

    /// IPv6 address could not be parsed
    InvalidIpv6(String),

    /// I/O errors while reading a dataset
    Io(String),

    /// An error raised while processing a specific dataset line (1-based)
    AtLine {
        /// Line number within the input, starting at 1
        line: usize,
        /// The underlying failure
        source: Box<Ip2CountryError>,
    },
}

impl Ip2CountryError {
    /// Wrap this error with the dataset line number it was raised on
    pub fn at_line(self, line: usize) -> Self {
        Ip2CountryError::AtLine {
            line,
            source: Box::new(self),
        }
    }

    /// Kind of the underlying failure, looking through line context
    pub fn kind(&self) -> ErrorKind {
        match self {
            Ip2CountryError::InvalidLine(_) => ErrorKind::InvalidLine,
            Ip2CountryError::InvalidIpv4(_) => ErrorKind::InvalidIpv4,
            Ip2CountryError::InvalidIpv6(_) => ErrorKind::InvalidIpv6,
            Ip2CountryError::Io(_) => ErrorKind::Io,
            Ip2CountryError::AtLine { source, .. } => source.kind(),
        }
    }

    /// Line number the error was raised on, if known
    pub fn line(&self) -> Option<usize> {
        match self {
            Ip2CountryError::AtLine { line, .. } => Some(*line),
            _ => None,
        }
    }
}

impl fmt::Display for Ip2CountryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ip2CountryError::InvalidLine(msg) => write!(f, "Invalid line structure: {}", msg),
            Ip2CountryError::InvalidIpv4(msg) => write!(f, "Invalid IPv4 address: {}", msg),
            Ip2CountryError::InvalidIpv6(msg) => write!(f, "Invalid IPv6 address: {}", msg),
            Ip2CountryError::Io(msg) => write!(f, "I/O error: {}", msg),
            Ip2CountryError::AtLine { line, source } => write!(f, "line {}: {}", line, source),
        }
    }
}

impl std::error::Error for Ip2CountryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Ip2CountryError::AtLine { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Ip2CountryError {
    fn from(err: std::io::Error) -> Self {
        Ip2CountryError::Io(err.to_string())
    }
}
