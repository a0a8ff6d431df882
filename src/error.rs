use std::{
    fmt,
    path::{Path, PathBuf},
};

/// What went wrong while decoding a single Netpbm file
#[derive(Debug)]
pub enum DecodeErrorKind {
    /// The magic token is neither `P2` nor `P3`
    UnsupportedFormat(String),

    /// Fewer than three header tokens (width, height, max value) were available
    MalformedHeader,

    /// Width, height or max value is not strictly positive, or the sample count overflows
    InvalidDimensions {
        width: i64,
        height: i64,
        max_value: i64,
    },

    /// The body ended before `width * height * channels` samples were read
    TruncatedData { expected: usize, found: usize },

    /// A header or sample token is not a decimal integer
    InvalidInteger { token: String, line: usize },

    /// A header or sample token is an integer outside the 64-bit signed range
    IntegerOverflow { token: String, line: usize },

    /// Error occurred while opening or reading the file
    Io(std::io::Error),
}

impl fmt::Display for DecodeErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeErrorKind::UnsupportedFormat(magic) => {
                write!(f, "only P2/P3 supported, got {:?}", magic)
            }
            DecodeErrorKind::MalformedHeader => {
                write!(f, "malformed header, expected width, height and max value")
            }
            DecodeErrorKind::InvalidDimensions {
                width,
                height,
                max_value,
            } => write!(
                f,
                "invalid dimensions/maxval: width={}, height={}, maxval={}",
                width, height, max_value
            ),
            DecodeErrorKind::TruncatedData { expected, found } => write!(
                f,
                "unexpected EOF in pixel data: expected {} samples, found {}",
                expected, found
            ),
            DecodeErrorKind::InvalidInteger { token, line } => {
                write!(f, "invalid integer {:?} on line {}", token, line)
            }
            DecodeErrorKind::IntegerOverflow { token, line } => write!(
                f,
                "integer {} on line {} does not fit in a signed 64-bit sample",
                token, line
            ),
            DecodeErrorKind::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

/// A decode failure tied to the file it happened in
#[derive(Debug)]
pub struct DecodeError {
    path: PathBuf,
    kind: DecodeErrorKind,
}

impl DecodeError {
    pub fn new(path: impl Into<PathBuf>, kind: DecodeErrorKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn kind(&self) -> &DecodeErrorKind {
        &self.kind
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path.display(), self.kind)
    }
}

impl std::error::Error for DecodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.kind {
            DecodeErrorKind::Io(e) => Some(e),
            _ => None,
        }
    }
}

/// The main error type for the netpbm-diff crate
#[derive(Debug)]
pub enum Error {
    /// One of the input images could not be decoded
    Decode(DecodeError),

    /// The batch manifest could not be read or is malformed
    Config(crate::config::ConfigError),

    /// Error occurred while writing the report
    Io(std::io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Decode(e) => write!(f, "Decode error: {}", e),
            Error::Config(e) => write!(f, "Config error: {}", e),
            Error::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            // Display already carries the wrapped message, skip straight to its cause
            Error::Decode(e) => std::error::Error::source(e),
            Error::Config(e) => std::error::Error::source(e),
            Error::Io(e) => std::error::Error::source(e),
        }
    }
}

impl From<DecodeError> for Error {
    fn from(err: DecodeError) -> Self {
        Error::Decode(err)
    }
}

impl From<crate::config::ConfigError> for Error {
    fn from(err: crate::config::ConfigError) -> Self {
        Error::Config(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

// Convenience type alias for Results using the crate Error
pub type Result<T = ()> = std::result::Result<T, Error>;
