/// Represents errors that can occur while running a probing experiment
#[derive(Debug)]
pub enum Error {
    /// I/O error while reading keys or writing the report
    Io(std::io::Error),

    /// Key source contained invalid UTF-8
    Utf8(std::str::Utf8Error),

    /// Key is shorter than the hash function can sample (len, required)
    KeyTooShort {
        /// Length of the offending key, in characters
        len: usize,

        /// Minimum length the hash function reads
        required: usize,
    },

    /// Table size must be at least 1
    InvalidTableSize(usize),

    /// Unparseable configuration value
    InvalidConfig(String),

    /// Rendered report differs from the expected baseline
    BaselineMismatch,
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ProbeLabError: {self:?}")
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<std::str::Utf8Error> for Error {
    fn from(value: std::str::Utf8Error) -> Self {
        Self::Utf8(value)
    }
}

/// Probe lab result
pub type Result<T> = std::result::Result<T, Error>;
