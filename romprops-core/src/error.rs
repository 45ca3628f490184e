use thiserror::Error;

/// Errors that can occur while opening, parsing, or decoding a ROM image.
#[derive(Debug, Error)]
pub enum RomError {
    /// I/O error while reading the file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The file handle is missing or could not be duplicated
    #[error("Bad file handle: {0}")]
    BadHandle(String),

    /// The detector rejected the file, or disagreed with the caller
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    /// An index or image type is outside the valid bounds
    #[error("Out of range: {0}")]
    Range(String),

    /// Recognized but not implemented, or no decoder for the data
    #[error("Unsupported: {0}")]
    Unsupported(String),

    /// A field is present but internally inconsistent
    #[error("Malformed data: {0}")]
    Malformed(String),

    /// A field payload does not match its descriptor kind
    #[error("Field {index}: expected {expected} data, got {actual}")]
    KindMismatch {
        index: usize,
        expected: &'static str,
        actual: &'static str,
    },
}

impl RomError {
    pub fn bad_handle(msg: impl Into<String>) -> Self {
        Self::BadHandle(msg.into())
    }

    pub fn invalid_format(msg: impl Into<String>) -> Self {
        Self::InvalidFormat(msg.into())
    }

    pub fn range(msg: impl Into<String>) -> Self {
        Self::Range(msg.into())
    }

    pub fn unsupported(msg: impl Into<String>) -> Self {
        Self::Unsupported(msg.into())
    }

    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::Malformed(msg.into())
    }
}
