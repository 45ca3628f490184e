use thiserror::Error;

use romprops_lib::RomError;

/// Errors that can occur during CLI command execution.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// Detection or parsing failed
    #[error("{0}")]
    Rom(#[from] RomError),

    /// Resizing or encoding a thumbnail failed
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Some of several inputs could not be processed
    #[error("{failed} of {total} files could not be read")]
    Partial { failed: usize, total: usize },

    /// Catch-all for other errors
    #[error("{0}")]
    Other(String),
}

impl CliError {
    pub(crate) fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }
}
