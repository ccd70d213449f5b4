use thiserror::Error;

/// Errors produced while decoding or converting a CMOD document.
///
/// Every structural violation of the format is a [`CmodError::Format`] with
/// a human-readable cause; the decoder aborts on the first one, there is no
/// recoverable subset.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CmodError {
    #[error("Malformed cmod: {0}")]
    Format(String),
    #[error("IO error: {0}")]
    Io(String),
}

impl CmodError {
    /// Creates a format error with the given cause.
    pub fn format(message: impl Into<String>) -> Self {
        CmodError::Format(message.into())
    }
}

impl From<std::io::Error> for CmodError {
    fn from(err: std::io::Error) -> Self {
        CmodError::Io(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CmodError>;
