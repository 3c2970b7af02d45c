// SPDX-License-Identifier: MPL-2.0
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    Io(String),
    Config(String),
    /// The file picker was dismissed without a selection.
    NoFileSelected,
    /// The selected file is not a decodable image (or has empty dimensions).
    Decode(String),
    /// A zoom or gesture operation arrived while no image is loaded.
    NotEditing,
    Export(ExportError),
    Upload(UploadError),
}

/// Reasons the final crop could not be produced.
#[derive(Debug, Clone, PartialEq)]
pub enum ExportError {
    /// The preview surface has never been drawn, so there is nothing to sample.
    NothingRendered,
    /// The JPEG encoder failed.
    Encode(String),
    /// The background encode task died before completing.
    TaskAborted,
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportError::NothingRendered => write!(f, "No image has been rendered yet"),
            ExportError::Encode(msg) => write!(f, "Encoding failed: {}", msg),
            ExportError::TaskAborted => write!(f, "Encoding task was aborted"),
        }
    }
}

/// Specific error types for the avatar upload request.
/// Used to tell the user what went wrong without leaking transport details.
#[derive(Debug, Clone, PartialEq)]
pub enum UploadError {
    /// The configured server URL cannot be parsed or joined with the upload path.
    InvalidEndpoint(String),

    /// The server could not be reached (DNS, refused connection, TLS, ...).
    Unreachable(String),

    /// The request did not complete in time.
    Timeout,

    /// The encoded avatar exceeds the server's multipart limit.
    TooLarge { size: usize, limit: usize },

    /// Generic error with raw message
    Other(String),
}

impl UploadError {
    /// Categorizes a transport error returned by `reqwest`.
    pub fn from_reqwest(err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            return UploadError::Timeout;
        }
        if err.is_builder() {
            return UploadError::InvalidEndpoint(err.to_string());
        }
        if err.is_connect() || err.is_request() {
            return UploadError::Unreachable(err.to_string());
        }
        UploadError::Other(err.to_string())
    }
}

impl fmt::Display for UploadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UploadError::InvalidEndpoint(msg) => write!(f, "Invalid upload endpoint: {}", msg),
            UploadError::Unreachable(msg) => write!(f, "Server unreachable: {}", msg),
            UploadError::Timeout => write!(f, "Upload timed out"),
            UploadError::TooLarge { size, limit } => {
                write!(f, "Avatar is too large ({} bytes, limit {})", size, limit)
            }
            UploadError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
            Error::NoFileSelected => write!(f, "No file selected"),
            Error::Decode(e) => write!(f, "Decode Error: {}", e),
            Error::NotEditing => write!(f, "No image is being edited"),
            Error::Export(e) => write!(f, "Export Error: {}", e),
            Error::Upload(e) => write!(f, "Upload Error: {}", e),
        }
    }
}

impl std::error::Error for Error {}

impl From<ExportError> for Error {
    fn from(err: ExportError) -> Self {
        Error::Export(err)
    }
}

impl From<UploadError> for Error {
    fn from(err: UploadError) -> Self {
        Error::Upload(err)
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Upload(UploadError::from_reqwest(&err))
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
