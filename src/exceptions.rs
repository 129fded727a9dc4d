//! Error types for releasekit

use crate::bundle::record::RecordError;
use std::fmt;

/// Main error type for releasekit operations
#[derive(Debug)]
pub enum ReleaseError {
    /// Invalid or unreadable release configuration
    Config(String),

    /// Malformed BundleConfig record
    Record(RecordError),

    /// Drawing surface could not be created or a shape was rejected
    Render(String),

    /// Image decode/encode error
    Image(image::ImageError),

    /// Zip archive error
    Archive(zip::result::ZipError),

    /// IO error
    Io(std::io::Error),

    /// JSON parsing error
    Json(serde_json::Error),

    /// Invalid exclusion glob
    Pattern(glob::PatternError),

    /// An output failed its post-build check
    Validation(String),

    /// Generic error with message
    Generic(String),
}

impl fmt::Display for ReleaseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReleaseError::Config(msg) => write!(f, "Configuration error: {msg}"),
            ReleaseError::Record(err) => write!(f, "Invalid BundleConfig record: {err}"),
            ReleaseError::Render(msg) => write!(f, "Render error: {msg}"),
            ReleaseError::Image(err) => write!(f, "Image error: {err}"),
            ReleaseError::Archive(err) => write!(f, "Archive error: {err}"),
            ReleaseError::Io(err) => write!(f, "IO error: {err}"),
            ReleaseError::Json(err) => write!(f, "JSON error: {err}"),
            ReleaseError::Pattern(err) => write!(f, "Invalid pattern: {err}"),
            ReleaseError::Validation(msg) => write!(f, "Validation failed: {msg}"),
            ReleaseError::Generic(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for ReleaseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ReleaseError::Record(err) => Some(err),
            ReleaseError::Image(err) => Some(err),
            ReleaseError::Archive(err) => Some(err),
            ReleaseError::Io(err) => Some(err),
            ReleaseError::Json(err) => Some(err),
            ReleaseError::Pattern(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RecordError> for ReleaseError {
    fn from(err: RecordError) -> Self {
        ReleaseError::Record(err)
    }
}

impl From<image::ImageError> for ReleaseError {
    fn from(err: image::ImageError) -> Self {
        ReleaseError::Image(err)
    }
}

impl From<zip::result::ZipError> for ReleaseError {
    fn from(err: zip::result::ZipError) -> Self {
        ReleaseError::Archive(err)
    }
}

impl From<std::io::Error> for ReleaseError {
    fn from(err: std::io::Error) -> Self {
        ReleaseError::Io(err)
    }
}

impl From<serde_json::Error> for ReleaseError {
    fn from(err: serde_json::Error) -> Self {
        ReleaseError::Json(err)
    }
}

impl From<glob::PatternError> for ReleaseError {
    fn from(err: glob::PatternError) -> Self {
        ReleaseError::Pattern(err)
    }
}

impl From<anyhow::Error> for ReleaseError {
    fn from(err: anyhow::Error) -> Self {
        ReleaseError::Generic(format!("{err:#}"))
    }
}

/// Result type for releasekit operations
pub type Result<T> = std::result::Result<T, ReleaseError>;
