//! Error types for media element backends

use thiserror::Error;

/// Errors reported by a [`MediaElement`](crate::MediaElement) implementation
///
/// The controller never propagates these to its callers. They are logged
/// and the attempted operation is dropped.
#[derive(Debug, Error)]
pub enum MediaControllerError {
    /// The element refused to seek
    #[error("Seek to {position}s failed: {reason}")]
    Seek {
        /// Requested position in seconds
        position: f64,
        /// Backend-provided reason
        reason: String,
    },

    /// A time value that cannot be applied (NaN, infinite, negative)
    #[error("Invalid time value: {0}")]
    InvalidTime(f64),

    /// Any other backend failure
    #[error("Media backend error: {0}")]
    Backend(String),
}

/// Result type for media element operations
pub type Result<T> = std::result::Result<T, MediaControllerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seek_error_message_names_position() {
        let err = MediaControllerError::Seek {
            position: 12.5,
            reason: "not seekable".to_string(),
        };
        assert_eq!(err.to_string(), "Seek to 12.5s failed: not seekable");
    }
}
