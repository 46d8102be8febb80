//! Module errors

use std::io;
use thiserror::Error;

use common::types::Permission;

/// Represents the different types of errors that can occur while logging a session.
#[derive(Debug, Error)]
pub enum TrackerError {
    /// The operation needs a permission the user has not granted.
    #[error("Permission not granted: {0}")]
    PermissionDenied(Permission),

    /// Reading, writing or deleting persisted data failed.
    #[error("I/O failure while trying to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: io::Error,
    },

    /// A sensor or location source refused a listener registration.
    #[error("Source error: {0}")]
    Source(String),

    /// A track could not be encoded.
    #[error("Encoding error: {0}")]
    Encode(String),

    /// Persisted data is not a valid track.
    #[error("Decoding error: {0}")]
    Decode(String),

    /// Configuration could not be parsed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A reference route needs at least two waypoints.
    #[error("Invalid reference route: {0}")]
    InvalidRoute(String),
}

impl TrackerError {
    pub(crate) fn io(operation: &str, source: io::Error) -> Self {
        TrackerError::Io {
            operation: operation.to_string(),
            source,
        }
    }
}
