use std::fmt;

use crate::types::{Permission, PositionFix, SensorType};

/// Transient user-visible message.
#[derive(Clone, Debug, PartialEq)]
pub enum Notice {
    /// A track was written to `destination`.
    Saved { destination: String, fixes: usize },
    /// Writing a track failed. The track is kept and can be saved again.
    SaveFailed(String),
    /// An operation was refused because a permission is missing.
    PermissionDenied(Permission),
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::Saved { .. } => f.write_str("Data saved successfully"),
            Notice::SaveFailed(reason) => write!(f, "Failed to save data: {}", reason),
            Notice::PermissionDenied(permission) => {
                write!(f, "Permission not granted: {}", permission)
            }
        }
    }
}

/// Event published by the session logger to the presentation layer.
#[derive(Clone, Debug, PartialEq)]
pub enum PresentationEvent {
    SensorData { sensor_type: SensorType, data: String },
    LocationUpdated(PositionFix),
    Notice(Notice),
}
