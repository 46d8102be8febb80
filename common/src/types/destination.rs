use crate::constants::{EXPORT_MIME_TYPE, EXPORT_SUGGESTED_NAME};

/// What the user is asked to create when a track is exported.
#[derive(Clone, Debug, PartialEq)]
pub struct DestinationRequest {
    pub suggested_name: String,
    pub mime_type: String,
}

impl DestinationRequest {
    pub fn new(suggested_name: &str, mime_type: &str) -> Self {
        Self {
            suggested_name: suggested_name.to_string(),
            mime_type: mime_type.to_string(),
        }
    }
}

impl Default for DestinationRequest {
    fn default() -> Self {
        Self::new(EXPORT_SUGGESTED_NAME, EXPORT_MIME_TYPE)
    }
}
