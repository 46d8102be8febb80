use async_trait::async_trait;
use std::io;

use crate::types::DestinationRequest;

/// Writable byte destination chosen by the user.
#[async_trait]
pub trait Destination: Send {
    /// Location of the destination, for logs and notices.
    fn uri(&self) -> &str;
    /// Writes `bytes` and flushes.
    async fn write_all(&mut self, bytes: &[u8]) -> io::Result<()>;
}

/// Interactive "choose destination" step.
#[async_trait]
pub trait DestinationPicker: Send + Sync {
    /// Resolves once the user has picked a destination. `Ok(None)` when the user cancelled.
    async fn pick_destination(
        &self,
        request: &DestinationRequest,
    ) -> io::Result<Option<Box<dyn Destination>>>;
}
