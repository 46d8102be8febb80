use async_trait::async_trait;
use std::io;
use std::sync::{Arc, Mutex};

use common::traits::{Destination, DestinationPicker};
use common::types::DestinationRequest;

/// Picker that "creates" in-memory documents and keeps everything written to them.
#[derive(Clone, Default)]
pub struct MemoryPicker {
    requests: Arc<Mutex<Vec<DestinationRequest>>>,
    documents: Arc<Mutex<Vec<Vec<u8>>>>,
}

impl MemoryPicker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests received so far.
    pub fn requests(&self) -> Vec<DestinationRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Contents of every document created so far, in creation order.
    pub fn documents(&self) -> Vec<Vec<u8>> {
        self.documents.lock().unwrap().clone()
    }

    /// Contents of every document as text.
    pub fn documents_as_text(&self) -> Vec<String> {
        self.documents()
            .into_iter()
            .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
            .collect()
    }
}

struct MemoryDestination {
    uri: String,
    index: usize,
    documents: Arc<Mutex<Vec<Vec<u8>>>>,
}

#[async_trait]
impl Destination for MemoryDestination {
    fn uri(&self) -> &str {
        &self.uri
    }

    async fn write_all(&mut self, bytes: &[u8]) -> io::Result<()> {
        let mut documents = self.documents.lock().unwrap();
        documents[self.index].extend_from_slice(bytes);
        Ok(())
    }
}

#[async_trait]
impl DestinationPicker for MemoryPicker {
    async fn pick_destination(
        &self,
        request: &DestinationRequest,
    ) -> io::Result<Option<Box<dyn Destination>>> {
        self.requests.lock().unwrap().push(request.clone());
        let mut documents = self.documents.lock().unwrap();
        documents.push(Vec::new());
        let index = documents.len() - 1;
        Ok(Some(Box::new(MemoryDestination {
            uri: format!("memory://{}/{}", index, request.suggested_name),
            index,
            documents: self.documents.clone(),
        })))
    }
}

/// Picker whose user always dismisses the dialog.
#[derive(Clone, Default)]
pub struct CancellingPicker;

#[async_trait]
impl DestinationPicker for CancellingPicker {
    async fn pick_destination(
        &self,
        _request: &DestinationRequest,
    ) -> io::Result<Option<Box<dyn Destination>>> {
        Ok(None)
    }
}

/// Picker returning destinations whose writes fail until `heal` is called.
#[derive(Clone, Default)]
pub struct FlakyPicker {
    healed: Arc<Mutex<bool>>,
    inner: MemoryPicker,
}

impl FlakyPicker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn heal(&self) {
        *self.healed.lock().unwrap() = true;
    }

    pub fn documents_as_text(&self) -> Vec<String> {
        self.inner.documents_as_text()
    }
}

struct BrokenDestination;

#[async_trait]
impl Destination for BrokenDestination {
    fn uri(&self) -> &str {
        "broken://location_data.json"
    }

    async fn write_all(&mut self, _bytes: &[u8]) -> io::Result<()> {
        Err(io::Error::new(io::ErrorKind::Other, "disk full"))
    }
}

#[async_trait]
impl DestinationPicker for FlakyPicker {
    async fn pick_destination(
        &self,
        request: &DestinationRequest,
    ) -> io::Result<Option<Box<dyn Destination>>> {
        let healed = *self.healed.lock().unwrap();
        if healed {
            self.inner.pick_destination(request).await
        } else {
            Ok(Some(Box::new(BrokenDestination)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_picker_keeps_documents() {
        let picker = MemoryPicker::new();
        let request = DestinationRequest::default();

        let mut first = picker.pick_destination(&request).await.unwrap().unwrap();
        first.write_all(b"one").await.unwrap();
        let mut second = picker.pick_destination(&request).await.unwrap().unwrap();
        second.write_all(b"two").await.unwrap();

        assert_eq!(picker.documents_as_text(), vec!["one", "two"]);
        assert_eq!(picker.requests().len(), 2);
        assert!(first.uri().ends_with("location_data.json"));
    }

    #[tokio::test]
    async fn test_flaky_picker() {
        let picker = FlakyPicker::new();
        let request = DestinationRequest::default();

        let mut broken = picker.pick_destination(&request).await.unwrap().unwrap();
        assert!(broken.write_all(b"data").await.is_err());

        picker.heal();
        let mut healed = picker.pick_destination(&request).await.unwrap().unwrap();
        healed.write_all(b"data").await.unwrap();
        assert_eq!(picker.documents_as_text(), vec!["data"]);
    }

    #[tokio::test]
    async fn test_cancelling_picker() {
        let picker = CancellingPicker;
        let picked = picker
            .pick_destination(&DestinationRequest::default())
            .await
            .unwrap();
        assert!(picked.is_none());
    }
}
