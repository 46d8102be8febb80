// Non-interactive destination picker writing exports into a fixed directory

use async_trait::async_trait;
use log::debug;
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs::File;
use tokio::io::AsyncWriteExt;

use common::traits::{Destination, DestinationPicker};
use common::types::DestinationRequest;

/// Picks `<dir>/<suggested name>` for every export, replacing earlier files.
#[derive(Clone, Debug)]
pub struct DirectoryPicker {
    dir: PathBuf,
}

impl DirectoryPicker {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

#[async_trait]
impl DestinationPicker for DirectoryPicker {
    async fn pick_destination(
        &self,
        request: &DestinationRequest,
    ) -> io::Result<Option<Box<dyn Destination>>> {
        let path = self.dir.join(&request.suggested_name);
        let file = File::create(&path).await?;
        debug!("Export destination {} ({})", path.display(), request.mime_type);
        Ok(Some(Box::new(FileDestination {
            uri: format!("file://{}", path.display()),
            file,
        })))
    }
}

struct FileDestination {
    uri: String,
    file: File,
}

#[async_trait]
impl Destination for FileDestination {
    fn uri(&self) -> &str {
        &self.uri
    }

    async fn write_all(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.file.write_all(bytes).await?;
        self.file.flush().await
    }
}
