//! Append-only text store for sensor values.
//!
//! Every operation on a file runs under one async lock per path, shared by all
//! `DataStore` instances in the process.

use dashmap::DashMap;
use log::{debug, error};
use once_cell::sync::Lazy;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use crate::models::config::StorageConfig;
use crate::models::errors::TrackerError;

static FILE_LOCKS: Lazy<DashMap<PathBuf, Arc<Mutex<()>>>> = Lazy::new(DashMap::new);

fn lock_for(path: &Path) -> Arc<Mutex<()>> {
    FILE_LOCKS
        .entry(path.to_path_buf())
        .or_insert_with(|| Arc::new(Mutex::new(())))
        .clone()
}

#[derive(Clone, Debug)]
pub struct DataStore {
    path: PathBuf,
    lock: Arc<Mutex<()>>,
}

impl DataStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let lock = lock_for(&path);
        Self { path, lock }
    }

    pub fn from_config(config: &StorageConfig) -> Self {
        Self::new(config.file_path())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends `"\n{sensor_type}: {data}"` to the store.
    pub async fn save_data(&self, sensor_type: &str, data: &str) -> Result<(), TrackerError> {
        let _guard = self.lock.lock().await;
        let entry = format!("\n{}: {}", sensor_type, data);
        let result = async {
            let mut file = tokio::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(&self.path)
                .await?;
            file.write_all(entry.as_bytes()).await?;
            file.flush().await
        }
        .await;

        match result {
            Ok(()) => {
                debug!("Data saved: {} = {}", sensor_type, data);
                Ok(())
            }
            Err(e) => {
                error!("Failed to save data: {}", e);
                Err(TrackerError::io("save data", e))
            }
        }
    }

    /// Whole store contents. Empty when nothing was saved yet.
    pub async fn read_data(&self) -> Result<String, TrackerError> {
        let _guard = self.lock.lock().await;
        match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => Ok(contents),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(String::new()),
            Err(e) => {
                error!("Failed to read data: {}", e);
                Err(TrackerError::io("read data", e))
            }
        }
    }

    /// Deletes the store. Clearing an empty store succeeds.
    pub async fn clear_data(&self) -> Result<(), TrackerError> {
        let _guard = self.lock.lock().await;
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => {
                debug!("Data cleared");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => {
                error!("Failed to clear data: {}", e);
                Err(TrackerError::io("clear data", e))
            }
        }
    }
}
