use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use common::constants::{
    EXPORT_MIME_TYPE, EXPORT_SUGGESTED_NAME, LOCATION_FASTEST_INTERVAL_MILLIS,
    LOCATION_INTERVAL_MILLIS,
};
use common::types::{DeliveryRate, DestinationRequest, LocationRequest, Priority, SensorType};

use crate::constants::STORAGE_FILE_NAME;
use crate::models::errors::TrackerError;

/// Session logger configuration. Missing tables and keys take their default value.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    pub location: LocationConfig,
    pub sensors: SensorConfig,
    pub export: ExportConfig,
    pub storage: StorageConfig,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocationConfig {
    pub interval_millis: u64,
    pub fastest_interval_millis: u64,
    pub priority: Priority,
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            interval_millis: LOCATION_INTERVAL_MILLIS,
            fastest_interval_millis: LOCATION_FASTEST_INTERVAL_MILLIS,
            priority: Priority::HighAccuracy,
        }
    }
}

/// Delivery rate requested for every captured sensor.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SensorConfig {
    pub accelerometer: DeliveryRate,
    pub gyroscope: DeliveryRate,
    pub magnetometer: DeliveryRate,
}

impl SensorConfig {
    pub fn rate_for(&self, sensor_type: SensorType) -> DeliveryRate {
        match sensor_type {
            SensorType::Accelerometer => self.accelerometer,
            SensorType::Gyroscope => self.gyroscope,
            SensorType::Magnetometer => self.magnetometer,
            SensorType::Unknown => DeliveryRate::default(),
        }
    }

    pub fn set_rate(&mut self, sensor_type: SensorType, rate: DeliveryRate) {
        match sensor_type {
            SensorType::Accelerometer => self.accelerometer = rate,
            SensorType::Gyroscope => self.gyroscope = rate,
            SensorType::Magnetometer => self.magnetometer = rate,
            SensorType::Unknown => {}
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub suggested_name: String,
    pub mime_type: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            suggested_name: EXPORT_SUGGESTED_NAME.to_string(),
            mime_type: EXPORT_MIME_TYPE.to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
    pub file_name: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            file_name: STORAGE_FILE_NAME.to_string(),
        }
    }
}

impl StorageConfig {
    pub fn file_path(&self) -> PathBuf {
        self.data_dir.join(&self.file_name)
    }
}

impl TrackerConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self, TrackerError> {
        toml::from_str(contents).map_err(|e| TrackerError::Config(e.to_string()))
    }

    /// Reads a TOML configuration file.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, TrackerError> {
        let contents = tokio::fs::read_to_string(path.as_ref())
            .await
            .map_err(|e| TrackerError::io("read configuration", e))?;
        Self::from_toml_str(&contents)
    }

    pub fn to_toml_string(&self) -> Result<String, TrackerError> {
        toml::to_string(self).map_err(|e| TrackerError::Config(e.to_string()))
    }

    pub fn location_request(&self) -> LocationRequest {
        LocationRequest {
            interval: Duration::from_millis(self.location.interval_millis),
            fastest_interval: Duration::from_millis(self.location.fastest_interval_millis),
            priority: self.location.priority,
        }
    }

    pub fn destination_request(&self) -> DestinationRequest {
        DestinationRequest::new(&self.export.suggested_name, &self.export.mime_type)
    }
}
