// Emulates platform motion sensors by replaying recorded readings

use async_trait::async_trait;
use dashmap::DashMap;
use log::{debug, info, warn};
use rand::{rngs::StdRng, SeedableRng};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, Notify};
use uuid::Uuid;

use super::gaussian::GaussianNoise;
use crate::models::errors::TrackerError;
use common::traits::{Notifiable, SensorSource};
use common::types::{DeliveryRate, SensorReading, SensorType};
use publisher::PublisherManager;
use test_utils::csv_loader;

const GAUSSIAN_SENSOR_MEAN: f64 = 0f64;
const GAUSSIAN_SENSOR_STDEV: f64 = 0.05;

struct Recording {
    readings: Vec<SensorReading>,
    cursor: usize,
}

impl Recording {
    fn next_reading(&mut self) -> Option<SensorReading> {
        if self.readings.is_empty() {
            return None;
        }
        let reading = self.readings[self.cursor % self.readings.len()].clone();
        self.cursor += 1;
        Some(reading)
    }
}

/// Configures mock sensor reading delivery
pub struct MockSensorSource {
    available_sensors: Vec<SensorType>,
    recordings: Mutex<HashMap<SensorType, Recording>>,
    publishers: PublisherManager<SensorReading, SensorType>,
    rates: DashMap<Uuid, (SensorType, DeliveryRate)>,
    sensor_noise: Option<GaussianNoise>,
}

impl MockSensorSource {
    /// Creates a source providing `available_sensors`, replaying `recordings` in a loop.
    pub fn new(
        available_sensors: Vec<SensorType>,
        recordings: Vec<SensorReading>,
        add_sensor_noise: bool,
    ) -> Result<Self, TrackerError> {
        let mut grouped: HashMap<SensorType, Recording> = HashMap::new();
        for reading in recordings {
            grouped
                .entry(reading.sensor_type())
                .or_insert_with(|| Recording {
                    readings: Vec::new(),
                    cursor: 0,
                })
                .readings
                .push(reading);
        }
        let sensor_noise = if add_sensor_noise {
            Some(
                GaussianNoise::new(GAUSSIAN_SENSOR_MEAN, GAUSSIAN_SENSOR_STDEV)
                    .map_err(TrackerError::Source)?,
            )
        } else {
            None
        };

        Ok(Self {
            publishers: PublisherManager::new(&available_sensors),
            available_sensors,
            recordings: Mutex::new(grouped),
            rates: DashMap::new(),
            sensor_noise,
        })
    }

    /// Creates a source replaying the recorded sensor CSV for every sensor in `available_sensors`.
    pub fn from_csv(
        file_path: &str,
        available_sensors: Vec<SensorType>,
        add_sensor_noise: bool,
    ) -> Result<Self, TrackerError> {
        let mut recordings = Vec::new();
        for sensor_type in &available_sensors {
            let readings = csv_loader::load_sensor_readings(file_path, *sensor_type).map_err(|e| {
                TrackerError::Source(format!("Cannot load readings {}: {}", file_path, e))
            })?;
            recordings.extend(readings);
        }
        Self::new(available_sensors, recordings, add_sensor_noise)
    }

    /// Delivery rate the listeners of `sensor_type` registered with.
    pub fn registered_rates(&self, sensor_type: SensorType) -> Vec<DeliveryRate> {
        self.rates
            .iter()
            .filter(|entry| entry.value().0 == sensor_type)
            .map(|entry| entry.value().1)
            .collect()
    }

    pub fn listener_count(&self, sensor_type: SensorType) -> usize {
        self.publishers.count_listeners(&sensor_type)
    }

    /// Delivers one reading to the listeners of its sensor right away.
    pub async fn push_reading(&self, reading: SensorReading) {
        self.publishers
            .notify_listeners(reading.sensor_type(), Arc::new(reading))
            .await;
    }

    async fn next_reading(&self, sensor_type: SensorType) -> Option<SensorReading> {
        let mut recordings = self.recordings.lock().await;
        let reading = recordings.get_mut(&sensor_type)?.next_reading()?;
        Some(match &self.sensor_noise {
            Some(noise) => SensorReading::new(
                sensor_type,
                noise.add_noise_vec(&mut StdRng::from_entropy(), reading.values()),
            ),
            None => reading,
        })
    }

    /// Emits one reading per listened sensor every `period` until `abort_signal` fires.
    pub async fn start(
        &self,
        period: Duration,
        abort_signal: Arc<Notify>,
    ) -> Result<(), TrackerError> {
        info!("Replaying sensors {:?} every {:?}", self.available_sensors, period);
        let mut interval = tokio::time::interval(period);
        // Registered once so a signal fired while a tick is handled is not lost.
        let aborted = abort_signal.notified();
        tokio::pin!(aborted);
        aborted.as_mut().enable();
        loop {
            tokio::select! {
                _ = &mut aborted => {
                    info!("Sensor replay stopped");
                    break;
                }
                _ = interval.tick() => {
                    for sensor_type in &self.available_sensors {
                        if self.listener_count(*sensor_type) == 0 {
                            continue;
                        }
                        if let Some(reading) = self.next_reading(*sensor_type).await {
                            self.push_reading(reading).await;
                        }
                    }
                }
            }
        }
        Ok(())
    }
}

#[async_trait]
impl SensorSource for MockSensorSource {
    async fn get_available_sensors(&self) -> Vec<SensorType> {
        self.available_sensors.clone()
    }

    async fn register_listener(
        &self,
        listener: &mut dyn Notifiable<SensorReading>,
        sensor_type: SensorType,
        rate: DeliveryRate,
    ) -> Result<Uuid, String> {
        if !self.available_sensors.contains(&sensor_type) {
            return Err(format!("Sensor {} not available", sensor_type));
        }
        let id = self.publishers.add_listener(listener, &sensor_type).await?;
        debug!(
            "{} listener {} registered at {} rate ({:?} period)",
            sensor_type,
            id,
            rate.label(),
            rate.sampling_period()
        );
        self.rates.insert(id, (sensor_type, rate));
        Ok(id)
    }

    async fn unregister_listener(&self, id: Uuid) {
        if let Err(e) = self.publishers.remove_listener(id).await {
            warn!("Cannot unregister sensor listener {}: {}", id, e);
        }
        self.rates.remove(&id);
    }
}
