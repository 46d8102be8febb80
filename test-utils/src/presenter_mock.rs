use std::sync::{Arc, Mutex};

use common::traits::Presenter;
use common::types::Notice;

/// Everything a [`RecordingPresenter`] was shown, in arrival order.
#[derive(Clone, Debug, PartialEq)]
pub enum Recorded {
    SensorData(String, String),
    Location(f64, f64),
    Notice(Notice),
}

/// Presenter that records every callback.
#[derive(Clone, Default)]
pub struct RecordingPresenter {
    recorded: Arc<Mutex<Vec<Recorded>>>,
}

impl RecordingPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn recorded(&self) -> Vec<Recorded> {
        self.recorded.lock().unwrap().clone()
    }

    pub fn locations(&self) -> Vec<(f64, f64)> {
        self.recorded()
            .into_iter()
            .filter_map(|entry| match entry {
                Recorded::Location(latitude, longitude) => Some((latitude, longitude)),
                _ => None,
            })
            .collect()
    }

    pub fn sensor_data(&self) -> Vec<(String, String)> {
        self.recorded()
            .into_iter()
            .filter_map(|entry| match entry {
                Recorded::SensorData(sensor_type, data) => Some((sensor_type, data)),
                _ => None,
            })
            .collect()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.recorded()
            .into_iter()
            .filter_map(|entry| match entry {
                Recorded::Notice(notice) => Some(notice),
                _ => None,
            })
            .collect()
    }

    fn push(&self, entry: Recorded) {
        self.recorded.lock().unwrap().push(entry);
    }
}

impl Presenter for RecordingPresenter {
    fn on_sensor_data_collected(&self, sensor_type: &str, data: &str) {
        self.push(Recorded::SensorData(sensor_type.to_string(), data.to_string()));
    }

    fn on_location_updated(&self, latitude: f64, longitude: f64) {
        self.push(Recorded::Location(latitude, longitude));
    }

    fn on_notice(&self, notice: &Notice) {
        self.push(Recorded::Notice(notice.clone()));
    }
}

/// Presenter that only cares about location updates. Other events hit the default no-ops.
#[derive(Clone, Default)]
pub struct MarkerOnlyPresenter {
    pub last_marker: Arc<Mutex<Option<(f64, f64)>>>,
}

impl Presenter for MarkerOnlyPresenter {
    fn on_location_updated(&self, latitude: f64, longitude: f64) {
        *self.last_marker.lock().unwrap() = Some((latitude, longitude));
    }
}
