//! Presentation glue.
//!
//! Sources call back from their own tasks. [`ChannelPresenter`] queues every
//! event as a [`UiUpdate`] so the task owning the UI state applies it.

use log::warn;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

use common::traits::Presenter;
use common::types::Notice;

/// Display change for the UI thread.
#[derive(Clone, Debug, PartialEq)]
pub enum UiUpdate {
    /// Label text of a sensor view, `"<Sensor>: <data>"`.
    SensorText { sensor_type: String, text: String },
    /// New position of the live map marker.
    Marker { latitude: f64, longitude: f64 },
    /// Short-lived message.
    Toast(String),
}

#[derive(Clone, Debug)]
pub struct ChannelPresenter {
    sender: UnboundedSender<UiUpdate>,
}

impl ChannelPresenter {
    /// Creates a presenter and the receiving end the UI task drains.
    pub fn new() -> (Self, UnboundedReceiver<UiUpdate>) {
        let (sender, receiver) = unbounded_channel();
        (Self { sender }, receiver)
    }

    fn send(&self, update: UiUpdate) {
        if self.sender.send(update).is_err() {
            warn!("UI queue closed, update dropped");
        }
    }
}

impl Presenter for ChannelPresenter {
    fn on_sensor_data_collected(&self, sensor_type: &str, data: &str) {
        self.send(UiUpdate::SensorText {
            sensor_type: sensor_type.to_string(),
            text: format!("{}: {}", sensor_type, data),
        });
    }

    fn on_location_updated(&self, latitude: f64, longitude: f64) {
        self.send(UiUpdate::Marker {
            latitude,
            longitude,
        });
    }

    fn on_notice(&self, notice: &Notice) {
        self.send(UiUpdate::Toast(notice.to_string()));
    }
}
