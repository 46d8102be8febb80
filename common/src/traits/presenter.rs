use crate::types::Notice;

/// Presentation callback contract.
///
/// Every method has an empty default body: a presenter only overrides what it
/// displays, and a logger with no presenter attached drops events. Methods run
/// on the caller's task and must not block; presenters that own UI state should
/// hand the update over to the UI thread.
pub trait Presenter: Send + Sync {
    fn on_sensor_data_collected(&self, _sensor_type: &str, _data: &str) {}
    fn on_location_updated(&self, _latitude: f64, _longitude: f64) {}
    fn on_notice(&self, _notice: &Notice) {}
}
