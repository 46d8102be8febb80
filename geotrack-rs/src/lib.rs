//! # Crate geotrack-rs
//!
//! ## geotrack-rs
//!
//! The `geotrack-rs` crate records the device position during a tracking session and
//! saves the recorded track, one `{"latitude": .., "longitude": ..}` object per line,
//! to a destination the user picks when the session stops.
//!
//! Features include:
//! - Tracking sessions fed by any [`LocationSource`](common::LocationSource). Every session owns a fresh track.
//! - Live display of Accelerometer, Gyroscope and Magnetometer readings through [`Presenter`](common::Presenter)s.
//! - Per-sensor delivery rate and location request settings loaded from TOML.
//! - An append-only text store for sensor values.
//! - Accuracy of a recorded track against a reference route.
//! - Mock sources replaying recorded CSV data, to run the logger without a device.
//!
//! **NOTE** Readings are only displayed. Only the position track is saved.

pub mod accuracy;
pub mod adapters;
pub mod codec;
pub(crate) mod constants;
pub mod models;
pub mod presenters;
pub mod services;
pub mod storage;

pub use models::config::TrackerConfig;
pub use models::errors::TrackerError;
pub use models::session::{CollectingState, SaveOutcome, TrackingState};
pub use services::SessionLogger;
