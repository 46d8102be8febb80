//! General functionality for `geotrack` library
//!
//! Data model shared by location/sensor sources, the session logger and
//! presentation layers, plus the traits those collaborators implement.

pub mod constants;

#[doc(hidden)]
pub mod traits;
#[doc(hidden)]
pub mod types;

// Re-export traits
#[doc(inline)]
pub use traits::{
    Destination, DestinationPicker, LocationSource, Notifiable, PermissionGate, Presenter,
    SensorSource,
};

// Re-export types
#[doc(inline)]
pub use types::{
    Callback, DeliveryRate, DestinationRequest, LocationRequest, Notice, Permission,
    PositionFix, PresentationEvent, Priority, SensorReading, SensorType, Track,
};
