pub mod callback;
pub mod destination;
pub mod events;
pub mod location_request;
pub mod permission;
pub mod position;
pub mod sensors;
pub mod track;

pub use callback::Callback;
pub use destination::DestinationRequest;
pub use events::{Notice, PresentationEvent};
pub use location_request::{LocationRequest, Priority};
pub use permission::Permission;
pub use position::PositionFix;
pub use sensors::{DeliveryRate, SensorReading, SensorType};
pub use track::Track;
