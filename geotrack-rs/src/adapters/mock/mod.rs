//! Emulated platform collaborators, driven by recorded data.

mod gaussian;
pub mod location;
pub mod permissions;
pub mod sensors;

pub use location::MockLocationSource;
pub use permissions::StaticPermissions;
pub use sensors::MockSensorSource;
