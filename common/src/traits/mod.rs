pub mod persistence;
pub mod presenter;
pub mod publisher;
pub mod source;

pub use crate::traits::persistence::{Destination, DestinationPicker};
pub use crate::traits::presenter::Presenter;
pub use crate::traits::publisher::Notifiable;
pub use crate::traits::source::{LocationSource, PermissionGate, SensorSource};
