pub mod delivery_rate;
pub mod sensor_reading;
pub mod sensor_type;

pub use crate::types::sensors::delivery_rate::DeliveryRate;
pub use crate::types::sensors::sensor_reading::SensorReading;
pub use crate::types::sensors::sensor_type::SensorType;
