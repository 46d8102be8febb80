use serde::{Deserialize, Serialize};
use std::fmt;

/// Represents the sensor a reading comes from.
///
/// # Variants
///
/// - `Accelerometer`: 3-axis accelerometer [m/s^2].
/// - `Gyroscope`: 3-axis gyroscope [rad/s].
/// - `Magnetometer`: 3-axis magnetic field sensor [uT].
/// - `Unknown`: any other platform sensor.
///
/// # Examples
///
/// ```
/// use common::types::sensors::SensorType;
///
/// assert_eq!(SensorType::from("gyroscope"), SensorType::Gyroscope);
/// assert_eq!(SensorType::from("MAG"), SensorType::Magnetometer);
/// assert_eq!(SensorType::from("barometer"), SensorType::Unknown);
/// assert_eq!(SensorType::Accelerometer.to_string(), "Accelerometer");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SensorType {
    Accelerometer,
    Gyroscope,
    Magnetometer,
    Unknown,
}

impl SensorType {
    /// Sensors captured together by a collecting session.
    pub const CAPTURED: [SensorType; 3] = [
        SensorType::Accelerometer,
        SensorType::Gyroscope,
        SensorType::Magnetometer,
    ];

    /// Display name shown next to the readings.
    pub fn name(&self) -> &'static str {
        match self {
            SensorType::Accelerometer => "Accelerometer",
            SensorType::Gyroscope => "Gyroscope",
            SensorType::Magnetometer => "Magnetometer",
            SensorType::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for SensorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<&SensorType> for usize {
    fn from(value: &SensorType) -> Self {
        match value {
            SensorType::Accelerometer => 0,
            SensorType::Gyroscope => 1,
            SensorType::Magnetometer => 2,
            SensorType::Unknown => 3,
        }
    }
}

impl From<SensorType> for usize {
    fn from(value: SensorType) -> Self {
        usize::from(&value)
    }
}

impl From<&str> for SensorType {
    fn from(value: &str) -> Self {
        let lower_case_value = value.to_lowercase();
        if lower_case_value.contains("acc") {
            Self::Accelerometer
        } else if lower_case_value.contains("gyr") {
            Self::Gyroscope
        } else if lower_case_value.contains("mag") {
            Self::Magnetometer
        } else {
            Self::Unknown
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_usize() {
        assert_eq!(usize::from(SensorType::Accelerometer), 0);
        assert_eq!(usize::from(SensorType::Gyroscope), 1);
        assert_eq!(usize::from(SensorType::Magnetometer), 2);
        assert_eq!(usize::from(SensorType::Unknown), 3);
    }

    #[test]
    fn test_from_str_case_insensitive() {
        assert_eq!(SensorType::from("ACCEleroMeter"), SensorType::Accelerometer);
        assert_eq!(SensorType::from("gyrosCOPE"), SensorType::Gyroscope);
        assert_eq!(SensorType::from("magneTometer"), SensorType::Magnetometer);
        assert_eq!(SensorType::from("Magnetic field"), SensorType::Magnetometer);
        assert_eq!(SensorType::from("light"), SensorType::Unknown);
    }

    #[test]
    fn test_display_round_trip() {
        for sensor_type in SensorType::CAPTURED {
            assert_eq!(SensorType::from(sensor_type.to_string().as_str()), sensor_type);
        }
    }
}
