use crate::types::sensors::SensorType;

/// Raw multi-axis reading delivered by a sensor source. Display-only.
#[derive(Clone, Debug, PartialEq)]
pub struct SensorReading {
    sensor_type: SensorType,
    values: Vec<f64>,
}

impl SensorReading {
    pub fn new(sensor_type: SensorType, values: Vec<f64>) -> Self {
        Self {
            sensor_type,
            values,
        }
    }

    pub fn sensor_type(&self) -> SensorType {
        self.sensor_type
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Values joined with `", "`. Whole numbers keep a trailing `.0`.
    pub fn formatted(&self) -> String {
        self.values
            .iter()
            .map(|value| format!("{:?}", value))
            .collect::<Vec<String>>()
            .join(", ")
    }
}
