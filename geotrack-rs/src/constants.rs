/// File the sensor text store appends to.
pub(crate) const STORAGE_FILE_NAME: &str = "sensor_data.txt";

/// Replay defaults of the mock sources.
pub(crate) const MOCK_NOISE_STDEV_DEGREES: f64 = 0.00002;
pub(crate) const MOCK_SENSOR_PERIOD_MILLIS: u64 = 100;
