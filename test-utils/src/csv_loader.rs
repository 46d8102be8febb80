use std::error::Error;

use csv::Reader;
use num_enum::TryFromPrimitive;

use common::types::{PositionFix, SensorReading, SensorType};

/// Columns of the recorded sensor file (`test_data/sensor_readings.csv`).
#[repr(usize)]
#[derive(Debug, Clone, Copy, TryFromPrimitive)]
pub enum CsvFileColum {
    Timestamp,
    XGyro,
    YGyro,
    ZGyro,
    XAccel,
    YAccel,
    ZAccel,
    XMag,
    YMag,
    ZMag,
}

impl From<CsvFileColum> for usize {
    fn from(value: CsvFileColum) -> Self {
        value as usize
    }
}

/// Columns of a recorded route file (`test_data/route.csv`).
#[repr(usize)]
#[derive(Debug, Clone, Copy, TryFromPrimitive)]
pub enum RouteColumn {
    Latitude,
    Longitude,
}

impl From<RouteColumn> for usize {
    fn from(value: RouteColumn) -> Self {
        value as usize
    }
}

#[derive(Clone, Debug, Default)]
pub struct CsvColumnMapper {
    columns: Vec<usize>,
}

impl CsvColumnMapper {
    pub fn new() -> Self {
        Self { columns: vec![] }
    }

    pub fn columns(&self) -> Vec<usize> {
        self.columns.clone()
    }

    pub fn add_gyro(&mut self) -> &mut Self {
        self.columns.push(CsvFileColum::XGyro.into());
        self.columns.push(CsvFileColum::YGyro.into());
        self.columns.push(CsvFileColum::ZGyro.into());
        self
    }
    pub fn add_accel(&mut self) -> &mut Self {
        self.columns.push(CsvFileColum::XAccel.into());
        self.columns.push(CsvFileColum::YAccel.into());
        self.columns.push(CsvFileColum::ZAccel.into());
        self
    }
    pub fn add_mag(&mut self) -> &mut Self {
        self.columns.push(CsvFileColum::XMag.into());
        self.columns.push(CsvFileColum::YMag.into());
        self.columns.push(CsvFileColum::ZMag.into());
        self
    }

    /// Adds the three axes of `sensor_type`. `Unknown` adds nothing.
    pub fn add_sensor(&mut self, sensor_type: SensorType) -> &mut Self {
        match sensor_type {
            SensorType::Accelerometer => self.add_accel(),
            SensorType::Gyroscope => self.add_gyro(),
            SensorType::Magnetometer => self.add_mag(),
            SensorType::Unknown => self,
        }
    }

    pub fn add_position(&mut self) -> &mut Self {
        self.columns.push(RouteColumn::Latitude.into());
        self.columns.push(RouteColumn::Longitude.into());
        self
    }
}

pub fn load_csv(file_path: &str) -> Result<Vec<Vec<f64>>, Box<dyn Error>> {
    let mut rdr = Reader::from_path(file_path)?;
    let mut data = Vec::new();

    for result in rdr.records() {
        let record = result?;
        let row: Vec<f64> = record
            .iter()
            .filter_map(|s| s.trim().parse::<f64>().ok())
            .collect();
        data.push(row);
    }

    Ok(data)
}

pub fn load_csv_columns<T: TryFrom<Vec<f64>>>(
    file_path: &str,
    columns: &[usize],
) -> Result<Vec<T>, Box<dyn Error>> {
    if columns.is_empty() {
        return Err("No columns provided".into());
    }

    let data = load_csv(file_path)?;

    let result = data
        .into_iter()
        .map(|rows| {
            columns
                .iter()
                .map(|&i| {
                    rows.get(i)
                        .ok_or_else(|| format!("Column index {} out of bounds", i).into())
                        .copied()
                })
                .collect::<Result<Vec<f64>, Box<dyn Error>>>()
        })
        .collect::<Result<Vec<Vec<f64>>, Box<dyn Error>>>()?
        .into_iter()
        .map(|f64_values| {
            T::try_from(f64_values).map_err(|_| "Failed to convert to T".to_string().into())
        })
        .collect::<Result<Vec<T>, Box<dyn Error>>>()?;

    Ok(result)
}

/// Loads a `latitude,longitude` route file.
pub fn load_route(file_path: &str) -> Result<Vec<PositionFix>, Box<dyn Error>> {
    let mut mapper = CsvColumnMapper::new();
    mapper.add_position();
    load_csv_columns::<PositionFix>(file_path, &mapper.columns())
}

/// Loads the readings of one sensor from the recorded sensor file.
pub fn load_sensor_readings(
    file_path: &str,
    sensor_type: SensorType,
) -> Result<Vec<SensorReading>, Box<dyn Error>> {
    let mut mapper = CsvColumnMapper::new();
    mapper.add_sensor(sensor_type);
    let values = load_csv_columns::<Vec<f64>>(file_path, &mapper.columns())?;
    Ok(values
        .into_iter()
        .map(|values| SensorReading::new(sensor_type, values))
        .collect())
}
