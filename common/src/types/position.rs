use serde::{Deserialize, Serialize};

use crate::constants::EARTH_RADIUS_METERS;

/// One recorded (latitude, longitude) sample, in decimal degrees.
///
/// Field order is part of the exported format: `latitude` is always written first.
///
/// # Examples
///
/// ```
/// use common::types::PositionFix;
///
/// let fix = PositionFix::new(52.52, 13.405);
/// assert_eq!(fix.latitude(), 52.52);
/// assert_eq!(PositionFix::try_from(vec![52.52, 13.405]).unwrap(), fix);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PositionFix {
    latitude: f64,
    longitude: f64,
}

impl PositionFix {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Great-circle distance to `other` in meters (haversine on a spherical Earth).
    pub fn distance_to(&self, other: &PositionFix) -> f64 {
        let lat1 = self.latitude.to_radians();
        let lat2 = other.latitude.to_radians();
        let d_lat = lat2 - lat1;
        let d_lon = (other.longitude - self.longitude).to_radians();

        let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
        2.0 * EARTH_RADIUS_METERS * a.sqrt().atan2((1.0 - a).sqrt())
    }

    /// Linear interpolation between `self` (t = 0) and `other` (t = 1).
    pub fn lerp(&self, other: &PositionFix, t: f64) -> PositionFix {
        PositionFix::new(
            self.latitude + (other.latitude - self.latitude) * t,
            self.longitude + (other.longitude - self.longitude) * t,
        )
    }
}

impl From<(f64, f64)> for PositionFix {
    fn from((latitude, longitude): (f64, f64)) -> Self {
        PositionFix::new(latitude, longitude)
    }
}

impl TryFrom<Vec<f64>> for PositionFix {
    type Error = String;

    fn try_from(value: Vec<f64>) -> Result<Self, Self::Error> {
        match value.as_slice() {
            [latitude, longitude] => Ok(PositionFix::new(*latitude, *longitude)),
            _ => Err(format!(
                "Expected 2 values (latitude, longitude), got {}",
                value.len()
            )),
        }
    }
}
