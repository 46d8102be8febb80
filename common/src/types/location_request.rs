use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::constants::{LOCATION_FASTEST_INTERVAL_MILLIS, LOCATION_INTERVAL_MILLIS};

/// Accuracy/power trade-off asked from the location provider.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    #[default]
    HighAccuracy,
    BalancedPowerAccuracy,
    LowPower,
    Passive,
}

/// Parameters of a position-fix subscription.
#[derive(Clone, Debug, PartialEq)]
pub struct LocationRequest {
    pub interval: Duration,
    pub fastest_interval: Duration,
    pub priority: Priority,
}

impl Default for LocationRequest {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(LOCATION_INTERVAL_MILLIS),
            fastest_interval: Duration::from_millis(LOCATION_FASTEST_INTERVAL_MILLIS),
            priority: Priority::HighAccuracy,
        }
    }
}
