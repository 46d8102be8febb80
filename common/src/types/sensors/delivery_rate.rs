use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Delivery-rate tier a sensor listener is registered with.
///
/// Tiers map to the nominal sampling periods platforms use for them; the
/// actual cadence is chosen by the platform.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryRate {
    Normal,
    #[default]
    Ui,
    Game,
    Fastest,
}

impl DeliveryRate {
    /// Nominal sampling period of the tier.
    pub fn sampling_period(&self) -> Duration {
        match self {
            DeliveryRate::Normal => Duration::from_micros(200_000),
            DeliveryRate::Ui => Duration::from_micros(66_667),
            DeliveryRate::Game => Duration::from_micros(20_000),
            DeliveryRate::Fastest => Duration::ZERO,
        }
    }

    /// Label used by rate selection controls.
    pub fn label(&self) -> &'static str {
        match self {
            DeliveryRate::Normal => "Normal",
            DeliveryRate::Ui => "UI",
            DeliveryRate::Game => "Game",
            DeliveryRate::Fastest => "Fastest",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_periods_are_ordered() {
        let periods: Vec<Duration> = [
            DeliveryRate::Normal,
            DeliveryRate::Ui,
            DeliveryRate::Game,
            DeliveryRate::Fastest,
        ]
        .iter()
        .map(|rate| rate.sampling_period())
        .collect();
        assert!(periods.windows(2).all(|pair| pair[0] > pair[1]));
    }

    #[test]
    fn test_serde_snake_case() {
        let json = serde_json::to_string(&DeliveryRate::Ui).unwrap();
        assert_eq!(json, "\"ui\"");
        let rate: DeliveryRate = serde_json::from_str("\"fastest\"").unwrap();
        assert_eq!(rate, DeliveryRate::Fastest);
    }
}
