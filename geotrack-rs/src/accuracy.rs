//! Accuracy of a recorded track against a walked reference route.
//!
//! The reference waypoints are resampled to one point per recorded fix, and each
//! fix is compared with the reference point of the same index.

use common::types::{PositionFix, Track};

use crate::models::errors::TrackerError;

/// Ground-truth polyline a track was recorded along.
#[derive(Clone, Debug, PartialEq)]
pub struct ReferenceRoute {
    waypoints: Vec<PositionFix>,
}

impl ReferenceRoute {
    pub fn new(waypoints: Vec<PositionFix>) -> Result<Self, TrackerError> {
        if waypoints.len() < 2 {
            return Err(TrackerError::InvalidRoute(format!(
                "expected at least 2 waypoints, got {}",
                waypoints.len()
            )));
        }
        Ok(Self { waypoints })
    }

    pub fn waypoints(&self) -> &[PositionFix] {
        &self.waypoints
    }

    /// `n` points evenly spaced over the waypoint index, first and last waypoint included.
    pub fn resample(&self, n: usize) -> Vec<PositionFix> {
        let last = (self.waypoints.len() - 1) as f64;
        (0..n)
            .map(|i| {
                let position = if n > 1 {
                    last * i as f64 / (n - 1) as f64
                } else {
                    0.0
                };
                let lower = (position.floor() as usize).min(self.waypoints.len() - 1);
                let upper = (lower + 1).min(self.waypoints.len() - 1);
                self.waypoints[lower].lerp(&self.waypoints[upper], position - lower as f64)
            })
            .collect()
    }
}

/// Distance in meters between every fix and its reference point.
pub fn position_errors(track: &Track, route: &ReferenceRoute) -> Vec<f64> {
    let reference = route.resample(track.len());
    track
        .iter()
        .zip(reference.iter())
        .map(|(fix, expected)| fix.distance_to(expected))
        .collect()
}

/// Percentile of sorted values with linear interpolation between closest ranks.
fn percentile(sorted: &[f64], p: f64) -> f64 {
    let rank = p / 100.0 * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    sorted[lower] + (sorted[upper] - sorted[lower]) * (rank - lower as f64)
}

/// Summary statistics of position errors, in meters.
#[derive(Clone, Debug, PartialEq)]
pub struct ErrorSummary {
    pub mean: f64,
    pub median: f64,
    /// 25th and 75th percentile.
    pub ci_50: (f64, f64),
    /// 2.5th and 97.5th percentile.
    pub ci_95: (f64, f64),
}

impl ErrorSummary {
    pub fn from_errors(errors: &[f64]) -> Option<Self> {
        if errors.is_empty() {
            return None;
        }
        let mut sorted = errors.to_vec();
        sorted.sort_by(f64::total_cmp);

        Some(Self {
            mean: sorted.iter().sum::<f64>() / sorted.len() as f64,
            median: percentile(&sorted, 50.0),
            ci_50: (percentile(&sorted, 25.0), percentile(&sorted, 75.0)),
            ci_95: (percentile(&sorted, 2.5), percentile(&sorted, 97.5)),
        })
    }

    /// Empirical CDF: sorted errors paired with `k / n`.
    pub fn cdf(errors: &[f64]) -> Vec<(f64, f64)> {
        let mut sorted = errors.to_vec();
        sorted.sort_by(f64::total_cmp);
        let n = sorted.len() as f64;
        sorted
            .into_iter()
            .enumerate()
            .map(|(k, error)| (error, (k + 1) as f64 / n))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn route() -> ReferenceRoute {
        ReferenceRoute::new(vec![
            PositionFix::new(0.0, 0.0),
            PositionFix::new(0.0, 1.0),
            PositionFix::new(1.0, 1.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_route_needs_two_waypoints() {
        let result = ReferenceRoute::new(vec![PositionFix::new(0.0, 0.0)]);
        assert!(matches!(result, Err(TrackerError::InvalidRoute(_))));
    }

    #[test]
    fn test_resample_keeps_endpoints() {
        let points = route().resample(5);
        assert_eq!(points.len(), 5);
        assert_eq!(points[0], PositionFix::new(0.0, 0.0));
        assert_eq!(points[1], PositionFix::new(0.0, 0.5));
        assert_eq!(points[2], PositionFix::new(0.0, 1.0));
        assert_eq!(points[3], PositionFix::new(0.5, 1.0));
        assert_eq!(points[4], PositionFix::new(1.0, 1.0));
    }

    #[test]
    fn test_resample_edge_sizes() {
        assert!(route().resample(0).is_empty());
        assert_eq!(route().resample(1), vec![PositionFix::new(0.0, 0.0)]);
    }

    #[test]
    fn test_errors_of_exact_track_are_zero() {
        let route = route();
        let track: Track = route.resample(7).into_iter().collect();
        let errors = position_errors(&track, &route);
        assert_eq!(errors.len(), 7);
        assert!(errors.iter().all(|e| *e < 1e-6));
    }

    #[test]
    fn test_summary() {
        let errors = [4.0, 1.0, 3.0, 2.0, 5.0];
        let summary = ErrorSummary::from_errors(&errors).unwrap();
        assert_eq!(summary.mean, 3.0);
        assert_eq!(summary.median, 3.0);
        assert_eq!(summary.ci_50, (2.0, 4.0));
        assert!((summary.ci_95.0 - 1.1).abs() < 1e-12);
        assert!((summary.ci_95.1 - 4.9).abs() < 1e-12);
    }

    #[test]
    fn test_summary_of_nothing() {
        assert!(ErrorSummary::from_errors(&[]).is_none());
    }

    #[test]
    fn test_cdf() {
        let cdf = ErrorSummary::cdf(&[3.0, 1.0, 2.0, 4.0]);
        assert_eq!(cdf, vec![(1.0, 0.25), (2.0, 0.5), (3.0, 0.75), (4.0, 1.0)]);
    }
}
