use rand::rngs::StdRng;
use rand_distr::{Distribution, Normal};

use common::types::PositionFix;

/// Functionality to add some Gaussian noise.
#[derive(Clone)]
pub(super) struct GaussianNoise {
    normal: Normal<f64>,
}

impl GaussianNoise {
    /// Creates new distribution from mean and stdev
    pub(super) fn new(mean: f64, stdev: f64) -> Result<Self, String> {
        let normal = Normal::new(mean, stdev).map_err(|e| e.to_string())?;
        Ok(Self { normal })
    }

    /// Sample from distribution
    pub(super) fn draw_sample(&self, rng: &mut StdRng) -> f64 {
        self.normal.sample(rng)
    }

    /// Moves a fix by independent noise on latitude and longitude (degrees).
    pub(super) fn jitter(&self, rng: &mut StdRng, fix: PositionFix) -> PositionFix {
        PositionFix::new(
            fix.latitude() + self.draw_sample(rng),
            fix.longitude() + self.draw_sample(rng),
        )
    }

    // Adds noise to vector of samples
    pub(super) fn add_noise_vec(&self, rng: &mut StdRng, data: &[f64]) -> Vec<f64> {
        data.iter().map(|d| d + self.draw_sample(rng)).collect()
    }
}
