//! Seedable noise source for the control loops.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Random perturbations applied by the control loops.
///
/// All randomness in the physics model goes through this type so runs can be
/// made reproducible with a seed, or fully deterministic with noise disabled.
#[derive(Debug, Clone)]
pub struct Noise {
    rng: Option<StdRng>,
}

impl Noise {
    /// Noise from a fixed seed
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Some(StdRng::seed_from_u64(seed)),
        }
    }

    /// Noise seeded from the operating system
    pub fn from_entropy() -> Self {
        Self {
            rng: Some(StdRng::from_entropy()),
        }
    }

    /// No noise: `uniform` returns the interval midpoint and `chance`
    /// resolves to the more likely outcome.
    pub fn disabled() -> Self {
        Self { rng: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.rng.is_some()
    }

    /// Uniform sample in `[low, high]`
    pub fn uniform(&mut self, low: f64, high: f64) -> f64 {
        match self.rng.as_mut() {
            Some(rng) if low < high => rng.gen_range(low..=high),
            _ => (low + high) / 2.0,
        }
    }

    /// Symmetric jitter in `[-amplitude, amplitude]`
    pub fn jitter(&mut self, amplitude: f64) -> f64 {
        self.uniform(-amplitude, amplitude)
    }

    /// Bernoulli trial with probability `p`
    pub fn chance(&mut self, p: f64) -> bool {
        match self.rng.as_mut() {
            Some(rng) => rng.gen_bool(p.clamp(0.0, 1.0)),
            None => p >= 0.5,
        }
    }
}

impl Default for Noise {
    fn default() -> Self {
        Self::from_entropy()
    }
}
