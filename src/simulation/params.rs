//! Randomized physical parameters for swarm elements
//!
//! `ElementParams` holds one `VariedParam` per physical constant:
//! - mass,
//! - natural period (seconds),
//! - damping ratio.
//!
//! Each draw is uniform in `[base - variance/2, base + variance/2)`

use rand::Rng;
use serde::Deserialize;

use crate::simulation::error::SwarmError;

/// Uniform jitter around `value`: `value + u * variance - variance / 2`, `u ~ U[0, 1)`
pub fn random_variance<R: Rng + ?Sized>(rng: &mut R, value: f64, variance: f64) -> f64 {
    value + rng.random::<f64>() * variance - variance / 2.0
}

/// A base value and the full width of its uniform spread
#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct VariedParam {
    pub base: f64,
    #[serde(default)]
    pub variance: f64,
}

impl VariedParam {
    pub const fn new(base: f64, variance: f64) -> Self {
        Self { base, variance }
    }

    /// Smallest value a draw can produce
    pub fn min(&self) -> f64 {
        self.base - self.variance.abs() / 2.0
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        random_variance(rng, self.base, self.variance)
    }
}

/// Per-element physical constants drawn at swarm initialization
#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct ElementParams {
    #[serde(default = "ElementParams::default_mass")]
    pub mass: VariedParam,
    #[serde(default = "ElementParams::default_natural_period")]
    pub natural_period: VariedParam,
    #[serde(default = "ElementParams::default_damping_ratio")]
    pub damping_ratio: VariedParam,
}

impl ElementParams {
    fn default_mass() -> VariedParam {
        VariedParam::new(1.5, 0.5)
    }

    fn default_natural_period() -> VariedParam {
        VariedParam::new(4.0, 2.9)
    }

    fn default_damping_ratio() -> VariedParam {
        VariedParam::new(0.2, 0.15)
    }

    /// Reject ranges whose draws could be invalid for [`ElementDynamics`](crate::ElementDynamics)
    pub fn validate(&self) -> Result<(), SwarmError> {
        for (name, p) in [
            ("mass.variance", self.mass),
            ("natural_period.variance", self.natural_period),
            ("damping_ratio.variance", self.damping_ratio),
        ] {
            SwarmError::require_finite(name, p.variance)?;
        }
        SwarmError::require_positive("mass (lower bound)", self.mass.min())?;
        SwarmError::require_positive("natural_period (lower bound)", self.natural_period.min())?;
        SwarmError::require_non_negative("damping_ratio (lower bound)", self.damping_ratio.min())?;
        Ok(())
    }
}

impl Default for ElementParams {
    fn default() -> Self {
        Self {
            mass: Self::default_mass(),
            natural_period: Self::default_natural_period(),
            damping_ratio: Self::default_damping_ratio(),
        }
    }
}
