//! Swarm construction: randomized elements, base target positions and anchors

use rand::Rng;
use serde::Deserialize;

use crate::simulation::error::SwarmError;
use crate::simulation::params::ElementParams;
use crate::simulation::states::{ElementDynamics, NVec3, TargetAnchor};

/// Shape of the static base target positions
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TargetLayout {
    /// Flattened square grid centered on the origin with a little z jitter
    Grid {
        #[serde(default = "TargetLayout::default_spacing")]
        spacing: f64,
        #[serde(default = "TargetLayout::default_z_jitter")]
        z_jitter: f64,
    },
    /// Uniform in a cube of side `size` centered on the origin
    RandomCube {
        #[serde(default = "TargetLayout::default_cube_size")]
        size: f64,
    },
}

impl TargetLayout {
    fn default_spacing() -> f64 {
        0.5
    }

    fn default_z_jitter() -> f64 {
        1.9
    }

    fn default_cube_size() -> f64 {
        1.0
    }
}

impl Default for TargetLayout {
    fn default() -> Self {
        TargetLayout::Grid {
            spacing: Self::default_spacing(),
            z_jitter: Self::default_z_jitter(),
        }
    }
}

/// Uniform point in a cube of side `size` centered on the origin
fn random_in_cube<R: Rng + ?Sized>(rng: &mut R, size: f64) -> NVec3 {
    NVec3::new(
        rng.random::<f64>() * size - size / 2.0,
        rng.random::<f64>() * size - size / 2.0,
        rng.random::<f64>() * size - size / 2.0,
    )
}

/// Build `num_elements` elements with randomized mass, period and damping,
/// placed uniformly in a cube of side `box_size` around the origin.
pub fn initialize_swarm_elements<R: Rng + ?Sized>(
    rng: &mut R,
    num_elements: usize,
    box_size: f64,
    params: &ElementParams,
) -> Result<Vec<ElementDynamics>, SwarmError> {
    params.validate()?;
    SwarmError::require_non_negative("box_size", box_size)?;

    let mut elements = Vec::with_capacity(num_elements);
    for _ in 0..num_elements {
        let mass = params.mass.sample(rng);
        let natural_period = params.natural_period.sample(rng);
        let damping_ratio = params.damping_ratio.sample(rng);
        let position = random_in_cube(rng, box_size);

        elements.push(ElementDynamics::at(mass, natural_period, damping_ratio, position)?);
    }

    tracing::debug!(num_elements, box_size, "initialized swarm elements");
    Ok(elements)
}

/// Static base target positions for `num_elements` anchors
pub fn generate_swarm_elem_positions<R: Rng + ?Sized>(
    rng: &mut R,
    num_elements: usize,
    layout: &TargetLayout,
) -> Vec<NVec3> {
    match *layout {
        TargetLayout::Grid { spacing, z_jitter } => {
            // elements per row/column
            let grid = (num_elements as f64).sqrt().ceil() as usize;
            let half = grid as f64 / 2.0;

            (0..num_elements)
                .map(|i| {
                    let row = i / grid;
                    let col = i % grid;
                    NVec3::new(
                        (col as f64 - half) * spacing,
                        (row as f64 - half) * spacing,
                        (rng.random::<f64>() - 0.5) * z_jitter,
                    )
                })
                .collect()
        }
        TargetLayout::RandomCube { size } => (0..num_elements).map(|_| random_in_cube(rng, size)).collect(),
    }
}

/// One anchor per element at the matching offset; missing offsets sit at the origin
pub fn initialize_target_elements_with_offsets(num_elements: usize, offsets: &[NVec3]) -> Vec<TargetAnchor> {
    if offsets.len() < num_elements {
        tracing::debug!(
            num_elements,
            offsets = offsets.len(),
            "padding missing target offsets with the origin"
        );
    }

    (0..num_elements)
        .map(|i| TargetAnchor::new(offsets.get(i).copied().unwrap_or_else(NVec3::zeros)))
        .collect()
}

/// Indices spread around the middle target: `center + k * spread` for
/// `k` in `-range/2 ..= range/2`, keeping only those in bounds.
pub fn followed_indices(num_targets: usize, index_range: usize, spread: usize) -> Vec<usize> {
    let center = (num_targets / 2) as i64;
    let half = (index_range / 2) as i64;
    let spread = spread as i64;

    (-half..=half)
        .map(|k| center + k * spread)
        .filter(|&idx| idx >= 0 && idx < num_targets as i64)
        .map(|idx| idx as usize)
        .collect()
}
