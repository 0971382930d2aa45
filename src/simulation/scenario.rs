//! Build fully-initialized swarm scenarios from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces a runtime bundle
//! containing:
//! - engine settings (`Engine`)
//! - swarm state (`Swarm`, elements paired with anchors at t = 0)
//! - active target drivers (`DriverSet`)
//!
//! Every random draw comes from one `ChaCha8Rng` seeded by `engine.seed`, so a
//! scenario file always builds the same swarm.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::configuration::config::{ModulationConfig, ScenarioConfig, WaveletConfig};
use crate::simulation::engine::Engine;
use crate::simulation::error::SwarmError;
use crate::simulation::forces::{DistributionSolver, DriverSet, SinusoidalModulation, WaveletPerturbation};
use crate::simulation::initializer::{
    followed_indices, generate_swarm_elem_positions, initialize_swarm_elements, initialize_target_elements_with_offsets,
};
use crate::simulation::integrator::swarm_step;
use crate::simulation::states::Swarm;
use crate::simulation::wavelet::generate_wavelet;

/// The main runtime bundle constructed from a [`ScenarioConfig`]
pub struct Scenario {
    pub engine: Engine,
    pub swarm: Swarm,
    pub drivers: DriverSet,
}

impl Scenario {
    pub fn build_scenario(cfg: ScenarioConfig) -> Result<Self, SwarmError> {
        // Engine (runtime) from EngineConfig
        let e_cfg = &cfg.engine;
        SwarmError::require_positive("time_step", e_cfg.time_step)?;
        let engine = Engine {
            time_step: e_cfg.time_step,
            steps: e_cfg.steps,
            seed: e_cfg.seed,
            report_every: e_cfg.report_every,
        };

        let mut rng = ChaCha8Rng::seed_from_u64(engine.seed);

        // Elements scattered in the spawn box, anchors on the layout
        let n = cfg.swarm.num_elements;
        let elements = initialize_swarm_elements(&mut rng, n, cfg.swarm.box_size, &cfg.swarm.params)?;
        let mut base = generate_swarm_elem_positions(&mut rng, n, &cfg.layout);

        // Wavelet offsets go into the base before anchors snapshot it
        let wavelet = match &cfg.wavelet {
            Some(w) => {
                let mut driver = build_wavelet_driver(&mut rng, w, n)?;
                driver.prime(&mut base);
                Some(driver)
            }
            None => None,
        };

        let anchors = initialize_target_elements_with_offsets(n, &base);
        let swarm = Swarm::new(elements, anchors)?;

        // Drivers in pipeline order: spacing first, then perturbations on top
        let mut drivers = DriverSet::new();
        if let Some(d) = &cfg.distribution {
            drivers = drivers.with(DistributionSolver::with_cadence(
                d.ideal_distance,
                d.learning_rate,
                d.cadence,
                d.min_distance,
            )?);
        }
        if let Some(w) = wavelet {
            drivers = drivers.with(w);
        }
        if let Some(m) = &cfg.modulation {
            drivers = drivers.with(build_modulation(m));
        }

        tracing::debug!(
            num_elements = n,
            drivers = drivers.len(),
            time_step = engine.time_step,
            seed = engine.seed,
            "built scenario"
        );

        Ok(Self { engine, swarm, drivers })
    }

    /// Advance one frame
    pub fn step(&mut self) -> Result<(), SwarmError> {
        swarm_step(&mut self.swarm, &mut self.drivers, &self.engine)
    }
}

fn build_wavelet_driver(rng: &mut ChaCha8Rng, cfg: &WaveletConfig, num_anchors: usize) -> Result<WaveletPerturbation, SwarmError> {
    let buffer = generate_wavelet(rng, &cfg.generator)?;
    let driver = WaveletPerturbation::new(buffer, cfg.amplitude, cfg.playback_rate, cfg.phase_stride)?;

    Ok(match &cfg.follow {
        Some(f) => driver.only(followed_indices(num_anchors, f.index_range, f.spread)),
        None => driver,
    })
}

fn build_modulation(cfg: &ModulationConfig) -> SinusoidalModulation {
    let d = SinusoidalModulation::default();
    SinusoidalModulation {
        frequency: cfg.frequency.unwrap_or(d.frequency),
        amplitude: cfg.amplitude.unwrap_or(d.amplitude),
        z_scale: cfg.z_scale.unwrap_or(d.z_scale),
        time_increment: cfg.time_increment.unwrap_or(d.time_increment),
    }
}
