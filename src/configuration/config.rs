//! Configuration types for loading swarm scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! scenario. A scenario consists of:
//!
//! - [`EngineConfig`]       – time step, run length, seed, report cadence
//! - [`SwarmConfig`]        – element count, spawn box and randomized physics
//! - [`TargetLayout`]       – where the base target positions go
//! - [`DistributionConfig`] – optional spacing relaxation driver
//! - [`WaveletConfig`]      – optional wavelet perturbation driver
//! - [`ModulationConfig`]   – optional sine wobble driver
//! - [`ScenarioConfig`]     – top-level wrapper used to load a scenario from YAML
//!
//! # YAML format
//!
//! ```yaml
//! engine:
//!   time_step: 0.0166       # seconds per frame
//!   steps: 600
//!   seed: 42
//!   report_every: 60
//!
//! swarm:
//!   num_elements: 64
//!   box_size: 10.0
//!   mass:           { base: 1.5, variance: 0.5 }
//!   natural_period: { base: 4.0, variance: 2.9 }
//!   damping_ratio:  { base: 0.2, variance: 0.15 }
//!
//! layout:
//!   kind: grid              # or random_cube (with `size`)
//!   spacing: 0.5
//!   z_jitter: 1.9
//!
//! distribution:
//!   ideal_distance: 0.6
//!   learning_rate: 0.002
//!   cadence: 4
//!
//! wavelet:
//!   generator:
//!     base_length: 240
//!     base_frequency: 2.0
//!     freq_variation: 1.0
//!     base_tau: 1.0
//!     tau_variation: 0.5
//!     num_wavelets: 8
//!     overlap_percent: 30
//!   amplitude: 0.4
//!   playback_rate: 1.0
//!   phase_stride: 7.0
//!   follow: { index_range: 9, spread: 2 }
//! ```
//!
//! The scenario builder maps this configuration into runtime types.

use serde::Deserialize;

use crate::simulation::forces::DEFAULT_MIN_DISTANCE;
use crate::simulation::initializer::TargetLayout;
use crate::simulation::params::ElementParams;
use crate::simulation::wavelet::WaveletParams;

/// Engine-level settings
#[derive(Deserialize, Debug, Clone)]
pub struct EngineConfig {
    pub time_step: f64, // seconds per frame, > 0
    #[serde(default = "EngineConfig::default_steps")]
    pub steps: u64, // frames to run
    #[serde(default)]
    pub seed: u64, // deterministic seed to make runs reproducible
    #[serde(default)]
    pub report_every: u64, // log every N frames, 0 = final summary only
}

impl EngineConfig {
    fn default_steps() -> u64 {
        600
    }
}

/// Swarm size, spawn volume and per-element physics ranges
#[derive(Deserialize, Debug, Clone)]
pub struct SwarmConfig {
    pub num_elements: usize,
    #[serde(default = "SwarmConfig::default_box_size")]
    pub box_size: f64, // side of the spawn cube around the origin
    #[serde(flatten)]
    pub params: ElementParams,
}

impl SwarmConfig {
    fn default_box_size() -> f64 {
        10.0
    }
}

/// Spacing relaxation settings
#[derive(Deserialize, Debug, Clone)]
pub struct DistributionConfig {
    pub ideal_distance: f64,
    pub learning_rate: f64,
    #[serde(default = "DistributionConfig::default_cadence")]
    pub cadence: u64, // run every N frames
    #[serde(default = "DistributionConfig::default_min_distance")]
    pub min_distance: f64, // coincidence threshold
}

impl DistributionConfig {
    fn default_cadence() -> u64 {
        1
    }

    fn default_min_distance() -> f64 {
        DEFAULT_MIN_DISTANCE
    }
}

/// Which anchors a wavelet perturbation follows, see `followed_indices`
#[derive(Deserialize, Debug, Clone)]
pub struct FollowConfig {
    pub index_range: usize,
    #[serde(default = "FollowConfig::default_spread")]
    pub spread: usize,
}

impl FollowConfig {
    fn default_spread() -> usize {
        2
    }
}

/// Wavelet generator inputs plus playback settings
#[derive(Deserialize, Debug, Clone)]
pub struct WaveletConfig {
    pub generator: WaveletParams,
    #[serde(default = "WaveletConfig::default_amplitude")]
    pub amplitude: f64,
    #[serde(default = "WaveletConfig::default_playback_rate")]
    pub playback_rate: f64, // samples per frame
    #[serde(default)]
    pub phase_stride: f64, // sample offset per anchor index
    pub follow: Option<FollowConfig>, // None = every anchor
}

impl WaveletConfig {
    fn default_amplitude() -> f64 {
        1.0
    }

    fn default_playback_rate() -> f64 {
        1.0
    }
}

/// Sine wobble settings; absent fields fall back to the driver defaults
#[derive(Deserialize, Debug, Clone, Default)]
pub struct ModulationConfig {
    pub frequency: Option<f64>,
    pub amplitude: Option<f64>,
    pub z_scale: Option<f64>,
    pub time_increment: Option<f64>,
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone)]
pub struct ScenarioConfig {
    pub engine: EngineConfig,
    pub swarm: SwarmConfig,
    #[serde(default)]
    pub layout: TargetLayout,
    pub distribution: Option<DistributionConfig>,
    pub wavelet: Option<WaveletConfig>,
    pub modulation: Option<ModulationConfig>,
}
