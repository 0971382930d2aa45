pub mod simulation;
pub mod configuration;
pub mod benchmark;

pub use simulation::states::{ElementDynamics, TargetAnchor, Swarm, NVec3};
pub use simulation::error::SwarmError;
pub use simulation::params::{ElementParams, VariedParam, random_variance};
pub use simulation::forces::{TargetDriver, DriverSet, DistributionSolver, WaveletPerturbation, SinusoidalModulation, update_target_distribution, relax_targets};
pub use simulation::wavelet::{WaveletBuffer, WaveletParams, generate_wavelet, interpolate};
pub use simulation::initializer::{TargetLayout, initialize_swarm_elements, generate_swarm_elem_positions, initialize_target_elements_with_offsets, followed_indices};
pub use simulation::integrator::swarm_step;
pub use simulation::engine::Engine;
pub use simulation::scenario::Scenario;

pub use configuration::config::{EngineConfig, SwarmConfig, DistributionConfig, WaveletConfig, FollowConfig, ModulationConfig, ScenarioConfig};

pub use benchmark::benchmark::{bench_distribution, bench_step};
