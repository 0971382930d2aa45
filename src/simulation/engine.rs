//! High-level runtime engine settings
//!
//! Fixed time step, run length and RNG seed used when building and
//! stepping a `Scenario`

#[derive(Debug, Clone)]
pub struct Engine {
    pub time_step: f64,    // dt per frame, seconds
    pub steps: u64,        // frames to run
    pub seed: u64,         // deterministic seed for all random draws
    pub report_every: u64, // log cadence in frames, 0 = only final summary
}

impl Default for Engine {
    fn default() -> Self {
        Self {
            time_step: 1.0 / 60.0,
            steps: 600,
            seed: 42,
            report_every: 60,
        }
    }
}
