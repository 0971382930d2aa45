pub mod states;
pub mod params;
pub mod engine;
pub mod error;
pub mod forces;
pub mod integrator;
pub mod initializer;
pub mod scenario;
pub mod wavelet;
