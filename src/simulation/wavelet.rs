//! Procedural wavelet signals for perturbing target trajectories.
//!
//! A signal is built from `num_wavelets` short windowed damped sinusoids laid
//! end to end with overlap. Each wavelet is multiplied by a `sin²` window that
//! is zero at both of its ends, so summing overlapping segments gives a
//! continuous signal without seams.
//!
//! ```text
//!   |<------ base_length ------>|
//!   [ wavelet 0                 ]
//!                   [ wavelet 1                 ]
//!   |<- overlap_len->|
//! ```
//!
//! `overlap_len` is really the hop between wavelet starts:
//! `floor(base_length * (1 - overlap_percent / 100))`.

use std::f64::consts::PI;

use rand::Rng;
use serde::Deserialize;

use crate::simulation::error::SwarmError;
use crate::simulation::params::random_variance;
use crate::simulation::states::NVec3;

/// Linear interpolation between two values
#[inline]
pub fn interpolate(value1: f64, value2: f64, fraction: f64) -> f64 {
    value1 + (value2 - value1) * fraction
}

/// Inputs to [`generate_wavelet`]
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct WaveletParams {
    pub base_length: usize,   // samples per wavelet
    pub base_frequency: f64,  // cycles per wavelet
    #[serde(default)]
    pub freq_variation: f64,  // full width of the frequency jitter
    pub base_tau: f64,        // exponential decay constant
    #[serde(default)]
    pub tau_variation: f64,   // full width of the tau jitter
    pub num_wavelets: usize,
    #[serde(default = "WaveletParams::default_overlap_percent")]
    pub overlap_percent: f64,
}

impl WaveletParams {
    pub const DEFAULT_OVERLAP_PERCENT: f64 = 30.0;

    fn default_overlap_percent() -> f64 {
        Self::DEFAULT_OVERLAP_PERCENT
    }

    pub fn new(
        base_length: usize,
        base_frequency: f64,
        freq_variation: f64,
        base_tau: f64,
        tau_variation: f64,
        num_wavelets: usize,
    ) -> Self {
        Self {
            base_length,
            base_frequency,
            freq_variation,
            base_tau,
            tau_variation,
            num_wavelets,
            overlap_percent: Self::DEFAULT_OVERLAP_PERCENT,
        }
    }

    pub fn with_overlap(mut self, overlap_percent: f64) -> Self {
        self.overlap_percent = overlap_percent;
        self
    }

    /// Hop between consecutive wavelet starts
    pub fn overlap_length(&self) -> usize {
        let factor = 1.0 - self.overlap_percent / 100.0;
        // factor < 0 is rejected by validate(); clamp so this never wraps
        (self.base_length as f64 * factor).floor().max(0.0) as usize
    }

    /// base_length + (num_wavelets - 1) * overlap_length
    pub fn total_length(&self) -> usize {
        self.base_length + self.num_wavelets.saturating_sub(1) * self.overlap_length()
    }

    pub fn validate(&self) -> Result<(), SwarmError> {
        if self.base_length == 0 {
            return Err(SwarmError::invalid("base_length", 0.0, "must be >= 1"));
        }
        if self.num_wavelets == 0 {
            return Err(SwarmError::invalid("num_wavelets", 0.0, "must be >= 1"));
        }
        if !self.overlap_percent.is_finite() || self.overlap_percent > 100.0 {
            return Err(SwarmError::invalid(
                "overlap_percent",
                self.overlap_percent,
                "must be finite and <= 100",
            ));
        }
        SwarmError::require_finite("base_frequency", self.base_frequency)?;
        SwarmError::require_finite("freq_variation", self.freq_variation)?;
        SwarmError::require_finite("base_tau", self.base_tau)?;
        SwarmError::require_finite("tau_variation", self.tau_variation)?;
        Ok(())
    }
}

/// Three equal-length per-axis sample sequences
#[derive(Debug, Clone, PartialEq)]
pub struct WaveletBuffer {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub z: Vec<f64>,
}

impl WaveletBuffer {
    fn zeros(len: usize) -> Self {
        Self {
            x: vec![0.0; len],
            y: vec![0.0; len],
            z: vec![0.0; len],
        }
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Sample at `index`, wrapping past the end
    pub fn sample(&self, index: usize) -> NVec3 {
        if self.is_empty() {
            return NVec3::zeros();
        }
        let i = index % self.len();
        NVec3::new(self.x[i], self.y[i], self.z[i])
    }

    /// Sample at a fractional position, wrapping and linearly interpolating
    /// between neighbouring samples. Negative phases wrap from the end.
    pub fn sample_at(&self, phase: f64) -> NVec3 {
        let n = self.len();
        if n == 0 || !phase.is_finite() {
            return NVec3::zeros();
        }
        let wrapped = phase.rem_euclid(n as f64);
        let i0 = wrapped.floor() as usize % n;
        let i1 = (i0 + 1) % n;
        let frac = wrapped - wrapped.floor();

        NVec3::new(
            interpolate(self.x[i0], self.x[i1], frac),
            interpolate(self.y[i0], self.y[i1], frac),
            interpolate(self.z[i0], self.z[i1], frac),
        )
    }
}

/// One windowed, decaying sinusoid sample at normalized time `t` in [0, 1)
#[inline]
fn wavelet_value(frequency: f64, tau: f64, t: f64) -> f64 {
    let window = (PI * t).sin().powi(2); // zero at both ends of the wavelet
    (2.0 * PI * frequency * t).sin() * (-tau * t).exp() * window
}

/// (frequency, tau) for one axis of one wavelet
fn draw_axis<R: Rng + ?Sized>(rng: &mut R, params: &WaveletParams) -> (f64, f64) {
    let tau = random_variance(rng, params.base_tau, params.tau_variation);
    let frequency = random_variance(rng, params.base_frequency, params.freq_variation);
    (frequency, tau)
}

/// Build a randomized overlapping wavelet signal for each axis.
///
/// Every wavelet draws its own frequency and decay per axis, uniformly within
/// `base ± variation / 2`, and is summed into the buffer starting at
/// `i * overlap_length`.
pub fn generate_wavelet<R: Rng + ?Sized>(rng: &mut R, params: &WaveletParams) -> Result<WaveletBuffer, SwarmError> {
    params.validate()?;

    let base_length = params.base_length;
    let hop = params.overlap_length();
    let mut buffer = WaveletBuffer::zeros(params.total_length());

    for i in 0..params.num_wavelets {
        let (fx, tx) = draw_axis(rng, params);
        let (fy, ty) = draw_axis(rng, params);
        let (fz, tz) = draw_axis(rng, params);

        let start = i * hop;
        for j in 0..base_length {
            let t = j as f64 / base_length as f64;
            let k = start + j;
            buffer.x[k] += wavelet_value(fx, tx, t);
            buffer.y[k] += wavelet_value(fy, ty, t);
            buffer.z[k] += wavelet_value(fz, tz, t);
        }
    }

    tracing::debug!(
        num_wavelets = params.num_wavelets,
        base_length,
        hop,
        total_length = buffer.len(),
        "generated wavelet buffer"
    );

    Ok(buffer)
}
