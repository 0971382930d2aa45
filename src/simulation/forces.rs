//! Target drivers: everything that moves target anchors before a step
//!
//! Defines the [`TargetDriver`] trait and a [`DriverSet`] that applies its
//! terms in order. Each term adds a position delta, so terms compose:
//! - [`DistributionSolver`]   O(N^2) spacing relaxation
//! - [`WaveletPerturbation`]  playback of a generated wavelet signal
//! - [`SinusoidalModulation`] small per-index sine wobble

use std::collections::HashSet;

use crate::simulation::error::SwarmError;
use crate::simulation::states::{NVec3, TargetAnchor};
use crate::simulation::wavelet::WaveletBuffer;

/// Pairs closer than this are treated as coincident and skipped
pub const DEFAULT_MIN_DISTANCE: f64 = 1e-9;

/// Collection of target drivers applied in registration order
pub struct DriverSet {
    terms: Vec<Box<dyn TargetDriver + Send + Sync>>,
}

impl DriverSet {
    /// Create an empty driver set
    pub fn new() -> Self {
        Self { terms: Vec::new() }
    }

    /// Add a driver
    pub fn with(mut self, term: impl TargetDriver + Send + Sync + 'static) -> Self {
        self.terms.push(Box::new(term));
        self
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Let every driver move the anchors for `frame`
    pub fn apply(&mut self, frame: u64, anchors: &mut [TargetAnchor]) {
        for term in self.terms.iter_mut() {
            term.drive(frame, anchors);
        }
    }
}

impl Default for DriverSet {
    fn default() -> Self {
        Self::new()
    }
}

/// Anything that mutates anchor positions once per frame.
/// Implementations add their delta into `anchors[i].position`.
pub trait TargetDriver {
    fn drive(&mut self, frame: u64, anchors: &mut [TargetAnchor]);
}

// =========================================================================================
// Distribution solver
// =========================================================================================

/// One in-place relaxation pass pushing every pairwise distance toward
/// `ideal_distance`. Coincident pairs (closer than [`DEFAULT_MIN_DISTANCE`]) are skipped.
pub fn update_target_distribution(targets: &mut [TargetAnchor], ideal_distance: f64, learning_rate: f64) {
    relax_targets(targets, ideal_distance, learning_rate, DEFAULT_MIN_DISTANCE);
}

/// Relaxation pass with an explicit coincidence threshold.
/// Returns how many (i, j) pairs were skipped as coincident.
///
/// Anchors move one at a time: anchor `i` already sees the moved positions
/// of anchors `0..i`.
pub fn relax_targets(targets: &mut [TargetAnchor], ideal_distance: f64, learning_rate: f64, min_distance: f64) -> usize {
    let n = targets.len();
    let mut skipped = 0;

    for i in 0..n {
        let pi = targets[i].position;
        let mut net = NVec3::zeros();

        for (j, tj) in targets.iter().enumerate() {
            if j == i {
                continue;
            }

            // r points from j to i
            let r = pi - tj.position;
            let dist = r.norm();
            if dist < min_distance {
                // no direction to push along
                skipped += 1;
                continue;
            }

            // delta > 0: too far apart, pull in; delta < 0: too close, push out
            let delta = dist - ideal_distance;
            let force_magnitude = -learning_rate * delta;

            net += (force_magnitude / dist) * r;
        }

        // position step, not an integrated force
        targets[i].position += net;
    }

    skipped
}

/// [`relax_targets`] as a driver, run every `cadence` frames
#[derive(Debug, Clone)]
pub struct DistributionSolver {
    pub ideal_distance: f64,
    pub learning_rate: f64,
    pub cadence: u64,
    pub min_distance: f64,
}

impl DistributionSolver {
    pub fn new(ideal_distance: f64, learning_rate: f64) -> Result<Self, SwarmError> {
        Self::with_cadence(ideal_distance, learning_rate, 1, DEFAULT_MIN_DISTANCE)
    }

    pub fn with_cadence(ideal_distance: f64, learning_rate: f64, cadence: u64, min_distance: f64) -> Result<Self, SwarmError> {
        SwarmError::require_non_negative("ideal_distance", ideal_distance)?;
        SwarmError::require_positive("learning_rate", learning_rate)?;
        SwarmError::require_non_negative("min_distance", min_distance)?;
        if cadence == 0 {
            return Err(SwarmError::invalid("cadence", 0.0, "must be >= 1"));
        }
        Ok(Self {
            ideal_distance,
            learning_rate,
            cadence,
            min_distance,
        })
    }
}

impl TargetDriver for DistributionSolver {
    fn drive(&mut self, frame: u64, anchors: &mut [TargetAnchor]) {
        if frame % self.cadence != 0 {
            return;
        }
        let skipped = relax_targets(anchors, self.ideal_distance, self.learning_rate, self.min_distance);
        if skipped > 0 {
            tracing::warn!(frame, skipped, "distribution pass skipped coincident target pairs");
        }
    }
}

// =========================================================================================
// Wavelet perturbation
// =========================================================================================

/// Plays a [`WaveletBuffer`] back onto anchor positions.
///
/// Anchor `i` reads the buffer at `frame * playback_rate + i * phase_stride`
/// so neighbours are out of phase. Only the change in offset since the
/// previous frame is applied, which keeps it composable with other drivers.
/// Call [`WaveletPerturbation::prime`] on the base positions first, otherwise
/// frame 0 jumps by the full offset.
#[derive(Debug, Clone)]
pub struct WaveletPerturbation {
    buffer: WaveletBuffer,
    pub amplitude: f64,
    pub playback_rate: f64, // samples per frame
    pub phase_stride: f64,  // sample offset per anchor index
    followed: Option<HashSet<usize>>,
    last_offsets: Vec<NVec3>,
}

impl WaveletPerturbation {
    pub fn new(buffer: WaveletBuffer, amplitude: f64, playback_rate: f64, phase_stride: f64) -> Result<Self, SwarmError> {
        SwarmError::require_finite("amplitude", amplitude)?;
        SwarmError::require_finite("playback_rate", playback_rate)?;
        SwarmError::require_finite("phase_stride", phase_stride)?;
        Ok(Self {
            buffer,
            amplitude,
            playback_rate,
            phase_stride,
            followed: None,
            last_offsets: Vec::new(),
        })
    }

    /// Restrict the perturbation to the given anchor indices
    pub fn only(mut self, indices: impl IntoIterator<Item = usize>) -> Self {
        self.followed = Some(indices.into_iter().collect());
        self
    }

    /// Move base positions to their frame-0 offsets before anchors are built.
    ///
    /// Anchors created from the primed positions snapshot the offset as their
    /// previous position, so frame 0 adds no delta and the first velocity
    /// estimate carries no jump from the origin of the signal.
    pub fn prime(&mut self, base: &mut [NVec3]) {
        self.last_offsets = vec![NVec3::zeros(); base.len()];
        for (i, p) in base.iter_mut().enumerate() {
            if !self.follows(i) {
                continue;
            }
            let offset = self.offset_at(0, i);
            *p += offset;
            self.last_offsets[i] = offset;
        }
    }

    fn follows(&self, index: usize) -> bool {
        self.followed.as_ref().map_or(true, |set| set.contains(&index))
    }

    /// Absolute offset anchor `index` should carry at `frame`
    pub fn offset_at(&self, frame: u64, index: usize) -> NVec3 {
        let phase = frame as f64 * self.playback_rate + index as f64 * self.phase_stride;
        self.amplitude * self.buffer.sample_at(phase)
    }
}

impl TargetDriver for WaveletPerturbation {
    fn drive(&mut self, frame: u64, anchors: &mut [TargetAnchor]) {
        if self.last_offsets.len() != anchors.len() {
            self.last_offsets.resize(anchors.len(), NVec3::zeros());
        }

        for (i, anchor) in anchors.iter_mut().enumerate() {
            if !self.follows(i) {
                continue;
            }
            let offset = self.offset_at(frame, i);
            anchor.position += offset - self.last_offsets[i];
            self.last_offsets[i] = offset;
        }
    }
}

// =========================================================================================
// Sinusoidal modulation
// =========================================================================================

/// Slow sine wobble of every anchor, phase-shifted by index
#[derive(Debug, Clone)]
pub struct SinusoidalModulation {
    pub frequency: f64,
    pub amplitude: f64,
    pub z_scale: f64,        // z gets this fraction of the x/y wobble
    pub time_increment: f64, // oscillation time advanced per frame
}

impl Default for SinusoidalModulation {
    fn default() -> Self {
        Self {
            frequency: 0.2,
            amplitude: 0.005,
            z_scale: 0.2,
            time_increment: 0.2,
        }
    }
}

impl TargetDriver for SinusoidalModulation {
    fn drive(&mut self, frame: u64, anchors: &mut [TargetAnchor]) {
        let time = (frame + 1) as f64 * self.time_increment;
        for (i, anchor) in anchors.iter_mut().enumerate() {
            let s = self.amplitude * (self.frequency * time + i as f64).sin();
            anchor.position += NVec3::new(s, s, self.z_scale * s);
        }
    }
}
