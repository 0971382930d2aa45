//! Core state types for the swarm simulation.
//!
//! - `ElementDynamics` – one swarm member tracking a target with a damped spring
//! - `TargetAnchor`    – the moving point an element tracks
//! - `Swarm`           – index-paired elements and anchors plus the simulation clock

use std::f64::consts::PI;

use nalgebra::Vector3;

use crate::simulation::error::SwarmError;

pub type NVec3 = Vector3<f64>;

/// Second-order tracking filter for a single swarm element.
///
/// Physical parameters are validated once in [`ElementDynamics::new`] and are
/// read-only afterwards, so `update` never has to check them.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementDynamics {
    mass: f64,           // > 0
    natural_period: f64, // > 0, seconds
    damping_ratio: f64,  // >= 0, dimensionless
    pub position: NVec3,
    pub velocity: NVec3,
}

impl ElementDynamics {
    /// Create an element at rest at the origin.
    ///
    /// Rejects non-finite values, `mass <= 0`, `natural_period <= 0` and
    /// `damping_ratio < 0`.
    pub fn new(mass: f64, natural_period: f64, damping_ratio: f64) -> Result<Self, SwarmError> {
        SwarmError::require_positive("mass", mass)?;
        SwarmError::require_positive("natural_period", natural_period)?;
        SwarmError::require_non_negative("damping_ratio", damping_ratio)?;

        Ok(Self {
            mass,
            natural_period,
            damping_ratio,
            position: NVec3::zeros(),
            velocity: NVec3::zeros(),
        })
    }

    /// Same as [`ElementDynamics::new`] but starting at `position`.
    pub fn at(mass: f64, natural_period: f64, damping_ratio: f64, position: NVec3) -> Result<Self, SwarmError> {
        let mut element = Self::new(mass, natural_period, damping_ratio)?;
        element.position = position;
        Ok(element)
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn natural_period(&self) -> f64 {
        self.natural_period
    }

    pub fn damping_ratio(&self) -> f64 {
        self.damping_ratio
    }

    /// Angular natural frequency ω_n = 2π / T
    pub fn natural_frequency(&self) -> f64 {
        2.0 * PI / self.natural_period
    }

    /// Spring stiffness k = ω_n² m
    pub fn stiffness(&self) -> f64 {
        let omega_n = self.natural_frequency();
        omega_n * omega_n * self.mass
    }

    /// Damping coefficient c = 2 ζ ω_n m
    pub fn damping_coefficient(&self) -> f64 {
        2.0 * self.damping_ratio * self.natural_frequency() * self.mass
    }

    /// Advance one semi-implicit Euler step toward the target.
    ///
    /// Velocity is kicked first with the spring-damper force, then the
    /// position drifts with the *new* velocity. All three axes share the same
    /// coefficients, so the update is written on whole vectors.
    ///
    /// `time_step` must be positive and small relative to the natural period;
    /// the stepper validates it, this hot path does not.
    pub fn update(&mut self, target_position: &NVec3, target_velocity: &NVec3, time_step: f64) {
        let k = self.stiffness();
        let c = self.damping_coefficient();

        // F = -k (x - x_t) - c (v - v_t)
        let force = -k * (self.position - target_position) - c * (self.velocity - target_velocity);

        // Kick: v_n+1 = v_n + (F / m) dt
        self.velocity += (force / self.mass) * time_step;

        // Drift with the updated velocity: x_n+1 = x_n + v_n+1 dt
        self.position += self.velocity * time_step;
    }

    /// 1/2 m |v|²
    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.mass * self.velocity.norm_squared()
    }

    /// Spring potential 1/2 k |x - x_t|² relative to `target_position`
    pub fn tracking_energy(&self, target_position: &NVec3) -> f64 {
        0.5 * self.stiffness() * (self.position - target_position).norm_squared()
    }
}

/// A moving target point tracked by the element with the same index.
#[derive(Debug, Clone, PartialEq)]
pub struct TargetAnchor {
    pub position: NVec3,
    pub velocity: NVec3,
    previous_position: NVec3, // snapshot for the finite-difference velocity
}

impl TargetAnchor {
    /// Anchor at rest at `position`. The first velocity estimate is zero
    /// unless the anchor moves before it.
    pub fn new(position: NVec3) -> Self {
        Self {
            position,
            velocity: NVec3::zeros(),
            // seeded with the start position, not the origin, so the first
            // estimate is not position / dt
            previous_position: position,
        }
    }

    pub fn previous_position(&self) -> NVec3 {
        self.previous_position
    }

    /// Backward finite difference: v = (x - x_prev) / dt, then x_prev = x.
    ///
    /// Call exactly once per step, after the position is final for the step.
    pub fn update_velocity(&mut self, time_step: f64) {
        self.velocity = (self.position - self.previous_position) / time_step;
        self.previous_position = self.position;
    }
}

/// Elements and their anchors, paired by index.
///
/// Both arrays are fixed-length once the swarm exists, so
/// `elements().len() == anchors().len()` always holds.
#[derive(Debug, Clone)]
pub struct Swarm {
    elements: Vec<ElementDynamics>,
    anchors: Vec<TargetAnchor>,
    pub t: f64,     // simulation time
    pub frame: u64, // completed steps
}

impl Swarm {
    pub fn new(elements: Vec<ElementDynamics>, anchors: Vec<TargetAnchor>) -> Result<Self, SwarmError> {
        if elements.len() != anchors.len() {
            return Err(SwarmError::LengthMismatch {
                elements: elements.len(),
                anchors: anchors.len(),
            });
        }
        Ok(Self {
            elements,
            anchors,
            t: 0.0,
            frame: 0,
        })
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn elements(&self) -> &[ElementDynamics] {
        &self.elements
    }

    pub fn anchors(&self) -> &[TargetAnchor] {
        &self.anchors
    }

    /// Both arrays mutably at once, for the stepper.
    pub fn split_mut(&mut self) -> (&mut [ElementDynamics], &mut [TargetAnchor]) {
        (&mut self.elements, &mut self.anchors)
    }

    /// Mean distance between each element and its anchor
    pub fn mean_tracking_error(&self) -> f64 {
        if self.is_empty() {
            return 0.0;
        }
        let total: f64 = self
            .elements
            .iter()
            .zip(self.anchors.iter())
            .map(|(e, a)| (e.position - a.position).norm())
            .sum();
        total / self.len() as f64
    }
}
