//! Fixed-step stepping of the swarm
//!
//! One call to [`swarm_step`] runs the full per-frame pipeline, driven by a
//! `DriverSet` and the `Engine` time step

use super::engine::Engine;
use super::error::SwarmError;
use super::forces::DriverSet;
use super::states::Swarm;

/// Advance the swarm by one frame.
///
/// Order matters, every stage reads what the previous one finished:
/// 1. drivers move the anchors for this frame
/// 2. anchor velocities from the position change
/// 3. each element integrates toward its anchor
///
/// A non-positive or non-finite `engine.time_step` is rejected before anything
/// is touched.
pub fn swarm_step(swarm: &mut Swarm, drivers: &mut DriverSet, engine: &Engine) -> Result<(), SwarmError> {
    let dt = engine.time_step;
    SwarmError::require_positive("time_step", dt)?;

    let frame = swarm.frame;
    let (elements, anchors) = swarm.split_mut();

    drivers.apply(frame, anchors);

    for a in anchors.iter_mut() {
        a.update_velocity(dt);
    }

    for (e, a) in elements.iter_mut().zip(anchors.iter()) {
        e.update(&a.position, &a.velocity, dt);
    }

    swarm.frame += 1;
    swarm.t += dt;

    tracing::trace!(frame, t = swarm.t, "stepped swarm");
    Ok(())
}
