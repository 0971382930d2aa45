use std::time::Instant;

use crate::simulation::engine::Engine;
use crate::simulation::error::SwarmError;
use crate::simulation::forces::{update_target_distribution, DistributionSolver, DriverSet};
use crate::simulation::integrator::swarm_step;
use crate::simulation::states::{ElementDynamics, NVec3, Swarm, TargetAnchor};

/// Deterministic anchors, no rand needed
fn make_anchors(n: usize) -> Vec<TargetAnchor> {
    (0..n)
        .map(|i| {
            let i_f = i as f64;
            TargetAnchor::new(NVec3::new(
                (i_f * 0.37).sin() * 5.0,
                (i_f * 0.13).cos() * 5.0,
                (i_f * 0.07).sin() * 5.0,
            ))
        })
        .collect()
}

/// Swarm of size `n` with identical elements at the origin
fn make_swarm(n: usize) -> Result<Swarm, SwarmError> {
    let elements = (0..n)
        .map(|_| ElementDynamics::new(1.5, 4.0, 0.2))
        .collect::<Result<Vec<_>, _>>()?;
    Swarm::new(elements, make_anchors(n))
}

/// Time one O(N^2) distribution pass for growing N
/// Output is CSV so it can be pasted straight into a spreadsheet
pub fn bench_distribution() {
    let ns = [200, 400, 800, 1600, 3200, 6400];

    println!("N,pass_ms");
    for n in ns {
        let mut anchors = make_anchors(n);

        // Warm up
        update_target_distribution(&mut anchors, 0.5, 1e-4);

        let t0 = Instant::now();
        update_target_distribution(&mut anchors, 0.5, 1e-4);
        let ms = t0.elapsed().as_secs_f64() * 1000.0;

        println!("{},{:.6}", n, ms);
    }
}

/// Time full frames (solver every frame + integration) for growing N
pub fn bench_step() -> Result<(), SwarmError> {
    let ns = [200, 400, 800, 1600, 3200];
    let steps = 3; // frames averaged per N

    let engine = Engine {
        time_step: 1.0 / 60.0,
        steps,
        seed: 0,
        report_every: 0,
    };

    println!("N,step_ms,integrate_only_ms");
    for n in ns {
        // With the distribution solver
        let mut swarm = make_swarm(n)?;
        let mut drivers = DriverSet::new().with(DistributionSolver::new(0.5, 1e-4)?);

        // Warm-up
        swarm_step(&mut swarm, &mut drivers, &engine)?;

        let t0 = Instant::now();
        for _ in 0..steps {
            swarm_step(&mut swarm, &mut drivers, &engine)?;
        }
        let ms_full = t0.elapsed().as_secs_f64() * 1000.0 / steps as f64;

        // Integration alone
        let mut swarm = make_swarm(n)?;
        let mut no_drivers = DriverSet::new();

        let t1 = Instant::now();
        for _ in 0..steps {
            swarm_step(&mut swarm, &mut no_drivers, &engine)?;
        }
        let ms_integrate = t1.elapsed().as_secs_f64() * 1000.0 / steps as f64;

        println!("{},{:.6},{:.6}", n, ms_full, ms_integrate);
    }
    Ok(())
}
