use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use swarmsim::{generate_wavelet, update_target_distribution, ElementDynamics, NVec3, TargetAnchor, WaveletParams};

// =============================================================================
// Element dynamics
// =============================================================================

proptest! {
    #[test]
    fn element_converges_to_stationary_target(
        mass in 0.5f64..3.0,
        period in 1.0f64..5.0,
        damping in 0.3f64..2.0,
        tx in -10.0f64..10.0,
        ty in -10.0f64..10.0,
        tz in -10.0f64..10.0,
    ) {
        let mut e = ElementDynamics::new(mass, period, damping).unwrap();
        let target = NVec3::new(tx, ty, tz);

        // 60 s at 100 Hz
        for _ in 0..6000 {
            e.update(&target, &NVec3::zeros(), 0.01);
        }

        prop_assert!(
            (e.position - target).norm() < 1e-4,
            "did not converge: pos={:?}, target={:?}, T={}, zeta={}",
            e.position, target, period, damping
        );
        prop_assert!(e.velocity.norm() < 1e-4);
    }

    #[test]
    fn overdamped_energy_never_increases(
        mass in 0.5f64..3.0,
        period in 1.0f64..5.0,
        damping in 1.0f64..3.0,
        start in -5.0f64..5.0,
    ) {
        prop_assume!(start.abs() > 1e-3);

        let mut e = ElementDynamics::at(mass, period, damping, NVec3::new(start, 0.0, 0.0)).unwrap();
        let target = NVec3::zeros();
        let initial = e.kinetic_energy() + e.tracking_energy(&target);
        let mut prev = initial;

        for step in 0..6000 {
            e.update(&target, &NVec3::zeros(), 0.01);
            let energy = e.kinetic_energy() + e.tracking_energy(&target);
            prop_assert!(
                energy <= prev * (1.0 + 1e-12),
                "energy rose at step {}: {} -> {} (T={}, zeta={})",
                step, prev, energy, period, damping
            );
            prev = energy;
        }

        let remaining = e.kinetic_energy() + e.tracking_energy(&target);
        prop_assert!(remaining < initial * 1e-6, "energy {} -> {}", initial, remaining);
    }
}

// =============================================================================
// Wavelets
// =============================================================================

proptest! {
    #[test]
    fn wavelet_length_matches_formula(
        base_length in 1usize..300,
        num_wavelets in 1usize..10,
        overlap in 0.0f64..100.0,
        seed in any::<u64>(),
    ) {
        let params = WaveletParams::new(base_length, 2.0, 1.0, 1.0, 0.5, num_wavelets).with_overlap(overlap);
        let w = generate_wavelet(&mut ChaCha8Rng::seed_from_u64(seed), &params).unwrap();

        let hop = (base_length as f64 * (1.0 - overlap / 100.0)).floor() as usize;
        let expected = base_length + (num_wavelets - 1) * hop;

        prop_assert_eq!(w.x.len(), expected);
        prop_assert_eq!(w.y.len(), expected);
        prop_assert_eq!(w.z.len(), expected);
        prop_assert_eq!(w.x[0], 0.0);
        prop_assert!(w.x.iter().chain(&w.y).chain(&w.z).all(|v| v.is_finite()));
    }
}

// =============================================================================
// Distribution solver
// =============================================================================

fn unit_direction(theta: f64, phi: f64) -> NVec3 {
    NVec3::new(phi.sin() * theta.cos(), phi.sin() * theta.sin(), phi.cos())
}

proptest! {
    #[test]
    fn pair_at_ideal_distance_stays_put(
        ideal in 0.1f64..10.0,
        lr in 0.001f64..0.4,
        theta in 0.0f64..6.28,
        phi in 0.0f64..3.14,
    ) {
        let a = NVec3::new(0.3, -0.2, 0.1);
        let b = a + ideal * unit_direction(theta, phi);
        let mut anchors = vec![TargetAnchor::new(a), TargetAnchor::new(b)];

        update_target_distribution(&mut anchors, ideal, lr);

        prop_assert!((anchors[0].position - a).norm() < 1e-9);
        prop_assert!((anchors[1].position - b).norm() < 1e-9);
    }

    #[test]
    fn close_pair_separation_grows_monotonically(
        ideal in 0.5f64..5.0,
        fraction in 0.05f64..0.95,
        lr in 0.001f64..0.2,
        theta in 0.0f64..6.28,
        phi in 0.1f64..3.0,
    ) {
        let dir = unit_direction(theta, phi);
        let mut anchors = vec![
            TargetAnchor::new(NVec3::zeros()),
            TargetAnchor::new(dir * ideal * fraction),
        ];

        let mut prev = (anchors[1].position - anchors[0].position).norm();
        for _ in 0..100 {
            update_target_distribution(&mut anchors, ideal, lr);
            let s = (anchors[1].position - anchors[0].position).norm();
            prop_assert!(s >= prev - 1e-12, "shrank {} -> {}", prev, s);
            prop_assert!(s <= ideal + 1e-9, "overshot {} > {}", s, ideal);
            prev = s;
        }
    }
}

// =============================================================================
// Velocity estimator
// =============================================================================

proptest! {
    #[test]
    fn unit_step_velocity_equals_displacement(
        dx in -100.0f64..100.0,
        dy in -100.0f64..100.0,
        dz in -100.0f64..100.0,
    ) {
        let mut a = TargetAnchor::new(NVec3::zeros());
        a.position += NVec3::new(dx, dy, dz);
        a.update_velocity(1.0);

        prop_assert_eq!(a.velocity, NVec3::new(dx, dy, dz));
    }
}
