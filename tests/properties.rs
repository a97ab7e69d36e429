//! Property tests over the sim invariants

use glam::Vec3;
use proptest::prelude::*;

use roto_runner::consts::MAX_FRAME_DT;
use roto_runner::normalize_angle;
use roto_runner::sim::{
    Capsule, Contact, DamageOutcome, KinematicBody, LevelGrid, SpatialIndex, integrate,
};

struct NoWorld;
impl SpatialIndex for NoWorld {
    fn capsule_intersect(&self, _capsule: &Capsule) -> Option<Contact> {
        None
    }
}

proptest! {
    /// Damping only ever removes horizontal speed, for any clamped sub-step.
    #[test]
    fn integration_never_gains_horizontal_speed(
        vx in -50.0f32..50.0,
        vz in -50.0f32..50.0,
        dt in 0.0f32..MAX_FRAME_DT,
        airborne in any::<bool>(),
    ) {
        let mut body = KinematicBody::new(9.8, 0.3, 0.3, 3.0, 1.0);
        body.on_floor = !airborne;
        body.velocity = Vec3::new(vx, 0.0, vz);
        let before = (vx * vx + vz * vz).sqrt();

        integrate(&mut body, dt, &NoWorld);

        let after = (body.velocity.x.powi(2) + body.velocity.z.powi(2)).sqrt();
        prop_assert!(after <= before + 1e-4);
    }

    /// Any window over any grid is a valid slice, never a panic.
    #[test]
    fn window_is_total(
        seed in any::<u64>(),
        rows in 0usize..64,
        from in 0usize..100,
        to in 0usize..100,
    ) {
        use rand::SeedableRng;
        let mut rng = rand_pcg::Pcg32::seed_from_u64(seed);
        let grid = LevelGrid::generate(&mut rng, rows);
        let window = grid.window(from, to);
        prop_assert!(window.len() <= rows);
        prop_assert!(window.len() <= to.saturating_sub(from));
    }

    /// No damage sequence drives health negative or kills twice.
    #[test]
    fn damage_clamps_and_dies_once(amounts in prop::collection::vec(0.0f32..10.0, 0..30)) {
        let mut body = KinematicBody::new(9.8, 0.3, 0.3, 3.0, 1.0);
        let mut deaths = 0;
        for amount in amounts {
            if body.apply_damage(amount) == DamageOutcome::Died {
                deaths += 1;
            }
            prop_assert!(body.health >= 0.0);
        }
        prop_assert!(deaths <= 1);
    }

    /// Angle normalization lands in [-pi, pi) for any finite input.
    #[test]
    fn normalize_angle_in_range(angle in -1000.0f32..1000.0) {
        let normalized = normalize_angle(angle);
        prop_assert!((-std::f32::consts::PI..std::f32::consts::PI).contains(&normalized));
    }
}
