//! Kinematic body shared by every moving, collidable entity
//!
//! The capsule collider is the source of truth: `position` is derived from it
//! after every integration step, never the other way around.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::collision::{self, Contact, SpatialIndex};
use crate::consts::{AIR_DRAG_FACTOR, DAMPING_RATE};

/// Swept-sphere collider: two endpoints and a radius
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Capsule {
    pub start: Vec3,
    pub end: Vec3,
    pub radius: f32,
}

impl Capsule {
    /// Upright capsule with `end` exactly `height` above `start`
    pub fn new(start: Vec3, height: f32, radius: f32) -> Self {
        Self {
            start,
            end: start + Vec3::Y * height,
            radius,
        }
    }

    /// Move both endpoints by the same offset
    #[inline]
    pub fn translate(&mut self, offset: Vec3) {
        self.start += offset;
        self.end += offset;
    }

    /// Distance from `start` to `end`
    #[inline]
    pub fn height(&self) -> f32 {
        (self.end - self.start).length()
    }
}

/// Outcome of an `apply_damage` call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Body was already dead; nothing changed
    Ignored,
    /// Health reduced, body still alive
    Hurt,
    /// Health reached zero with this hit
    Died,
}

/// Position/velocity/collider state for one moving entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KinematicBody {
    /// World position derived from the collider (foot-level anchor)
    pub position: Vec3,
    pub velocity: Vec3,
    pub collider: Capsule,
    /// True iff the most recent contact normal pointed upward
    pub on_floor: bool,
    pub gravity: f32,
    pub health: f32,
    pub damage_multiplier: f32,
}

impl KinematicBody {
    pub fn new(gravity: f32, height: f32, radius: f32, health: f32, damage_multiplier: f32) -> Self {
        Self {
            position: Vec3::ZERO,
            velocity: Vec3::ZERO,
            collider: Capsule::new(Vec3::ZERO, height, radius),
            on_floor: false,
            gravity,
            health,
            damage_multiplier,
        }
    }

    /// Re-seat the collider at a new position without changing velocity
    pub fn set_position(&mut self, pos: Vec3) {
        let height = self.collider.height();
        self.collider.start = pos;
        self.collider.end = pos + Vec3::Y * height;
        self.sync_position();
    }

    /// Instant relocation: re-seat the collider, drop all momentum, and
    /// assume floor support until the next integration step says otherwise.
    pub fn teleport(&mut self, pos: Vec3) {
        self.set_position(pos);
        self.velocity = Vec3::ZERO;
        self.on_floor = true;
    }

    /// Derive the visible position from the collider's upper endpoint
    #[inline]
    pub fn sync_position(&mut self) {
        self.position = self.collider.end;
        self.position.y -= self.collider.radius;
    }

    #[inline]
    pub fn is_dead(&self) -> bool {
        self.health <= 0.0
    }

    /// Process inbound damage through the idempotent guard.
    ///
    /// Dead bodies ignore further damage, so repeated collision detections
    /// can never drive health negative or fire a second death.
    pub fn apply_damage(&mut self, amount: f32) -> DamageOutcome {
        if self.health == 0.0 {
            return DamageOutcome::Ignored;
        }
        self.health -= amount * self.damage_multiplier;
        if self.health <= 0.0 {
            self.health = 0.0;
            DamageOutcome::Died
        } else {
            DamageOutcome::Hurt
        }
    }
}

/// Advance a body by one fixed sub-step and resolve it against the world.
///
/// Velocity decays exponentially (`exp(-4*dt) - 1` per step on the floor, a
/// tenth of that in the air), gravity applies only while airborne, and the
/// collision resolver may push the collider and redirect velocity afterwards.
pub fn integrate(body: &mut KinematicBody, dt: f32, index: &dyn SpatialIndex) -> Option<Contact> {
    let mut damping = (-DAMPING_RATE * dt).exp() - 1.0;
    if !body.on_floor {
        body.velocity.y -= body.gravity * dt;
        damping *= AIR_DRAG_FACTOR; // small air resistance
    }
    body.velocity += body.velocity * damping;

    body.collider.translate(body.velocity * dt);

    let contact = collision::resolve(&mut body.collider, &mut body.velocity, index);
    body.on_floor = contact.is_some_and(|c| c.is_floor());

    body.sync_position();
    contact
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NoWorld;
    impl SpatialIndex for NoWorld {
        fn capsule_intersect(&self, _capsule: &Capsule) -> Option<Contact> {
            None
        }
    }

    /// Flat floor with zero depth: keeps `on_floor` set without pushing
    struct RestingFloor;
    impl SpatialIndex for RestingFloor {
        fn capsule_intersect(&self, _capsule: &Capsule) -> Option<Contact> {
            Some(Contact {
                normal: Vec3::Y,
                depth: 0.0,
            })
        }
    }

    fn test_body() -> KinematicBody {
        KinematicBody::new(0.0, 0.3, 0.3, 3.0, 1.0)
    }

    #[test]
    fn test_capsule_invariant() {
        let c = Capsule::new(Vec3::new(1.0, 2.0, 3.0), 0.3, 0.5);
        assert!((c.end - c.start - Vec3::Y * 0.3).length() < 1e-6);
        let mut c2 = c;
        c2.translate(Vec3::new(0.5, -1.0, 2.0));
        assert!((c2.height() - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_damping_geometric_decay() {
        let mut body = test_body();
        body.on_floor = true;
        body.velocity = Vec3::new(10.0, 0.0, 0.0);

        let dt = 0.01;
        let damping = (-4.0_f32 * dt).exp() - 1.0;
        let n = 25;
        for _ in 0..n {
            integrate(&mut body, dt, &RestingFloor);
        }
        let expected = 10.0 * (1.0 + damping).powi(n);
        assert!(
            (body.velocity.length() - expected).abs() < 1e-3,
            "got {} expected {}",
            body.velocity.length(),
            expected
        );
    }

    #[test]
    fn test_air_drag_is_tenth() {
        let dt = 0.01;
        let mut grounded = test_body();
        grounded.on_floor = true;
        grounded.velocity = Vec3::new(10.0, 0.0, 0.0);
        integrate(&mut grounded, dt, &RestingFloor);

        let mut airborne = test_body();
        airborne.on_floor = false;
        airborne.velocity = Vec3::new(10.0, 0.0, 0.0);
        integrate(&mut airborne, dt, &NoWorld);

        let damping = (-4.0_f32 * dt).exp() - 1.0;
        assert!((grounded.velocity.x - 10.0 * (1.0 + damping)).abs() < 1e-4);
        assert!((airborne.velocity.x - 10.0 * (1.0 + damping * 0.1)).abs() < 1e-4);
    }

    #[test]
    fn test_gravity_only_in_air() {
        let dt = 0.01;
        let mut body = KinematicBody::new(9.8, 0.3, 0.3, 3.0, 1.0);
        body.on_floor = false;
        integrate(&mut body, dt, &NoWorld);
        assert!(body.velocity.y < 0.0);

        let mut grounded = KinematicBody::new(9.8, 0.3, 0.3, 3.0, 1.0);
        grounded.on_floor = true;
        integrate(&mut grounded, dt, &RestingFloor);
        assert_eq!(grounded.velocity.y, 0.0);
    }

    #[test]
    fn test_no_contact_clears_floor_flag() {
        let mut body = test_body();
        body.on_floor = true;
        integrate(&mut body, 0.01, &NoWorld);
        assert!(!body.on_floor);
    }

    #[test]
    fn test_position_derived_from_collider() {
        let mut body = test_body();
        body.teleport(Vec3::new(0.0, 3.0, -1.0));
        // height == radius, so the derived position equals the teleport target
        assert!((body.position - Vec3::new(0.0, 3.0, -1.0)).length() < 1e-6);
        assert!(body.on_floor);
        assert_eq!(body.velocity, Vec3::ZERO);
    }

    #[test]
    fn test_damage_clamps_and_dies_once() {
        let mut body = test_body();
        assert_eq!(body.apply_damage(1.0), DamageOutcome::Hurt);
        assert_eq!(body.health, 2.0);
        assert_eq!(body.apply_damage(5.0), DamageOutcome::Died);
        assert_eq!(body.health, 0.0);
        // Dead bodies ignore everything that follows
        assert_eq!(body.apply_damage(100.0), DamageOutcome::Ignored);
        assert_eq!(body.health, 0.0);
    }

    #[test]
    fn test_damage_multiplier() {
        let mut body = KinematicBody::new(0.0, 1.2, 0.5, 100.0, 0.25);
        assert_eq!(body.apply_damage(8.0), DamageOutcome::Hurt);
        assert!((body.health - 98.0).abs() < 1e-6);
    }
}
