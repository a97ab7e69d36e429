//! Actors: entities built around a kinematic body
//!
//! One shared integration routine does the physics; variants differ only in
//! their damage/death side effects, expressed as trait hooks instead of an
//! inheritance chain.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::body::{self, DamageOutcome, KinematicBody};
use super::collision::SpatialIndex;
use crate::consts::*;

/// A moving, damageable entity
pub trait Actor {
    fn body(&self) -> &KinematicBody;
    fn body_mut(&mut self) -> &mut KinematicBody;

    /// Advance physics by one sub-step
    fn update(&mut self, dt: f32, index: &dyn SpatialIndex) {
        body::integrate(self.body_mut(), dt, index);
    }

    /// Called after health dropped but the actor survived
    fn on_damage(&mut self) {}

    /// Called exactly once, when health reaches zero
    fn on_death(&mut self) {}
}

/// Route damage through the body's idempotent guard and fire variant hooks
pub fn damage(actor: &mut dyn Actor, amount: f32) -> DamageOutcome {
    let outcome = actor.body_mut().apply_damage(amount);
    match outcome {
        DamageOutcome::Hurt => actor.on_damage(),
        DamageOutcome::Died => actor.on_death(),
        DamageOutcome::Ignored => {}
    }
    outcome
}

/// The player-controlled runner
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub body: KinematicBody,
    pub score: u32,
    /// Palette index of the egg most recently collected (cosmetic feedback)
    pub bucket_color: u32,
}

impl Default for Player {
    fn default() -> Self {
        Self::new(GRAVITY)
    }
}

impl Player {
    pub fn new(gravity: f32) -> Self {
        Self {
            body: KinematicBody::new(
                gravity,
                PLAYER_COLLIDER_HEIGHT,
                PLAYER_COLLIDER_RADIUS,
                PLAYER_HEALTH,
                1.0,
            ),
            score: 0,
            bucket_color: 0,
        }
    }

    /// Restore health and score for a new run
    pub fn reset(&mut self) {
        self.body.health = PLAYER_HEALTH;
        self.score = 0;
    }

    pub fn teleport(&mut self, pos: Vec3) {
        self.body.teleport(pos);
    }

    /// Jumping needs floor support
    pub fn jump(&mut self) {
        if self.body.on_floor {
            self.body.velocity.y = PLAYER_JUMP_HEIGHT;
        }
    }

    /// Control authority for this sub-step: grounded movement is crisper
    /// than airborne steering.
    pub fn speed_delta(&self, dt: f32) -> f32 {
        dt * if self.body.on_floor {
            PLAYER_SPEED_ON_FLOOR
        } else {
            PLAYER_SPEED_IN_AIR
        }
    }

    /// Steer by adding to velocity; the input layer supplies the direction
    pub fn push(&mut self, impulse: Vec3) {
        self.body.velocity += impulse;
    }
}

impl Actor for Player {
    fn body(&self) -> &KinematicBody {
        &self.body
    }

    fn body_mut(&mut self) -> &mut KinematicBody {
        &mut self.body
    }
}

/// Trooper behaviour mode, driven by distance to the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrooperMode {
    Idle,
    /// Player in sight: track them
    Suspicious,
    Fight,
}

/// NPC guard that watches the player and closes in
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trooper {
    pub body: KinematicBody,
    pub mode: TrooperMode,
}

impl Trooper {
    pub fn new(gravity: f32) -> Self {
        Self {
            body: KinematicBody::new(
                gravity,
                TROOPER_COLLIDER_HEIGHT,
                TROOPER_COLLIDER_RADIUS,
                TROOPER_HEALTH,
                TROOPER_DAMAGE_MULTIPLIER,
            ),
            mode: TrooperMode::Idle,
        }
    }

    /// Physics step plus mode selection against the player's position
    pub fn update_with_target(&mut self, dt: f32, index: &dyn SpatialIndex, player_pos: Vec3) {
        self.update(dt, index);
        if self.body.is_dead() {
            return;
        }
        let distance = self.body.position.distance(player_pos);
        self.mode = if distance < TROOPER_FIGHT_RANGE {
            TrooperMode::Fight
        } else if distance < TROOPER_SUSPICIOUS_RANGE {
            TrooperMode::Suspicious
        } else {
            TrooperMode::Idle
        };
    }
}

impl Actor for Trooper {
    fn body(&self) -> &KinematicBody {
        &self.body
    }

    fn body_mut(&mut self) -> &mut KinematicBody {
        &mut self.body
    }

    fn on_death(&mut self) {
        self.mode = TrooperMode::Idle;
    }
}
