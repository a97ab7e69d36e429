//! Roto Runner - a rotating-cylinder runner/collector game, headless core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (capsule physics, level streaming, items)
//!
//! Rendering, audio and input live outside this crate. The sim exposes three
//! seams for them: the `SpatialIndex` trait, the `AssetRegistry` id table and
//! the typed `WorldEvent` outbox returned from every tick.

pub mod sim;

pub use sim::{Player, World, WorldEvent};

use glam::Vec3;

/// Game configuration constants
pub mod consts {
    use glam::Vec3;

    /// Fractional sub-steps per rendered frame
    pub const STEPS_PER_FRAME: u32 = 5;
    /// Frame delta clamp before sub-stepping (bounds tunneling at low fps)
    pub const MAX_FRAME_DT: f32 = 0.05;

    /// Downward acceleration applied to airborne bodies
    pub const GRAVITY: f32 = 9.8;
    /// Velocity damping rate (per-tick factor is `exp(-DAMPING_RATE * dt) - 1`)
    pub const DAMPING_RATE: f32 = 4.0;
    /// Fraction of ground damping that applies in the air
    pub const AIR_DRAG_FACTOR: f32 = 0.1;

    /// Drum (level cylinder) dimensions - the drum axis runs along X
    pub const DRUM_RADIUS: f32 = 3.0;
    /// Guardrail walls capping the drum ends
    pub const RAIL_X: f32 = 2.0;
    /// Guardrail walls along the running direction
    pub const RAIL_Z: f32 = 1.7;

    /// Placeholder ring: rows around the drum, columns along its axis
    pub const RING_ROWS: usize = 19;
    pub const RING_COLS: usize = 4;
    /// Ring sits just above the drum surface
    pub const RING_RADIUS: f32 = DRUM_RADIUS + 0.1;
    /// Axial offset of column 0 and spacing between columns
    pub const RING_COL_ORIGIN: f32 = -1.5;
    pub const RING_COL_SPACING: f32 = 1.0;
    /// Fixed phase so that ring row 0 starts nearest the player spawn
    pub const RING_PHASE: f32 = 4.5;

    /// Default materialization window (rows 0..18)
    pub const WINDOW_ROWS: usize = 18;

    /// Drum rotation rate at level speed 1.0 (radians/sec)
    pub const BASE_SCROLL_RATE: f32 = 0.3;
    /// Speed multiplier gain per level-up
    pub const SPEED_PER_LEVEL: f32 = 0.5;

    /// Item trigger distance (strict `<`)
    pub const COLLIDE_RADIUS: f32 = 0.5;
    /// Idle bob rate for item animation (radians/sec of bob phase)
    pub const ITEM_BOB_RATE: f32 = 4.0;
    /// Shrink/fade duration between `Hit` and `Removed`
    pub const ITEM_FADE_SECS: f32 = 0.3;

    /// Player defaults
    pub const PLAYER_HEALTH: f32 = 3.0;
    pub const PLAYER_COLLIDER_HEIGHT: f32 = 0.3;
    pub const PLAYER_COLLIDER_RADIUS: f32 = 0.3;
    pub const PLAYER_SPEED_ON_FLOOR: f32 = 15.0;
    pub const PLAYER_SPEED_IN_AIR: f32 = 5.0;
    pub const PLAYER_JUMP_HEIGHT: f32 = 4.0;

    /// Trooper defaults
    pub const TROOPER_HEALTH: f32 = 100.0;
    pub const TROOPER_COLLIDER_HEIGHT: f32 = 1.2;
    pub const TROOPER_COLLIDER_RADIUS: f32 = 0.5;
    pub const TROOPER_DAMAGE_MULTIPLIER: f32 = 0.25;
    /// Distance thresholds for trooper mode switching
    pub const TROOPER_FIGHT_RANGE: f32 = 15.0;
    pub const TROOPER_SUSPICIOUS_RANGE: f32 = 25.0;

    /// Where the player (re)spawns, on top of the drum
    pub const SPAWN_POINT: Vec3 = Vec3::new(0.0, 3.0, -1.0);
    /// Falling below this resets the player to the spawn point
    pub const KILL_PLANE_Y: f32 = -25.0;
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

/// Point on a ring around the X axis: `angle` 0 is the top of the drum.
///
/// Returns world coordinates for a ring of the given radius at axial offset
/// `axial`; increasing angle rotates toward +Z.
#[inline]
pub fn ring_point(radius: f32, angle: f32, axial: f32) -> Vec3 {
    Vec3::new(axial, radius * angle.cos(), radius * angle.sin())
}

/// Radial distance of a point from the drum axis (the X axis)
#[inline]
pub fn axis_distance(p: Vec3) -> f32 {
    (p.y * p.y + p.z * p.z).sqrt()
}
