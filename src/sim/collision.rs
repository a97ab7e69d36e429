//! Capsule-vs-world collision resolution
//!
//! The static world is reached through the `SpatialIndex` trait: one
//! capsule-intersection query per integration step, answered by whatever
//! spatial structure the embedder supplies. This module ships the analytic
//! `LevelSurface` index for the drum level geometry.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::body::Capsule;
use crate::axis_distance;
use crate::consts::*;

/// A single contact against static world geometry
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Contact {
    /// Unit surface normal, pointing out of the geometry
    pub normal: Vec3,
    /// Penetration depth along the normal (non-negative)
    pub depth: f32,
}

impl Contact {
    /// Floor contacts are exactly those whose normal points upward.
    ///
    /// Deliberately no epsilon: a vertical wall (`normal.y == 0`) slides,
    /// anything with the slightest upward tilt counts as floor.
    #[inline]
    pub fn is_floor(&self) -> bool {
        self.normal.y > 0.0
    }
}

/// Static-world spatial index queried once per integration step
pub trait SpatialIndex {
    /// Deepest contact between the capsule and the static geometry, if any
    fn capsule_intersect(&self, capsule: &Capsule) -> Option<Contact>;

    /// Re-resolve internal structure after world geometry changed
    fn rebuild(&mut self) {}
}

/// Apply one positional-correction + velocity-projection step.
///
/// Floor contacts keep the velocity untouched; non-floor contacts cancel the
/// velocity component along the normal (sliding response, not a full stop).
/// Either way the capsule is pushed out of penetration by `normal * depth`.
/// Returns the contact so the caller can update its floor flag.
pub fn resolve(
    capsule: &mut Capsule,
    velocity: &mut Vec3,
    index: &dyn SpatialIndex,
) -> Option<Contact> {
    let contact = index.capsule_intersect(capsule)?;

    if !contact.is_floor() {
        *velocity -= contact.normal * contact.normal.dot(*velocity);
    }
    capsule.translate(contact.normal * contact.depth);

    Some(contact)
}

/// Analytic spatial index for the drum level.
///
/// The drum is a cylinder around the X axis that actors run on from the
/// outside; guardrail walls cap the axial ends (`x = ±rail_x`) and fence the
/// running direction (`z = ±rail_z`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelSurface {
    pub drum_radius: f32,
    pub rail_x: f32,
    pub rail_z: f32,
}

impl Default for LevelSurface {
    fn default() -> Self {
        Self {
            drum_radius: DRUM_RADIUS,
            rail_x: RAIL_X,
            rail_z: RAIL_Z,
        }
    }
}

impl LevelSurface {
    /// Contact of the capsule's lower sphere with the drum surface
    fn drum_contact(&self, capsule: &Capsule) -> Option<Contact> {
        let p = capsule.start;
        let d = axis_distance(p);
        let reach = self.drum_radius + capsule.radius;
        if d >= reach || d < 1e-6 {
            return None;
        }
        Some(Contact {
            normal: Vec3::new(0.0, p.y / d, p.z / d),
            depth: reach - d,
        })
    }

    /// Contact with one axis-aligned guardrail plane pair
    fn rail_contact(coord: f32, limit: f32, radius: f32, axis: Vec3) -> Option<Contact> {
        let edge = limit - radius;
        if coord > edge {
            Some(Contact {
                normal: -axis,
                depth: coord - edge,
            })
        } else if coord < -edge {
            Some(Contact {
                normal: axis,
                depth: -edge - coord,
            })
        } else {
            None
        }
    }
}

impl SpatialIndex for LevelSurface {
    fn capsule_intersect(&self, capsule: &Capsule) -> Option<Contact> {
        let p = capsule.start;
        let candidates = [
            self.drum_contact(capsule),
            Self::rail_contact(p.x, self.rail_x, capsule.radius, Vec3::X),
            Self::rail_contact(p.z, self.rail_z, capsule.radius, Vec3::Z),
        ];

        candidates
            .into_iter()
            .flatten()
            .max_by(|a, b| a.depth.total_cmp(&b.depth))
    }
}
