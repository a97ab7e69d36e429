//! Collectable/obstacle items and their lifecycle state machine
//!
//! An item is a pure data record: `Idle` (bob-animating) until it is hit,
//! `Hit` (shrink/fade transition) until the fade runs out, then `Removed`.
//! The visual handle for an item lives outside the core and follows this
//! state through the item's asset id.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::assets::AssetId;
use crate::consts::{COLLIDE_RADIUS, ITEM_BOB_RATE, ITEM_FADE_SECS};

/// Egg shell palette, indexed by an item's color tag
pub const EGG_COLORS: usize = 5;

/// What an item does to the body that touches it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemKind {
    /// Score collectable
    Egg,
    /// Heal collectable (bonus)
    Carrot,
    /// Damage on contact
    Obstacle,
}

impl ItemKind {
    #[inline]
    pub fn is_collectable(self) -> bool {
        matches!(self, ItemKind::Egg | ItemKind::Carrot)
    }

    #[inline]
    pub fn is_obstacle(self) -> bool {
        self == ItemKind::Obstacle
    }
}

/// Lifecycle state: spawned -> idle-animating -> hit -> removed
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ItemState {
    /// Bobbing in place; `phase` drives the cosmetic animation
    Idle { phase: f32 },
    /// Shrink/fade transition after a hit
    Hit { remaining: f32 },
    Removed,
}

/// One materialized grid cell
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub id: u32,
    pub kind: ItemKind,
    /// Palette index for cosmetic feedback (egg shell color)
    pub color: u32,
    pub state: ItemState,
    pub asset: AssetId,
}

impl Item {
    pub fn new(id: u32, kind: ItemKind, color: u32, asset: AssetId) -> Self {
        Self {
            id,
            kind,
            color,
            state: ItemState::Idle { phase: 0.0 },
            asset,
        }
    }

    /// Pure distance test against the fixed trigger radius (strict `<`)
    #[inline]
    pub fn collide(&self, item_world: Vec3, probe_world: Vec3) -> bool {
        item_world.distance(probe_world) < COLLIDE_RADIUS
    }

    /// Transition Idle -> Hit and schedule eventual removal
    pub fn hit(&mut self) {
        if let ItemState::Idle { .. } = self.state {
            self.state = ItemState::Hit {
                remaining: ITEM_FADE_SECS,
            };
        }
    }

    /// Advance whichever transition is in flight; no-op once removed
    pub fn update(&mut self, dt: f32) {
        match &mut self.state {
            ItemState::Idle { phase } => {
                *phase = (*phase + ITEM_BOB_RATE * dt) % std::f32::consts::TAU;
            }
            ItemState::Hit { remaining } => {
                *remaining -= dt;
                if *remaining <= 0.0 {
                    self.state = ItemState::Removed;
                }
            }
            ItemState::Removed => {}
        }
    }

    #[inline]
    pub fn alive(&self) -> bool {
        self.state != ItemState::Removed
    }
}
