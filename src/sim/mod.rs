//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed sub-steps with caller-clamped delta time
//! - Seeded RNG only
//! - Stable slot iteration order (row-major)
//! - No rendering or platform dependencies

pub mod actor;
pub mod assets;
pub mod body;
pub mod collision;
pub mod item;
pub mod level;
pub mod ring;
pub mod tick;

pub use actor::{Actor, Player, Trooper, TrooperMode, damage};
pub use assets::{AssetId, AssetRegistry};
pub use body::{Capsule, DamageOutcome, KinematicBody, integrate};
pub use collision::{Contact, LevelSurface, SpatialIndex, resolve};
pub use item::{Item, ItemKind, ItemState};
pub use level::{LevelCell, LevelGrid, WorldLevel};
pub use ring::{PlaceholderRing, PlaceholderSlot};
pub use tick::{GridMode, World, WorldEvent};
