//! World tick orchestration
//!
//! Per tick, in order: advance the drum rotation, tick item animations, poll
//! every occupied slot against the player's world position, and hand back the
//! ordered outbox of outcome records. Level-up and reset rebuild the item
//! registries atomically within the tick that triggered them.

use glam::Vec3;
use log::{debug, info};
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::actor::{self, Player};
use super::assets::AssetRegistry;
use super::body::DamageOutcome;
use super::collision::SpatialIndex;
use super::item::{Item, ItemKind};
use super::level::{LevelGrid, WorldLevel};
use super::ring::PlaceholderRing;
use crate::consts::*;

/// Typed outcome record emitted from a tick.
///
/// The caller consumes these instead of wiring listeners; HUD, audio and
/// haptics all hang off this one seam.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum WorldEvent {
    /// A score collectable was claimed; `color` is its cosmetic tag
    Collected { color: u32 },
    /// A heal collectable was claimed
    Healed { health: f32 },
    /// An obstacle connected
    Damaged { health: f32 },
    /// The player's health reached zero
    Died,
    /// All collectables consumed; difficulty advanced
    LevelUp { level: u32 },
    /// Something the HUD shows has changed
    StateChanged,
}

/// Where level content comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GridMode {
    /// The hand-authored course, reused on every level
    Authored,
    /// Weighted-random rows, regenerated on level-up
    Random { rows: usize },
}

/// The running world: drum, level content, placeholder ring and registries
pub struct World {
    pub seed: u64,
    rng: Pcg32,
    /// Current drum rotation (decreases as the level scrolls)
    pub drum_angle: f32,
    pub grid: LevelGrid,
    mode: GridMode,
    pub level: WorldLevel,
    pub ring: PlaceholderRing,
    assets: AssetRegistry,
    surface: Box<dyn SpatialIndex>,
    /// Detached items still playing their shrink/fade transition
    fading: Vec<Item>,
    next_item_id: u32,
}

impl World {
    pub fn new(
        seed: u64,
        mode: GridMode,
        assets: AssetRegistry,
        surface: Box<dyn SpatialIndex>,
    ) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let grid = match mode {
            GridMode::Authored => LevelGrid::authored(),
            GridMode::Random { rows } => LevelGrid::generate(&mut rng, rows),
        };
        let mut world = Self {
            seed,
            rng,
            drum_angle: 0.0,
            grid,
            mode,
            level: WorldLevel::default(),
            ring: PlaceholderRing::default(),
            assets,
            surface,
            fading: Vec::new(),
            next_item_id: 1,
        };
        world.materialize_window();
        world
    }

    /// World over a caller-supplied grid (custom authored courses)
    pub fn with_grid(
        seed: u64,
        grid: LevelGrid,
        assets: AssetRegistry,
        surface: Box<dyn SpatialIndex>,
    ) -> Self {
        let mut world = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            drum_angle: 0.0,
            grid,
            mode: GridMode::Authored,
            level: WorldLevel::default(),
            ring: PlaceholderRing::default(),
            assets,
            surface,
            fading: Vec::new(),
            next_item_id: 1,
        };
        world.materialize_window();
        world
    }

    /// The static-world index actors integrate against
    pub fn surface(&self) -> &dyn SpatialIndex {
        self.surface.as_ref()
    }

    /// Re-resolve the spatial index after world geometry changed
    pub fn rebuild_index(&mut self) {
        self.surface.rebuild();
    }

    fn materialize_window(&mut self) {
        self.ring.materialize(
            &self.grid,
            0,
            WINDOW_ROWS,
            &mut self.level,
            &self.assets,
            &mut self.rng,
            &mut self.next_item_id,
        );
    }

    /// Bulk-clear registries and slots, then refresh from row 0.
    ///
    /// Runs to completion inside the triggering tick so no collision pass
    /// ever sees a half-cleared registry.
    fn advance_level(&mut self) {
        self.level.level_up();
        if let GridMode::Random { rows } = self.mode {
            self.grid = LevelGrid::generate(&mut self.rng, rows);
        }
        self.level.clear_registries();
        self.ring.clear();
        self.materialize_window();
        info!(
            "level up -> {} (speed {:.1})",
            self.level.level_number, self.level.speed
        );
    }

    /// Restore the world to its initial run state
    pub fn reset(&mut self) {
        self.level.reset();
        self.level.clear_registries();
        self.ring.clear();
        self.fading.clear();
        self.drum_angle = 0.0;
        self.rng = Pcg32::seed_from_u64(self.seed);
        if let GridMode::Random { rows } = self.mode {
            self.grid = LevelGrid::generate(&mut self.rng, rows);
        }
        self.materialize_window();
        self.surface.rebuild();
        info!("world reset (seed {})", self.seed);
    }

    /// Advance the world by one sub-step and poll item collisions
    pub fn tick(&mut self, player: &mut Player, dt: f32) -> Vec<WorldEvent> {
        let mut events = Vec::new();

        // (1) scroll
        self.drum_angle -= dt * BASE_SCROLL_RATE * self.level.speed;

        // (2) animate attached and fading items
        for item in self.ring.items_mut() {
            item.update(dt);
        }
        for item in &mut self.fading {
            item.update(dt);
        }
        self.fading.retain(Item::alive);

        // (3) poll occupied slots, row-major
        let probe = player.body.position;
        let hits: Vec<(usize, usize)> = self
            .ring
            .occupied()
            .filter(|&(row, col, item)| {
                item.collide(self.ring.slot_position(row, col, self.drum_angle), probe)
            })
            .map(|(row, col, _)| (row, col))
            .collect();

        for (row, col) in hits {
            let Some(mut item) = self.ring.take_item(row, col) else {
                continue;
            };
            item.hit();

            let leveled_up = self.on_hit(&item, player, &mut events);
            if leveled_up {
                events.push(WorldEvent::LevelUp {
                    level: self.level.level_number,
                });
            }
            events.push(WorldEvent::StateChanged);
            self.fading.push(item);

            if leveled_up {
                // The ring was rebuilt; remaining hit coordinates now point
                // at freshly spawned items. Stop polling until next tick.
                break;
            }
        }

        events
    }

    /// Apply one item hit to the player and the registries.
    ///
    /// Returns true when the hit consumed the last collectable and the level
    /// advanced.
    fn on_hit(&mut self, item: &Item, player: &mut Player, events: &mut Vec<WorldEvent>) -> bool {
        match item.kind {
            ItemKind::Egg => {
                player.score += 1;
                player.bucket_color = item.color;
                events.push(WorldEvent::Collected { color: item.color });
                debug!("collected egg {} (score {})", item.id, player.score);
            }
            ItemKind::Carrot => {
                player.body.health += 1.0;
                events.push(WorldEvent::Healed {
                    health: player.body.health,
                });
                debug!("ate carrot {} (health {})", item.id, player.body.health);
            }
            ItemKind::Obstacle => {
                match actor::damage(player, 1.0) {
                    DamageOutcome::Hurt => events.push(WorldEvent::Damaged {
                        health: player.body.health,
                    }),
                    DamageOutcome::Died => {
                        events.push(WorldEvent::Damaged { health: 0.0 });
                        events.push(WorldEvent::Died);
                        info!("player died at score {}", player.score);
                    }
                    DamageOutcome::Ignored => {}
                }
                self.level.remove_obstacle(item.id);
                return false;
            }
        }

        if self.level.consume_collectable(item.id) {
            self.advance_level();
            return true;
        }
        false
    }

    /// World position of the player's current slot-space probe (test aid)
    pub fn slot_world(&self, row: usize, col: usize) -> Vec3 {
        self.ring.slot_position(row, col, self.drum_angle)
    }
}
