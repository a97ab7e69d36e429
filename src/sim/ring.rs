//! Placeholder ring: anchor slots wrapped around the drum
//!
//! A fixed rows x columns array of slots, each mapping a (row, column) grid
//! index to a world transform on the drum surface (row = angular offset,
//! column = position along the drum axis). Slots hold at most one item and
//! are physically recycled as the drum rotates, so a slot's index matches a
//! logical level row only for the initially materialized window.

use glam::Vec3;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::assets::AssetRegistry;
use super::item::{EGG_COLORS, Item, ItemKind};
use super::level::{LevelCell, LevelGrid, WorldLevel};
use crate::consts::*;
use crate::ring_point;

/// One anchor slot: a pre-computed transform plus 0 or 1 attached item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceholderSlot {
    /// Angular offset of this slot's row around the drum
    pub angle: f32,
    /// Axial position of this slot's column
    pub axial: f32,
    pub item: Option<Item>,
}

/// The full 2D slot array
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceholderRing {
    rows: usize,
    cols: usize,
    radius: f32,
    /// Row-major: slot (row, col) lives at `row * cols + col`
    slots: Vec<PlaceholderSlot>,
}

impl Default for PlaceholderRing {
    fn default() -> Self {
        Self::new(RING_ROWS, RING_COLS, RING_RADIUS)
    }
}

impl PlaceholderRing {
    pub fn new(rows: usize, cols: usize, radius: f32) -> Self {
        let row_step = std::f32::consts::TAU / rows as f32;
        let slots = (0..rows * cols)
            .map(|i| PlaceholderSlot {
                angle: RING_PHASE + (i / cols) as f32 * row_step,
                axial: RING_COL_ORIGIN + (i % cols) as f32 * RING_COL_SPACING,
                item: None,
            })
            .collect();
        Self {
            rows,
            cols,
            radius,
            slots,
        }
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    fn index(&self, row: usize, col: usize) -> usize {
        debug_assert!(row < self.rows && col < self.cols);
        row * self.cols + col
    }

    /// World position of a slot for the current drum rotation
    pub fn slot_position(&self, row: usize, col: usize, drum_angle: f32) -> Vec3 {
        let slot = &self.slots[self.index(row, col)];
        ring_point(self.radius, slot.angle + drum_angle, slot.axial)
    }

    pub fn item_at(&self, row: usize, col: usize) -> Option<&Item> {
        self.slots[self.index(row, col)].item.as_ref()
    }

    /// Detach the slot's item, if any
    pub fn take_item(&mut self, row: usize, col: usize) -> Option<Item> {
        let index = self.index(row, col);
        self.slots[index].item.take()
    }

    /// Occupied slots in row-major order
    pub fn occupied(&self) -> impl Iterator<Item = (usize, usize, &Item)> {
        self.slots.iter().enumerate().filter_map(|(i, slot)| {
            slot.item
                .as_ref()
                .map(|item| (i / self.cols, i % self.cols, item))
        })
    }

    /// Mutable access to every attached item (animation ticking)
    pub fn items_mut(&mut self) -> impl Iterator<Item = &mut Item> {
        self.slots.iter_mut().filter_map(|s| s.item.as_mut())
    }

    pub fn occupied_count(&self) -> usize {
        self.slots.iter().filter(|s| s.item.is_some()).count()
    }

    /// Detach every attached item (used by the registry-driven bulk clear)
    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            slot.item = None;
        }
    }

    /// Materialize the grid window `[from, to)` into slots, starting at
    /// physical row 0.
    ///
    /// Every slot in the window detaches and unregisters whatever it held
    /// before a new item is attached; slots past the end of the window keep
    /// their stale contents and are recycled on the next wrap.
    ///
    /// Panics if the window is wider than the ring has rows - that is a
    /// configuration error, not a truncation opportunity.
    pub fn materialize(
        &mut self,
        grid: &LevelGrid,
        from: usize,
        to: usize,
        level: &mut WorldLevel,
        assets: &AssetRegistry,
        rng: &mut Pcg32,
        next_id: &mut u32,
    ) {
        assert!(
            to.saturating_sub(from) <= self.rows,
            "window {from}..{to} wider than placeholder ring ({} rows)",
            self.rows
        );

        let window = grid.window(from, to);
        for (row, cells) in window.iter().enumerate() {
            for (col, &cell) in cells.iter().enumerate() {
                let index = self.index(row, col);

                // Detach before attach, or recycled slots leak items
                if let Some(old) = self.slots[index].item.take() {
                    if old.kind.is_collectable() {
                        level.consume_collectable(old.id);
                    } else {
                        level.remove_obstacle(old.id);
                    }
                }

                let kind = match cell {
                    LevelCell::Empty => continue,
                    LevelCell::Collectable => ItemKind::Egg,
                    LevelCell::Obstacle => ItemKind::Obstacle,
                    LevelCell::Bonus => ItemKind::Carrot,
                };

                let id = *next_id;
                *next_id += 1;
                let color = match kind {
                    ItemKind::Egg => rng.random_range(0..EGG_COLORS as u32),
                    _ => 0,
                };
                level.register(id, kind.is_collectable());
                self.slots[index].item = Some(Item::new(id, kind, color, assets.require(kind)));
            }
        }
    }
}
