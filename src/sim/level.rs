//! Level track content and level-lifecycle state
//!
//! A level is a grid of cell kinds, four columns wide, windowed onto the
//! placeholder ring a slice of rows at a time. Grids come from the authored
//! table or from a weighted random draw; either way a row is immutable until
//! the grid is regenerated on level-up or replaced on reset.

use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::{RING_COLS, SPEED_PER_LEVEL};

/// Content of one grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LevelCell {
    #[default]
    Empty,
    /// Score collectable (egg)
    Collectable,
    /// Damaging obstacle
    Obstacle,
    /// Heal collectable (carrot)
    Bonus,
}

impl LevelCell {
    /// Draw one cell from a single uniform sample using cumulative
    /// weight buckets: 40% empty, 40% collectable, 17% obstacle, 3% bonus.
    pub fn draw(rng: &mut Pcg32) -> Self {
        let sample: f32 = rng.random();
        if sample < 0.40 {
            LevelCell::Empty
        } else if sample < 0.80 {
            LevelCell::Collectable
        } else if sample < 0.97 {
            LevelCell::Obstacle
        } else {
            LevelCell::Bonus
        }
    }
}

/// One row of cells, always exactly as wide as the placeholder ring
pub type LevelRow = [LevelCell; RING_COLS];

/// Ordered sequence of level rows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelGrid {
    rows: Vec<LevelRow>,
}

impl LevelGrid {
    /// The hand-authored egg course (E = empty, C = egg, O = obstacle,
    /// B = carrot).
    pub fn authored() -> Self {
        use LevelCell::{Bonus as B, Collectable as C, Empty as E, Obstacle as O};
        Self {
            rows: vec![
                [E, E, C, E],
                [E, C, E, C],
                [C, O, E, O],
                [E, C, E, E],
                [E, E, C, E],
                [E, E, C, E],
                [E, E, C, O],
                [E, C, C, O],
                [E, C, E, E],
                [C, E, E, E],
                [C, C, E, E],
                [C, C, C, E],
                [C, C, E, E],
                [C, E, E, B],
                [C, C, E, E],
                [C, C, C, E],
                [C, C, E, E],
                [C, E, E, E],
                [E, E, E, E],
            ],
        }
    }

    /// Weighted-random grid of `rows` rows
    pub fn generate(rng: &mut Pcg32, rows: usize) -> Self {
        Self {
            rows: (0..rows)
                .map(|_| std::array::from_fn(|_| LevelCell::draw(rng)))
                .collect(),
        }
    }

    /// Grid with no rows (every window over it is empty)
    pub fn empty() -> Self {
        Self { rows: Vec::new() }
    }

    /// Grid over caller-supplied rows (custom courses, tests)
    pub fn from_rows(rows: Vec<LevelRow>) -> Self {
        Self { rows }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Contiguous row slice `[from, to)`, stopping early when the grid is
    /// exhausted. Never errors and never pads with synthetic rows.
    pub fn window(&self, from: usize, to: usize) -> &[LevelRow] {
        let from = from.min(self.rows.len());
        let to = to.clamp(from, self.rows.len());
        &self.rows[from..to]
    }
}

/// Level number, scroll speed and the authoritative item registries
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldLevel {
    pub level_number: u32,
    /// Scroll speed multiplier applied to the drum rotation
    pub speed: f32,
    /// Ids of live collectable items in the active window
    pub collectables: Vec<u32>,
    /// Ids of live obstacle items in the active window
    pub obstacles: Vec<u32>,
}

impl Default for WorldLevel {
    fn default() -> Self {
        Self {
            level_number: 1,
            speed: 1.0,
            collectables: Vec::new(),
            obstacles: Vec::new(),
        }
    }
}

impl WorldLevel {
    /// Advance difficulty after the last collectable was consumed
    pub fn level_up(&mut self) {
        self.level_number += 1;
        self.speed += SPEED_PER_LEVEL;
    }

    /// Back to level 1 at base speed
    pub fn reset(&mut self) {
        self.level_number = 1;
        self.speed = 1.0;
    }

    /// Drop every registered item id (registry-driven bulk clear)
    pub fn clear_registries(&mut self) {
        self.collectables.clear();
        self.obstacles.clear();
    }

    pub fn register(&mut self, id: u32, collectable: bool) {
        if collectable {
            self.collectables.push(id);
        } else {
            self.obstacles.push(id);
        }
    }

    /// Remove a consumed collectable; true if it was the last one
    pub fn consume_collectable(&mut self, id: u32) -> bool {
        self.collectables.retain(|&c| c != id);
        self.collectables.is_empty()
    }

    pub fn remove_obstacle(&mut self, id: u32) {
        self.obstacles.retain(|&o| o != id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_window_on_empty_grid() {
        let grid = LevelGrid::empty();
        assert!(grid.window(0, 18).is_empty());
    }

    #[test]
    fn test_window_stops_at_grid_end() {
        let grid = LevelGrid::authored();
        assert_eq!(grid.row_count(), 19);
        assert_eq!(grid.window(0, 25).len(), 19);
        assert_eq!(grid.window(0, 18).len(), 18);
        assert_eq!(grid.window(10, 12).len(), 2);
        assert!(grid.window(19, 25).is_empty());
        // Inverted ranges collapse instead of panicking
        assert!(grid.window(5, 2).is_empty());
    }

    #[test]
    fn test_authored_first_rows() {
        let grid = LevelGrid::authored();
        assert_eq!(grid.window(0, 1)[0][2], LevelCell::Collectable);
        assert_eq!(grid.window(2, 3)[0][1], LevelCell::Obstacle);
        assert_eq!(grid.window(13, 14)[0][3], LevelCell::Bonus);
    }

    #[test]
    fn test_generated_shape_and_determinism() {
        let mut a = Pcg32::seed_from_u64(7);
        let mut b = Pcg32::seed_from_u64(7);
        let grid_a = LevelGrid::generate(&mut a, 30);
        let grid_b = LevelGrid::generate(&mut b, 30);
        assert_eq!(grid_a.row_count(), 30);
        assert_eq!(grid_a, grid_b);
    }

    #[test]
    fn test_generated_weights_roughly_hold() {
        let mut rng = Pcg32::seed_from_u64(42);
        let grid = LevelGrid::generate(&mut rng, 2000);
        let cells: Vec<_> = grid.window(0, 2000).iter().flatten().copied().collect();
        let count = |kind| cells.iter().filter(|&&c| c == kind).count() as f32;
        let total = cells.len() as f32;
        assert!((count(LevelCell::Empty) / total - 0.40).abs() < 0.03);
        assert!((count(LevelCell::Collectable) / total - 0.40).abs() < 0.03);
        assert!((count(LevelCell::Obstacle) / total - 0.17).abs() < 0.03);
        assert!((count(LevelCell::Bonus) / total - 0.03).abs() < 0.02);
    }

    #[test]
    fn test_level_up_and_reset() {
        let mut level = WorldLevel::default();
        level.level_up();
        level.level_up();
        assert_eq!(level.level_number, 3);
        assert!((level.speed - 2.0).abs() < 1e-6);
        level.reset();
        assert_eq!(level.level_number, 1);
        assert!((level.speed - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_consume_collectable_reports_last() {
        let mut level = WorldLevel::default();
        level.register(1, true);
        level.register(2, true);
        level.register(9, false);
        assert!(!level.consume_collectable(1));
        assert!(level.consume_collectable(2));
        level.remove_obstacle(9);
        assert!(level.obstacles.is_empty());
    }
}
