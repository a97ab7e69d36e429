//! Asset-id registry
//!
//! Items never hold model data; they carry an opaque `AssetId` resolved here
//! once, at grid-build time. The presentation layer loads whatever these ids
//! point at on its own schedule - a pending load never blocks the sim.

use serde::{Deserialize, Serialize};

use super::item::ItemKind;

/// Opaque handle into the embedder's asset store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetId(pub u32);

/// Item-kind to asset-id table, supplied to the world at startup
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssetRegistry {
    egg: Option<AssetId>,
    carrot: Option<AssetId>,
    obstacle: Option<AssetId>,
}

impl AssetRegistry {
    pub fn insert(&mut self, kind: ItemKind, id: AssetId) {
        match kind {
            ItemKind::Egg => self.egg = Some(id),
            ItemKind::Carrot => self.carrot = Some(id),
            ItemKind::Obstacle => self.obstacle = Some(id),
        }
    }

    pub fn get(&self, kind: ItemKind) -> Option<AssetId> {
        match kind {
            ItemKind::Egg => self.egg,
            ItemKind::Carrot => self.carrot,
            ItemKind::Obstacle => self.obstacle,
        }
    }

    /// Fail-fast lookup used at grid-build time: a missing entry is a
    /// configuration error, not a runtime condition.
    pub fn require(&self, kind: ItemKind) -> AssetId {
        match self.get(kind) {
            Some(id) => id,
            None => panic!("no asset registered for {kind:?}"),
        }
    }

    /// Registry with one id per item kind
    pub fn with_defaults() -> Self {
        let mut registry = Self::default();
        registry.insert(ItemKind::Egg, AssetId(0));
        registry.insert(ItemKind::Carrot, AssetId(1));
        registry.insert(ItemKind::Obstacle, AssetId(2));
        registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup() {
        let registry = AssetRegistry::with_defaults();
        assert_eq!(registry.require(ItemKind::Carrot), AssetId(1));
        assert_eq!(registry.get(ItemKind::Obstacle), Some(AssetId(2)));
    }

    #[test]
    #[should_panic(expected = "no asset registered")]
    fn test_missing_asset_fails_fast() {
        let registry = AssetRegistry::default();
        registry.require(ItemKind::Egg);
    }
}
