//! # Shared World
//!
//! A [`HexWorld`] behind an `Arc<RwLock<_>>` for hosts that query paths
//! from several threads while a builder thread places structures.
//!
//! Path queries and height reads take the read lock. Every multi-tile edit
//! (a bridge span, a ladder's two records) is inserted under a single write
//! lock, so a reader sees all of it or none of it.

use std::sync::Arc;

use hexvale_procedural::TileCoord;
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::debug;

use crate::error::TraversalResult;
use crate::placement;
use crate::structure::Structure;
use crate::world::HexWorld;

/// Cloneable, thread-safe handle to one world.
#[derive(Clone, Debug)]
pub struct SharedWorld {
    inner: Arc<RwLock<HexWorld>>,
}

impl SharedWorld {
    /// Wraps a world for shared access.
    #[must_use]
    pub fn new(world: HexWorld) -> Self {
        Self {
            inner: Arc::new(RwLock::new(world)),
        }
    }

    /// Read access for several queries against one consistent state.
    pub fn read(&self) -> RwLockReadGuard<'_, HexWorld> {
        self.inner.read()
    }

    /// Exclusive access for compound edits.
    pub fn write(&self) -> RwLockWriteGuard<'_, HexWorld> {
        self.inner.write()
    }

    /// Surface height, see [`HexWorld::get_height`].
    #[must_use]
    pub fn get_height(&self, q: i32, r: i32) -> Option<u32> {
        self.inner.read().get_height(q, r)
    }

    /// Copy of the structure record at `(q, r)`.
    #[must_use]
    pub fn get_structure(&self, q: i32, r: i32) -> Option<Structure> {
        self.inner.read().get_structure(q, r).copied()
    }

    /// Path query under the read lock, see [`HexWorld::find_path`].
    ///
    /// # Errors
    ///
    /// As [`HexWorld::find_path`].
    pub fn find_path(
        &self,
        start: TileCoord,
        goal: TileCoord,
    ) -> TraversalResult<Option<Vec<TileCoord>>> {
        self.inner.read().find_path(start, goal)
    }

    /// Inserts every record under one write lock.
    pub fn place_structures(&self, records: &[(TileCoord, Structure)]) {
        let mut world = self.inner.write();
        world.add_structures(records);
        debug!(records = records.len(), "structures placed");
    }

    /// Builds a ladder atomically, see [`placement::place_ladder`].
    ///
    /// # Errors
    ///
    /// As [`placement::place_ladder`].
    pub fn place_ladder(&self, from: TileCoord, to: TileCoord) -> TraversalResult<Structure> {
        placement::place_ladder(&mut self.inner.write(), from, to)
    }

    /// Builds a bridge atomically, see [`placement::place_bridge`].
    ///
    /// # Errors
    ///
    /// As [`placement::place_bridge`].
    pub fn place_bridge(
        &self,
        from: TileCoord,
        across: TileCoord,
    ) -> TraversalResult<Vec<TileCoord>> {
        placement::place_bridge(&mut self.inner.write(), from, across)
    }

    /// One harvest action as a single read-modify-write.
    ///
    /// # Errors
    ///
    /// As [`HexWorld::harvest`].
    pub fn harvest(&self, q: i32, r: i32) -> TraversalResult<u32> {
        self.inner.write().harvest(q, r)
    }

    /// Clones the current state out of the lock.
    #[must_use]
    pub fn snapshot(&self) -> HexWorld {
        self.inner.read().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hexvale_procedural::{Feature, FeatureKind, HexBoard};

    #[test]
    fn test_concurrent_harvest_counts_each_unit_once() {
        let mut board = HexBoard::new(2, 5);
        board.set_feature(2, 2, Feature::new(FeatureKind::DarkForest, 40));
        let shared = SharedWorld::new(HexWorld::new(board));

        let successes: usize = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|_| {
                    let shared = shared.clone();
                    scope.spawn(move || (0..10).filter(|_| shared.harvest(2, 2).is_ok()).count())
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).sum()
        });

        assert_eq!(successes, 40);
        assert_eq!(
            shared.read().board().feature(2, 2),
            Some(Feature::NONE)
        );
    }

    #[test]
    fn test_place_structures_is_visible_to_readers() {
        let shared = SharedWorld::new(HexWorld::new(HexBoard::new(3, 5)));
        let ladder = Structure::Ladder {
            from: TileCoord::new(3, 3),
            to: TileCoord::new(4, 3),
        };
        shared.place_structures(&[(TileCoord::new(3, 3), ladder), (TileCoord::new(4, 3), ladder)]);

        assert_eq!(shared.get_structure(3, 3), Some(ladder));
        assert_eq!(shared.snapshot().structures().len(), 2);
    }
}
