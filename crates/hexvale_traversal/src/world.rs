//! # Hex World
//!
//! A generated board plus its structure overlay: the surface every
//! traversal query runs against.

use hexvale_procedural::{HexBoard, Terrain, TileCoord};
use tracing::debug;

use crate::error::{TraversalError, TraversalResult};
use crate::pathfinder;
use crate::structure::{Structure, StructureOverlay};

/// Board grids and player structures.
#[derive(Clone, Debug, PartialEq)]
pub struct HexWorld {
    board: HexBoard,
    structures: StructureOverlay,
}

impl HexWorld {
    /// Wraps a board with an empty overlay.
    #[must_use]
    pub fn new(board: HexBoard) -> Self {
        Self {
            board,
            structures: StructureOverlay::new(),
        }
    }

    /// Wraps a generated terrain's grids.
    #[must_use]
    pub fn from_terrain(terrain: Terrain) -> Self {
        Self::new(terrain.into_board())
    }

    /// The terrain grids.
    #[inline]
    #[must_use]
    pub const fn board(&self) -> &HexBoard {
        &self.board
    }

    /// The structure overlay.
    #[inline]
    #[must_use]
    pub const fn structures(&self) -> &StructureOverlay {
        &self.structures
    }

    /// Whether `(q, r)` is part of the board.
    #[inline]
    #[must_use]
    pub const fn is_inside(&self, q: i32, r: i32) -> bool {
        self.board.is_inside(q, r)
    }

    /// Surface height of a tile, or `None` for "no terrain".
    ///
    /// A bridge tile stands at the height of the bank it was built from,
    /// not at the water below it.
    #[must_use]
    pub fn get_height(&self, q: i32, r: i32) -> Option<u32> {
        let mut at = TileCoord::new(q, r);
        // Bridges built off other bridges chain back to a bank; the cap
        // guards against hand-built cycles
        for _ in 0..=self.structures.len() {
            match self.structures.get(at) {
                Some(Structure::Bridge { from, .. }) if *from != at => at = *from,
                _ => return self.board.height(at.q, at.r),
            }
        }
        self.board.height(at.q, at.r)
    }

    /// Terrain height ignoring structures.
    #[inline]
    #[must_use]
    pub fn raw_height(&self, q: i32, r: i32) -> Option<u32> {
        self.board.height(q, r)
    }

    /// Stores a structure record at `(q, r)`, replacing any existing one.
    ///
    /// No terrain validation happens here.
    pub fn add_structure(&mut self, q: i32, r: i32, record: Structure) -> Option<Structure> {
        debug!(q, r, ?record, "structure added");
        self.structures.add(TileCoord::new(q, r), record)
    }

    /// The structure record at `(q, r)`.
    #[inline]
    #[must_use]
    pub fn get_structure(&self, q: i32, r: i32) -> Option<&Structure> {
        self.structures.get(TileCoord::new(q, r))
    }

    /// Removes the structure record at `(q, r)`.
    pub fn remove_structure(&mut self, q: i32, r: i32) -> Option<Structure> {
        self.structures.remove(TileCoord::new(q, r))
    }

    /// Removes every structure.
    pub fn clear_structures(&mut self) {
        self.structures.clear();
    }

    /// Inserts several records in order.
    pub fn add_structures(&mut self, records: &[(TileCoord, Structure)]) {
        for &(at, record) in records {
            self.add_structure(at.q, at.r, record);
        }
    }

    /// Raises or lowers a tile, for scripted edits and tests.
    pub fn set_height(&mut self, q: i32, r: i32, height: u32) {
        self.board.set_height(q, r, height);
    }

    /// Shortest walkable route from `start` to `goal`, both inclusive.
    ///
    /// See [`pathfinder::find_path`].
    ///
    /// # Errors
    ///
    /// Returns [`TraversalError::OutOfBoard`] if either endpoint is off the board.
    pub fn find_path(
        &self,
        start: TileCoord,
        goal: TileCoord,
    ) -> TraversalResult<Option<Vec<TileCoord>>> {
        pathfinder::find_path(self, start, goal)
    }

    /// Takes one resource unit from a forest tile, returning what is left.
    ///
    /// # Errors
    ///
    /// [`TraversalError::OutOfBoard`] off the board,
    /// [`TraversalError::NothingToHarvest`] when the tile has no resource.
    pub fn harvest(&mut self, q: i32, r: i32) -> TraversalResult<u32> {
        if !self.is_inside(q, r) {
            return Err(TraversalError::OutOfBoard { q, r });
        }
        let left = self
            .board
            .harvest(q, r)
            .ok_or(TraversalError::NothingToHarvest { q, r })?;
        debug!(q, r, left, "harvested");
        Ok(left)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hexvale_procedural::{Feature, FeatureKind};

    fn flat_world() -> HexWorld {
        let mut board = HexBoard::new(4, 10);
        for t in board.tiles().collect::<Vec<_>>() {
            board.set_height(t.q, t.r, 3);
        }
        HexWorld::new(board)
    }

    #[test]
    fn test_out_of_board_height_is_none() {
        let world = flat_world();
        assert_eq!(world.get_height(4, 4), Some(3));
        assert_eq!(world.get_height(0, 0), None);
        assert_eq!(world.get_height(-1, 4), None);
        assert_eq!(world.get_height(20, 4), None);
    }

    #[test]
    fn test_bridge_reports_bank_height() {
        let mut world = flat_world();
        world.set_height(4, 4, 0);
        world.set_height(3, 4, 5);

        let bridge = Structure::Bridge {
            from: TileCoord::new(3, 4),
            across: TileCoord::new(4, 4),
            to: TileCoord::new(5, 4),
        };
        world.add_structure(4, 4, bridge);

        assert_eq!(world.get_height(4, 4), Some(5));
        assert_eq!(world.raw_height(4, 4), Some(0));
    }

    #[test]
    fn test_self_referencing_bridge_terminates() {
        let mut world = flat_world();
        let at = TileCoord::new(4, 4);
        let bridge = Structure::Bridge {
            from: TileCoord::new(5, 4),
            across: at,
            to: at,
        };
        let back = Structure::Bridge {
            from: at,
            across: TileCoord::new(5, 4),
            to: TileCoord::new(5, 4),
        };
        world.add_structure(4, 4, bridge);
        world.add_structure(5, 4, back);
        assert_eq!(world.get_height(4, 4), Some(3));
    }

    #[test]
    fn test_removing_bridge_restores_water_height() {
        let mut world = flat_world();
        world.set_height(4, 4, 0);
        let bridge = Structure::Bridge {
            from: TileCoord::new(3, 4),
            across: TileCoord::new(4, 4),
            to: TileCoord::new(5, 4),
        };
        world.add_structure(4, 4, bridge);
        assert_eq!(world.get_height(4, 4), Some(3));

        assert_eq!(world.remove_structure(4, 4), Some(bridge));
        assert_eq!(world.get_height(4, 4), Some(0));
        assert_eq!(world.remove_structure(4, 4), None);
    }

    #[test]
    fn test_harvest_errors() {
        let mut board = HexBoard::new(2, 5);
        board.set_feature(2, 2, Feature::new(FeatureKind::Forest, 1));
        let mut world = HexWorld::new(board);

        assert_eq!(world.harvest(2, 2), Ok(0));
        assert_eq!(
            world.harvest(2, 2),
            Err(TraversalError::NothingToHarvest { q: 2, r: 2 })
        );
        assert_eq!(
            world.harvest(0, 0),
            Err(TraversalError::OutOfBoard { q: 0, r: 0 })
        );
    }
}
