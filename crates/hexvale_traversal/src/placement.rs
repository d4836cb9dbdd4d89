//! # Structure Placement
//!
//! Finds legal spots for ladders and bridges around a tile and turns a
//! chosen spot into overlay records.
//!
//! Planning and inserting are split so a shared world can insert a whole
//! bridge span under one write lock.

use hexvale_procedural::{hex_distance, TileCoord};
use tracing::debug;

use crate::error::{TraversalError, TraversalResult};
use crate::structure::Structure;
use crate::world::HexWorld;

/// Smallest height difference worth a ladder (anything less is walkable).
pub const MIN_LADDER_RISE: u32 = 2;

/// Largest height difference a ladder can span.
pub const MAX_LADDER_RISE: u32 = 4;

/// Tiles past the first water tile a bridge may reach looking for land.
pub const MAX_BRIDGE_REACH: i32 = 5;

/// A place a bridge could start from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BridgeSpot {
    /// Bank the bridge is built from.
    pub from: TileCoord,
    /// Adjacent water tile the span starts over.
    pub across: TileCoord,
}

fn require_inside(world: &HexWorld, at: TileCoord) -> TraversalResult<()> {
    if world.is_inside(at.q, at.r) {
        Ok(())
    } else {
        Err(TraversalError::StructureOutOfBoard { q: at.q, r: at.r })
    }
}

/// Ladders that could be built from `at` to an adjacent tile.
///
/// A neighbor qualifies when its terrain height differs from the surface
/// height at `at` by 2 to 4 layers. Each ladder runs from the lower tile
/// to the higher one.
///
/// # Errors
///
/// Returns [`TraversalError::StructureOutOfBoard`] if `at` is off the board.
pub fn ladder_spots(world: &HexWorld, at: TileCoord) -> TraversalResult<Vec<Structure>> {
    require_inside(world, at)?;
    let Some(current) = world.get_height(at.q, at.r) else {
        return Ok(Vec::new());
    };

    let spots = at
        .neighbors()
        .filter_map(|n| world.raw_height(n.q, n.r).map(|h| (n, h)))
        .filter(|&(_, h)| (MIN_LADDER_RISE..=MAX_LADDER_RISE).contains(&h.abs_diff(current)))
        .map(|(n, h)| {
            if current < h {
                Structure::Ladder { from: at, to: n }
            } else {
                Structure::Ladder { from: n, to: at }
            }
        })
        .collect();
    Ok(spots)
}

/// Bridges that could be started from `at`.
///
/// Only dry ground or an existing bridge can start a span, and only over
/// adjacent water.
///
/// # Errors
///
/// Returns [`TraversalError::StructureOutOfBoard`] if `at` is off the board.
pub fn bridge_spots(world: &HexWorld, at: TileCoord) -> TraversalResult<Vec<BridgeSpot>> {
    require_inside(world, at)?;
    let board = world.board();
    let standing = !board.is_water(at.q, at.r) || world.structures().is_bridge(at);
    if !standing {
        return Ok(Vec::new());
    }

    Ok(at
        .neighbors()
        .filter(|n| board.is_water(n.q, n.r))
        .map(|across| BridgeSpot { from: at, across })
        .collect())
}

/// Records for a ladder between `from` and `to`, one at each endpoint.
///
/// # Errors
///
/// Returns [`TraversalError::StructureOutOfBoard`] if either end is off the board.
pub fn plan_ladder(
    world: &HexWorld,
    from: TileCoord,
    to: TileCoord,
) -> TraversalResult<Vec<(TileCoord, Structure)>> {
    require_inside(world, from)?;
    require_inside(world, to)?;
    let ladder = Structure::Ladder { from, to };
    Ok(vec![(to, ladder), (from, ladder)])
}

/// Records for a bridge from the bank `from` over the water tile `across`.
///
/// Walks up to [`MAX_BRIDGE_REACH`] tiles past `across`, in the direction
/// `from -> across`, looking for dry land. With a landing, every water tile
/// between `from` and it gets a record; without one the bridge covers
/// `across` alone and its `to` is `across`.
///
/// # Errors
///
/// Returns [`TraversalError::StructureOutOfBoard`] if `from` or `across` is
/// off the board.
pub fn plan_bridge(
    world: &HexWorld,
    from: TileCoord,
    across: TileCoord,
) -> TraversalResult<Vec<(TileCoord, Structure)>> {
    require_inside(world, from)?;
    require_inside(world, across)?;
    let board = world.board();
    let (dq, dr) = (across.q - from.q, across.r - from.r);

    let landing = (1..=MAX_BRIDGE_REACH)
        .map(|i| across.offset(dq * i, dr * i))
        .find(|t| board.is_inside(t.q, t.r) && !board.is_water(t.q, t.r));

    let Some(to) = landing else {
        let record = Structure::Bridge {
            from,
            across,
            to: across,
        };
        return Ok(vec![(across, record)]);
    };

    let record = Structure::Bridge { from, across, to };
    let steps = hex_distance(from, to) as i32;
    let span = (1..steps)
        .map(|i| from.offset(dq * i, dr * i))
        .filter(|t| board.is_water(t.q, t.r))
        .map(|t| (t, record))
        .collect();
    Ok(span)
}

/// Builds a ladder. Returns the record stored.
///
/// # Errors
///
/// As [`plan_ladder`].
pub fn place_ladder(
    world: &mut HexWorld,
    from: TileCoord,
    to: TileCoord,
) -> TraversalResult<Structure> {
    let records = plan_ladder(world, from, to)?;
    world.add_structures(&records);
    debug!(?from, ?to, "ladder placed");
    Ok(Structure::Ladder { from, to })
}

/// Builds a bridge. Returns the tiles it now covers.
///
/// # Errors
///
/// As [`plan_bridge`].
pub fn place_bridge(
    world: &mut HexWorld,
    from: TileCoord,
    across: TileCoord,
) -> TraversalResult<Vec<TileCoord>> {
    let records = plan_bridge(world, from, across)?;
    world.add_structures(&records);
    let tiles: Vec<_> = records.iter().map(|&(at, _)| at).collect();
    debug!(?from, ?across, tiles = tiles.len(), "bridge placed");
    Ok(tiles)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hexvale_procedural::{BlockType, HexBoard};

    /// Radius-4 board at height 3 with water down the given columns.
    fn channel_world_with(columns: &[i32]) -> HexWorld {
        let mut board = HexBoard::new(4, 10);
        for t in board.tiles().collect::<Vec<_>>() {
            board.set_height(t.q, t.r, 3);
            if columns.contains(&t.q) {
                board.set_height(t.q, t.r, 0);
                board.set_block(t.q, t.r, BlockType::Water);
            }
        }
        HexWorld::new(board)
    }

    fn channel_world() -> HexWorld {
        channel_world_with(&[4])
    }

    #[test]
    fn test_ladder_spots_orientation() {
        let mut world = channel_world();
        let at = TileCoord::new(2, 4);
        world.set_height(3, 4, 6);
        world.set_height(1, 4, 0);
        world.set_height(2, 5, 8);

        let spots = ladder_spots(&world, at).unwrap();
        assert!(spots.contains(&Structure::Ladder {
            from: at,
            to: TileCoord::new(3, 4)
        }));
        assert!(spots.contains(&Structure::Ladder {
            from: TileCoord::new(1, 4),
            to: at
        }));
        // A rise of 5 is too tall
        assert_eq!(spots.len(), 2);
    }

    #[test]
    fn test_bridge_spots_need_dry_footing() {
        let world = channel_world();
        let spots = bridge_spots(&world, TileCoord::new(3, 4)).unwrap();
        assert!(spots.contains(&BridgeSpot {
            from: TileCoord::new(3, 4),
            across: TileCoord::new(4, 4)
        }));
        assert!(spots.iter().all(|s| s.across.q == 4));

        assert!(bridge_spots(&world, TileCoord::new(4, 4)).unwrap().is_empty());
        assert!(bridge_spots(&world, TileCoord::new(0, 0)).is_err());
    }

    #[test]
    fn test_bridge_finds_landing() {
        let mut world = channel_world();
        let from = TileCoord::new(3, 4);
        let across = TileCoord::new(4, 4);
        let covered = place_bridge(&mut world, from, across).unwrap();

        assert_eq!(covered, vec![across]);
        assert_eq!(
            world.get_structure(4, 4),
            Some(&Structure::Bridge {
                from,
                across,
                to: TileCoord::new(5, 4)
            })
        );
        assert_eq!(world.get_height(4, 4), Some(3));
        assert!(world.get_structure(5, 4).is_none());
    }

    #[test]
    fn test_wide_water_spans_every_tile() {
        let mut world = channel_world_with(&[4, 5]);
        let from = TileCoord::new(3, 4);
        let covered = place_bridge(&mut world, from, TileCoord::new(4, 4)).unwrap();
        assert_eq!(covered, vec![TileCoord::new(4, 4), TileCoord::new(5, 4)]);
    }

    #[test]
    fn test_bridge_without_landing() {
        let mut board = HexBoard::new(3, 10);
        for t in board.tiles().collect::<Vec<_>>() {
            if t.q > 3 {
                board.set_block(t.q, t.r, BlockType::Water);
            }
        }
        let mut world = HexWorld::new(board);
        let from = TileCoord::new(3, 3);
        let across = TileCoord::new(4, 3);
        let covered = place_bridge(&mut world, from, across).unwrap();

        assert_eq!(covered, vec![across]);
        assert_eq!(
            world.get_structure(4, 3),
            Some(&Structure::Bridge {
                from,
                across,
                to: across
            })
        );
    }

    #[test]
    fn test_ladder_stored_at_both_ends() {
        let mut world = channel_world();
        let from = TileCoord::new(2, 2);
        let to = TileCoord::new(2, 3);
        place_ladder(&mut world, from, to).unwrap();
        assert!(world.get_structure(2, 2).is_some_and(Structure::is_ladder));
        assert!(world.get_structure(2, 3).is_some_and(Structure::is_ladder));
        assert!(place_ladder(&mut world, from, TileCoord::new(-1, 0)).is_err());
    }
}
