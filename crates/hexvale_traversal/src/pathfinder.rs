//! # Traversal Pathfinder
//!
//! A* over the six-neighbor hex graph. Steps cost 1; a ladder adds one
//! extra edge between its endpoints costing their hex distance, so the
//! hex-distance heuristic stays admissible.
//!
//! A step `cur -> next` is passable when `next` is on the board and either:
//! - a ladder record joins exactly these two tiles
//! - both tiles carry bridge records
//! - otherwise the height rule holds: climb at most 1, drop at most 2,
//!   comparing surface heights (bridge tiles stand at their bank)
//!
//! Ties in `f` go to the node queued first, so identical queries return
//! identical paths.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};

use hexvale_procedural::{hex_distance, TileCoord};
use tracing::trace;

use crate::error::{TraversalError, TraversalResult};
use crate::world::HexWorld;

/// Highest single-step climb without a structure.
pub const MAX_CLIMB: u32 = 1;

/// Deepest single-step drop without a structure.
pub const MAX_DROP: u32 = 2;

/// Open-set entry.
#[derive(Clone, Copy, Debug)]
struct PathNode {
    coord: TileCoord,
    g: u32,
    f: u32,
    seq: u64,
}

impl PartialEq for PathNode {
    fn eq(&self, other: &Self) -> bool {
        self.f == other.f && self.seq == other.seq
    }
}

impl Eq for PathNode {}

impl PartialOrd for PathNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PathNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed for a min-heap on (f, seq)
        other
            .f
            .cmp(&self.f)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Whether a single step from `from` to `to` is allowed.
///
/// Does not require the tiles to be adjacent; the pathfinder only asks
/// about neighbors and ladder partners.
#[must_use]
pub fn can_traverse(world: &HexWorld, from: TileCoord, to: TileCoord) -> bool {
    if !world.is_inside(to.q, to.r) {
        return false;
    }

    let structures = world.structures();
    if structures.ladder_links(from, to) {
        return true;
    }
    let at_from = structures.get(from);
    let at_to = structures.get(to);
    if at_to.is_some_and(|s| s.is_bridge()) && at_from.is_some_and(|s| s.is_bridge()) {
        return true;
    }

    // Raw sentinel check; the comparison itself uses surface heights
    if world.raw_height(to.q, to.r).is_none() {
        return false;
    }
    let (Some(current), Some(next)) = (
        world.get_height(from.q, from.r),
        world.get_height(to.q, to.r),
    ) else {
        return false;
    };

    if next > current {
        next - current <= MAX_CLIMB
    } else {
        current - next <= MAX_DROP
    }
}

/// Shortest walkable route from `start` to `goal`, both endpoints included.
///
/// Returns `Ok(Some(vec![]))` when `start == goal` and `Ok(None)` when the
/// goal is unreachable.
///
/// # Errors
///
/// Returns [`TraversalError::OutOfBoard`] if `start` or `goal` is not on
/// the board.
pub fn find_path(
    world: &HexWorld,
    start: TileCoord,
    goal: TileCoord,
) -> TraversalResult<Option<Vec<TileCoord>>> {
    for tile in [start, goal] {
        if !world.is_inside(tile.q, tile.r) {
            return Err(TraversalError::OutOfBoard {
                q: tile.q,
                r: tile.r,
            });
        }
    }
    if start == goal {
        return Ok(Some(Vec::new()));
    }

    let mut open = BinaryHeap::new();
    let mut g_score: HashMap<TileCoord, u32> = HashMap::new();
    let mut came_from: HashMap<TileCoord, TileCoord> = HashMap::new();
    let mut closed: HashSet<TileCoord> = HashSet::new();
    let mut seq = 0u64;
    let mut expanded = 0usize;

    g_score.insert(start, 0);
    open.push(PathNode {
        coord: start,
        g: 0,
        f: hex_distance(start, goal),
        seq,
    });

    while let Some(PathNode { coord, g, .. }) = open.pop() {
        if !closed.insert(coord) {
            continue;
        }
        expanded += 1;

        if coord == goal {
            let path = reconstruct(&came_from, goal);
            trace!(?start, ?goal, expanded, steps = path.len(), "path found");
            return Ok(Some(path));
        }

        for (next, cost) in successors(world, coord) {
            if closed.contains(&next) || !can_traverse(world, coord, next) {
                continue;
            }
            let tentative = g + cost;
            if g_score.get(&next).is_some_and(|&best| tentative >= best) {
                continue;
            }
            g_score.insert(next, tentative);
            came_from.insert(next, coord);
            seq += 1;
            open.push(PathNode {
                coord: next,
                g: tentative,
                f: tentative + hex_distance(next, goal),
                seq,
            });
        }
    }

    trace!(?start, ?goal, expanded, "no path");
    Ok(None)
}

/// The six neighbors at cost 1, then non-adjacent ladder partners at their
/// hex distance.
fn successors(world: &HexWorld, at: TileCoord) -> impl Iterator<Item = (TileCoord, u32)> + '_ {
    let ladders = world
        .structures()
        .ladder_partners(at)
        .filter(move |&partner| !at.is_adjacent(partner))
        .map(move |partner| (partner, hex_distance(at, partner)));

    at.neighbors().map(|n| (n, 1)).chain(ladders)
}

fn reconstruct(came_from: &HashMap<TileCoord, TileCoord>, goal: TileCoord) -> Vec<TileCoord> {
    let mut path = vec![goal];
    let mut current = goal;
    while let Some(&prev) = came_from.get(&current) {
        path.push(prev);
        current = prev;
    }
    path.reverse();
    path
}
