//! # Biome Assignment
//!
//! The last two passes of the pipeline:
//! - Block assignment from moisture and ore noise channels
//! - Features: forests, tree patches, settlements, and the prop spawns the
//!   renderer instantiates for them
//!
//! The river splits every row in two. Columns east of `river_path[r]` are
//! wilderness (dense forest); columns west of it are village country (light
//! forest patches, single trees, settlements).

use std::collections::{HashSet, VecDeque};
use std::f64::consts::PI;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::board::{BlockType, Feature, FeatureKind, HexBoard};
use crate::config::SettlementConfig;
use crate::hex::{axial_to_planar, TileCoord};
use crate::noise::NoiseField;
use crate::rng::Rng;

/// Ore noise above this seams a column with ore.
const ORE_THRESHOLD: f64 = 0.88;

/// Zero-height tiles wetter than this become ponds.
const POND_MOISTURE: f64 = 0.55;

/// Forest noise above this grows dense forest on the wilderness side.
const WILDERNESS_THRESHOLD: f64 = 0.35;

/// Forest noise above this seeds a patch on the village side.
const PATCH_THRESHOLD: f64 = 0.8;

/// Per-tile chance of a lone tree on the village side.
const SPARSE_TREE_CHANCE: f64 = 0.08;

/// Which side of the river a column lies on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RiverSide {
    /// West of the river (`q < river_path[r]`).
    Village,
    /// On the river's center column.
    Channel,
    /// East of the river (`q > river_path[r]`).
    Wilderness,
}

impl RiverSide {
    /// Classifies a tile against the recorded river path.
    ///
    /// Rows without a recorded center count as the channel.
    #[must_use]
    pub fn of(river_path: &[i32], tile: TileCoord) -> Self {
        let Some(&center) = usize::try_from(tile.r).ok().and_then(|r| river_path.get(r)) else {
            return Self::Channel;
        };
        match tile.q.cmp(&center) {
            std::cmp::Ordering::Less => Self::Village,
            std::cmp::Ordering::Equal => Self::Channel,
            std::cmp::Ordering::Greater => Self::Wilderness,
        }
    }
}

/// One prop for the renderer to instantiate.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PropSpawn {
    /// Feature the prop represents.
    pub kind: FeatureKind,
    /// Tile the prop stands on.
    pub tile: TileCoord,
    /// World X (jittered).
    pub x: f64,
    /// World Y (top of the tile).
    pub y: f64,
    /// World Z (jittered).
    pub z: f64,
    /// Uniform scale.
    pub scale: f64,
    /// Rotation about the vertical axis, in radians.
    pub rotation: f64,
}

/// Counts produced by the feature pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct FeatureStats {
    pub dark_forest: usize,
    pub patches: usize,
    pub sparse_trees: usize,
}

/// Pass 5: chooses the side material of every non-water tile.
pub(crate) fn assign_blocks(board: &mut HexBoard, noise: &NoiseField, noise_scale: f64) {
    let radius = board.board_radius();
    let max_height = board.max_height();
    let marble_ceiling = (f64::from(max_height) * 0.3).floor() as u32;
    let tiles: Vec<_> = board.tiles().collect();
    let mut ponds = 0usize;

    for tile in tiles {
        if board.is_water(tile.q, tile.r) {
            continue;
        }
        let Some(height) = board.height(tile.q, tile.r) else {
            continue;
        };

        // Offset copies of the terrain field
        let nx = f64::from(tile.q - radius) * noise_scale * 1.5 + 100.0;
        let ny = f64::from(tile.r - radius) * noise_scale * 1.5 - 50.0;
        let moisture = (noise.sample(nx, ny) + 1.0) * 0.5;
        let ore = (noise.sample_3d(nx * 3.1, ny * 3.1, 8.9) + 1.0) * 0.5;

        let mut block = if height > 0 && ore > ORE_THRESHOLD && height < max_height {
            BlockType::Ore
        } else if height <= marble_ceiling {
            BlockType::Marble
        } else {
            BlockType::Stone
        };

        // Flat, low, wet ground pools into a pond
        if height == 0 && moisture > POND_MOISTURE {
            block = BlockType::Water;
            ponds += 1;
        }

        board.set_block(tile.q, tile.r, block);
    }

    debug!(ponds, "blocks assigned");
}

/// Pass 6a: dense forest, village patches and sparse trees.
pub(crate) fn assign_forests(
    board: &mut HexBoard,
    rng: &mut Rng,
    forest_noise: &NoiseField,
    river_path: &[i32],
    noise_scale: f64,
) -> FeatureStats {
    let radius = f64::from(board.board_radius());
    let max_height = f64::from(board.max_height());
    let forest_scale = noise_scale * 15.0;
    let tiles: Vec<_> = board.tiles().collect();
    let mut stats = FeatureStats::default();

    let forest_value = |tile: TileCoord| {
        let nx = (f64::from(tile.q) - radius) / radius;
        let ny = (f64::from(tile.r) - radius) / radius;
        (forest_noise.sample(nx * forest_scale, ny * forest_scale) + 1.0) * 0.5
    };

    // Wilderness: clustered dense forest
    for &tile in &tiles {
        if board.is_water(tile.q, tile.r) || RiverSide::of(river_path, tile) != RiverSide::Wilderness {
            continue;
        }
        let Some(height) = board.height(tile.q, tile.r) else {
            continue;
        };
        let h = f64::from(height);
        if forest_value(tile) > WILDERNESS_THRESHOLD && height >= 1 && h < max_height * 0.85 {
            let trees = rng.irange(2, 5) as u32;
            board.set_feature(tile.q, tile.r, Feature::new(FeatureKind::DarkForest, trees));
            stats.dark_forest += 1;
        }
    }

    // Village side: rare patches, otherwise lone trees
    let patch_ceiling = (max_height * 0.6).floor() as u32;
    for &tile in &tiles {
        if board.is_water(tile.q, tile.r)
            || !board.feature(tile.q, tile.r).is_some_and(Feature::is_none)
            || RiverSide::of(river_path, tile) != RiverSide::Village
        {
            continue;
        }
        let Some(height) = board.height(tile.q, tile.r) else {
            continue;
        };
        if !(2..=patch_ceiling).contains(&height) {
            continue;
        }

        if forest_value(tile) > PATCH_THRESHOLD {
            let size = rng.irange(4, 8) as usize;
            grow_patch(board, river_path, tile, size);
            stats.patches += 1;
        } else if rng.next() < SPARSE_TREE_CHANCE {
            board.set_feature(tile.q, tile.r, Feature::new(FeatureKind::Forest, 1));
            stats.sparse_trees += 1;
        }
    }

    debug!(
        dark_forest = stats.dark_forest,
        patches = stats.patches,
        sparse_trees = stats.sparse_trees,
        "forests assigned"
    );
    stats
}

/// Claims up to `max_size` contiguous village-side tiles as light forest.
///
/// Breadth-first from `seed`; a tile is claimed only if it is dry, still
/// unclaimed and west of the river. Returns the number claimed.
pub(crate) fn grow_patch(
    board: &mut HexBoard,
    river_path: &[i32],
    seed: TileCoord,
    max_size: usize,
) -> usize {
    let mut frontier = VecDeque::from([seed]);
    let mut visited = HashSet::from([seed]);
    let mut claimed = 0;

    while claimed < max_size {
        let Some(current) = frontier.pop_front() else {
            break;
        };
        let claimable = RiverSide::of(river_path, current) == RiverSide::Village
            && !board.is_water(current.q, current.r)
            && board.feature(current.q, current.r).is_some_and(Feature::is_none);
        if !claimable {
            continue;
        }

        board.set_feature(current.q, current.r, Feature::new(FeatureKind::Forest, 1));
        claimed += 1;

        for next in current.neighbors() {
            if board.is_inside(next.q, next.r) && visited.insert(next) {
                frontier.push_back(next);
            }
        }
    }

    claimed
}

/// Pass 6b: spaced settlements on flat, dry, unclaimed village ground.
///
/// Returns the accepted settlement tiles in acceptance order.
pub(crate) fn place_settlements(
    board: &mut HexBoard,
    rng: &mut Rng,
    river_path: &[i32],
    config: &SettlementConfig,
) -> Vec<TileCoord> {
    let mut candidates: Vec<TileCoord> = board
        .tiles()
        .filter(|&t| {
            RiverSide::of(river_path, t) == RiverSide::Village
                && !board.is_water(t.q, t.r)
                && board.feature(t.q, t.r).is_some_and(Feature::is_none)
                && board.height(t.q, t.r).is_some_and(|h| h > 0)
                && is_flat_neighborhood(board, t, 1)
        })
        .collect();

    let target = rng.irange(i64::from(config.min_count), i64::from(config.max_count)) as usize;
    let min_spacing = f64::from(board.board_radius()) * config.spacing_fraction;
    let mut accepted: Vec<TileCoord> = Vec::with_capacity(target);
    let mut attempts = 0;

    while accepted.len() < target && attempts < config.max_attempts && !candidates.is_empty() {
        let index = rng.irange(0, candidates.len() as i64 - 1) as usize;
        let candidate = candidates.swap_remove(index);
        attempts += 1;

        let too_close = accepted
            .iter()
            .any(|&placed| tile_distance(placed, candidate) < min_spacing);
        if !too_close {
            board.set_feature(candidate.q, candidate.r, Feature::CITY);
            accepted.push(candidate);
        }
    }

    if accepted.len() < target {
        warn!(
            target,
            placed = accepted.len(),
            attempts,
            "settlement placement ran out of room"
        );
    } else {
        debug!(placed = accepted.len(), attempts, "settlements placed");
    }
    accepted
}

/// True when every in-board tile of the 3x3 square around `tile` is within
/// `tolerance` layers of it.
fn is_flat_neighborhood(board: &HexBoard, tile: TileCoord, tolerance: u32) -> bool {
    let Some(h0) = board.height(tile.q, tile.r) else {
        return false;
    };
    for dr in -1..=1 {
        for dq in -1..=1 {
            if let Some(h) = board.height(tile.q + dq, tile.r + dr) {
                if h.abs_diff(h0) > tolerance {
                    return false;
                }
            }
        }
    }
    true
}

/// Straight-line distance between tiles in grid units.
#[must_use]
pub fn tile_distance(a: TileCoord, b: TileCoord) -> f64 {
    let dq = f64::from(a.q - b.q);
    let dr = f64::from(a.r - b.r);
    (dq * dq + dr * dr).sqrt()
}

/// Pass 6c: one prop per tree unit and one per settlement.
pub(crate) fn emit_prop_spawns(
    board: &HexBoard,
    rng: &mut Rng,
    tile_radius: f64,
    height_scale: f64,
) -> Vec<PropSpawn> {
    let radius = board.board_radius();
    let mut spawns = Vec::new();

    for tile in board.tiles() {
        let Some(feature) = board.feature(tile.q, tile.r) else {
            continue;
        };
        if feature.is_none() {
            continue;
        }
        let height = board.height(tile.q, tile.r).unwrap_or(0);
        let (x, z) = axial_to_planar(
            f64::from(tile.q - radius),
            f64::from(tile.r - radius),
            tile_radius,
        );
        let y = (f64::from(height) + 1.0) * height_scale;

        match feature.kind {
            FeatureKind::Forest | FeatureKind::DarkForest => {
                for _ in 0..feature.resource_count {
                    let jx = rng.range(-0.35, 0.35);
                    let jz = rng.range(-0.35, 0.35);
                    spawns.push(PropSpawn {
                        kind: feature.kind,
                        tile,
                        x: x + jx,
                        y,
                        z: z + jz,
                        scale: rng.range(0.8, 1.2),
                        rotation: rng.range(0.0, PI * 2.0),
                    });
                }
            }
            FeatureKind::City => {
                let jx = rng.range(-0.1, 0.1);
                let jz = rng.range(-0.1, 0.1);
                spawns.push(PropSpawn {
                    kind: FeatureKind::City,
                    tile,
                    x: x + jx,
                    y,
                    z: z + jz,
                    scale: rng.range(0.9, 1.1),
                    rotation: rng.range(0.0, PI * 2.0),
                });
            }
            FeatureKind::None => {}
        }
    }

    debug!(props = spawns.len(), "prop spawns emitted");
    spawns
}
