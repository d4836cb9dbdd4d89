//! # Terrain Generator
//!
//! Runs the six passes in fixed order against one board:
//!
//! ```text
//! base elevation -> mountains -> river -> cliff/ramp -> blocks -> features
//! ```
//!
//! Later passes read what earlier ones wrote (blocks read the carved heights,
//! features read the river path and block map), so the order is not exposed
//! for reordering. The only entry points are [`generate`] and
//! [`generate_with`].

use tracing::{info, warn};

use crate::biome::{self, PropSpawn};
use crate::board::HexBoard;
use crate::config::TerrainConfig;
use crate::error::GenResult;
use crate::hex::{axial_to_planar, TileCoord};
use crate::landform;
use crate::noise::NoiseField;
use crate::rng::Rng;

/// Furthest a spawn search walks from the river into the village side.
const SPAWN_SEARCH_SPAN: i32 = 24;

/// A fully generated board plus everything the passes recorded.
#[derive(Clone, Debug, PartialEq)]
pub struct Terrain {
    board: HexBoard,
    river_path: Vec<i32>,
    prop_spawns: Vec<PropSpawn>,
    settlements: Vec<TileCoord>,
    mountains_placed: u32,
    config: TerrainConfig,
}

/// Generates a board from a validated config.
///
/// Deterministic: the same config yields an identical [`Terrain`].
///
/// # Errors
///
/// Returns [`TerrainError::InvalidConfig`](crate::TerrainError::InvalidConfig)
/// if the config fails validation. Generation itself cannot fail.
pub fn generate(config: &TerrainConfig) -> GenResult<Terrain> {
    config.validate()?;

    let seed = config.seed.as_str();
    info!(seed, board_radius = config.board_radius, "generating terrain");

    let noise = NoiseField::new(&format!("{seed}-perlin"));
    let forest_noise = NoiseField::new(&format!("{seed}-forests"));
    let mut rng = Rng::new(&format!("{seed}-rng"));
    let mut board = HexBoard::new(config.board_radius, config.max_height);

    landform::raise_base_elevation(&mut board, &noise, config.noise_scale);

    let mountains = &config.mountains;
    let mountains_placed = landform::stamp_mountains(
        &mut board,
        &mut rng,
        &noise,
        mountains.count,
        mountains.count.saturating_mul(mountains.attempts_per_mountain),
    );
    if mountains_placed < mountains.count {
        warn!(
            requested = mountains.count,
            placed = mountains_placed,
            "fewer mountains than requested"
        );
    }

    let river_path = landform::carve_river(&mut board, &mut rng, &noise);
    landform::carve_cliff_with_ramp(&mut board);

    biome::assign_blocks(&mut board, &noise, config.noise_scale);
    let forests = biome::assign_forests(
        &mut board,
        &mut rng,
        &forest_noise,
        &river_path,
        config.noise_scale,
    );
    let settlements =
        biome::place_settlements(&mut board, &mut rng, &river_path, &config.settlements);
    let prop_spawns =
        biome::emit_prop_spawns(&board, &mut rng, config.tile_radius, config.height_scale);

    info!(
        tiles = board.tile_count(),
        mountains = mountains_placed,
        forest_tiles = forests.dark_forest + forests.sparse_trees,
        patches = forests.patches,
        settlements = settlements.len(),
        props = prop_spawns.len(),
        "terrain generated"
    );

    Ok(Terrain {
        board,
        river_path,
        prop_spawns,
        settlements,
        mountains_placed,
        config: config.clone(),
    })
}

/// Generates a board from the six core parameters, with default tuning.
///
/// # Errors
///
/// As [`generate`].
pub fn generate_with(
    seed: &str,
    board_radius: u32,
    tile_radius: f64,
    height_scale: f64,
    max_height: u32,
    noise_scale: f64,
) -> GenResult<Terrain> {
    generate(&TerrainConfig {
        seed: seed.to_owned(),
        board_radius,
        tile_radius,
        height_scale,
        max_height,
        noise_scale,
        ..TerrainConfig::default()
    })
}

impl Terrain {
    /// The generated grids.
    #[must_use]
    pub const fn board(&self) -> &HexBoard {
        &self.board
    }

    /// Consumes the terrain, keeping only the grids.
    #[must_use]
    pub fn into_board(self) -> HexBoard {
        self.board
    }

    /// River center column per row (`river_path[r]`).
    #[must_use]
    pub fn river_path(&self) -> &[i32] {
        &self.river_path
    }

    /// Props for the renderer, in row-major tile order.
    #[must_use]
    pub fn prop_spawns(&self) -> &[PropSpawn] {
        &self.prop_spawns
    }

    /// Accepted settlement tiles, in acceptance order.
    #[must_use]
    pub fn settlements(&self) -> &[TileCoord] {
        &self.settlements
    }

    /// Mountains actually stamped.
    #[must_use]
    pub const fn mountains_placed(&self) -> u32 {
        self.mountains_placed
    }

    /// The config this terrain was generated from.
    #[must_use]
    pub const fn config(&self) -> &TerrainConfig {
        &self.config
    }

    /// Takes one unit from a forest tile. See [`HexBoard::harvest`].
    pub fn harvest(&mut self, q: i32, r: i32) -> Option<u32> {
        self.board.harvest(q, r)
    }

    /// World-space centre of a tile's top face as `(x, y, z)`.
    ///
    /// Returns `None` outside the board.
    #[must_use]
    pub fn tile_position(&self, q: i32, r: i32) -> Option<(f64, f64, f64)> {
        let height = self.board.height(q, r)?;
        let radius = self.board.board_radius();
        let (x, z) = axial_to_planar(
            f64::from(q - radius),
            f64::from(r - radius),
            self.config.tile_radius,
        );
        let y = (f64::from(height) + 1.0) * self.config.height_scale;
        Some((x, y, z))
    }

    /// Finds a dry, empty, raised tile just west of the river near the
    /// centre rows.
    ///
    /// Falls back to a tile left of centre when nothing qualifies.
    #[must_use]
    pub fn find_player_spawn(&self) -> TileCoord {
        let board = &self.board;
        let centre_r = board.board_radius();
        let span = board.board_radius() / 2;

        for r in (centre_r - span)..(centre_r + span) {
            let Some(&river_q) = usize::try_from(r).ok().and_then(|i| self.river_path.get(i))
            else {
                continue;
            };
            for q in ((river_q - SPAWN_SEARCH_SPAN)..river_q).rev() {
                let suitable = !board.is_water(q, r)
                    && board.feature(q, r).is_some_and(|f| f.is_none())
                    && board.height(q, r).is_some_and(|h| h > 0);
                if suitable {
                    return TileCoord::new(q, r);
                }
            }
        }

        let fallback = TileCoord::new((board.board_radius() - 5).max(0), board.board_radius());
        warn!(q = fallback.q, r = fallback.r, "no ideal player spawn, using fallback");
        fallback
    }
}
