//! # Hex Board Grids
//!
//! The board stores three parallel fields over the `(2R+1) x (2R+1)` square
//! that embeds the hexagon:
//! - Height map (discrete layers, `0..=max_height`)
//! - Block map (side material of each column)
//! - Feature map (forest/settlement overlay with a resource count)
//!
//! Reads outside the hexagon, or outside the square, report "no terrain"
//! (`None`) instead of panicking. Writes there are ignored.

use serde::{Deserialize, Serialize};

use crate::hex::{is_inside, TileCoord};

/// Side material of a tile column.
///
/// Grass is not stored: it is the implicit top cap of every non-water tile.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum BlockType {
    /// Grass-capped stone, the default material.
    #[default]
    Stone = 0,
    /// Pale stone of the lowlands.
    Marble = 1,
    /// Stone with an ore seam.
    Ore = 2,
    /// River, lake or pond surface.
    Water = 3,
    /// Bare earth.
    Dirt = 4,
}

impl BlockType {
    /// Returns true for water tiles.
    #[inline]
    #[must_use]
    pub const fn is_water(self) -> bool {
        matches!(self, Self::Water)
    }
}

/// Biome/settlement classification of a tile.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum FeatureKind {
    /// Nothing on the tile.
    #[default]
    None = 0,
    /// Light forest (village side).
    Forest = 1,
    /// Dense forest (wilderness side).
    DarkForest = 2,
    /// Settlement.
    City = 3,
}

impl FeatureKind {
    /// Returns whether this feature holds harvestable trees.
    #[inline]
    #[must_use]
    pub const fn is_forest(self) -> bool {
        matches!(self, Self::Forest | Self::DarkForest)
    }
}

/// A tile's feature plus the harvestable units it still holds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Feature {
    /// What occupies the tile.
    pub kind: FeatureKind,
    /// Remaining harvestable units (trees).
    pub resource_count: u32,
}

impl Feature {
    /// Empty tile.
    pub const NONE: Self = Self {
        kind: FeatureKind::None,
        resource_count: 0,
    };

    /// Settlement tile.
    pub const CITY: Self = Self {
        kind: FeatureKind::City,
        resource_count: 0,
    };

    /// Creates a feature with a resource count.
    #[inline]
    #[must_use]
    pub const fn new(kind: FeatureKind, resource_count: u32) -> Self {
        Self {
            kind,
            resource_count,
        }
    }

    /// Returns true when the tile carries no feature.
    #[inline]
    #[must_use]
    pub const fn is_none(self) -> bool {
        matches!(self.kind, FeatureKind::None)
    }
}

/// The three terrain grids of one hexagonal board.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HexBoard {
    /// Hexagon radius in tiles.
    board_radius: i32,
    /// Side of the embedding square (`2 * radius + 1`).
    width: usize,
    /// Highest allowed layer.
    max_height: u32,
    /// Heights (indexed as `[r * width + q]`).
    heights: Vec<u32>,
    /// Block materials (same indexing).
    blocks: Vec<BlockType>,
    /// Features (same indexing).
    features: Vec<Feature>,
}

impl HexBoard {
    /// Allocates a board with zero height, stone blocks and no features.
    #[must_use]
    pub fn new(board_radius: u32, max_height: u32) -> Self {
        let width = 2 * board_radius as usize + 1;
        let cells = width * width;
        Self {
            board_radius: board_radius as i32,
            width,
            max_height,
            heights: vec![0; cells],
            blocks: vec![BlockType::Stone; cells],
            features: vec![Feature::NONE; cells],
        }
    }

    /// Hexagon radius in tiles.
    #[inline]
    #[must_use]
    pub const fn board_radius(&self) -> i32 {
        self.board_radius
    }

    /// Width of the embedding square.
    #[inline]
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Depth of the embedding square (equal to the width).
    #[inline]
    #[must_use]
    pub const fn depth(&self) -> usize {
        self.width
    }

    /// Highest allowed layer.
    #[inline]
    #[must_use]
    pub const fn max_height(&self) -> u32 {
        self.max_height
    }

    /// The centre tile.
    #[inline]
    #[must_use]
    pub const fn centre(&self) -> TileCoord {
        TileCoord::new(self.board_radius, self.board_radius)
    }

    /// Whether `(q, r)` is part of the hexagon.
    #[inline]
    #[must_use]
    pub const fn is_inside(&self, q: i32, r: i32) -> bool {
        is_inside(q, r, self.board_radius)
    }

    /// Flat index of an in-board tile.
    #[inline]
    fn index(&self, q: i32, r: i32) -> Option<usize> {
        if q < 0 || r < 0 || q as usize >= self.width || r as usize >= self.width {
            return None;
        }
        if !self.is_inside(q, r) {
            return None;
        }
        Some(r as usize * self.width + q as usize)
    }

    /// Height of a tile, or `None` for "no terrain".
    #[inline]
    #[must_use]
    pub fn height(&self, q: i32, r: i32) -> Option<u32> {
        self.index(q, r).map(|i| self.heights[i])
    }

    /// Sets a tile's height, clamped to `max_height`.
    #[inline]
    pub fn set_height(&mut self, q: i32, r: i32, height: u32) {
        if let Some(i) = self.index(q, r) {
            self.heights[i] = height.min(self.max_height);
        }
    }

    /// Block material of a tile.
    #[inline]
    #[must_use]
    pub fn block(&self, q: i32, r: i32) -> Option<BlockType> {
        self.index(q, r).map(|i| self.blocks[i])
    }

    /// Sets a tile's block material.
    #[inline]
    pub fn set_block(&mut self, q: i32, r: i32, block: BlockType) {
        if let Some(i) = self.index(q, r) {
            self.blocks[i] = block;
        }
    }

    /// Returns true for in-board water tiles.
    #[inline]
    #[must_use]
    pub fn is_water(&self, q: i32, r: i32) -> bool {
        self.block(q, r).is_some_and(BlockType::is_water)
    }

    /// Feature of a tile.
    #[inline]
    #[must_use]
    pub fn feature(&self, q: i32, r: i32) -> Option<Feature> {
        self.index(q, r).map(|i| self.features[i])
    }

    /// Sets a tile's feature.
    #[inline]
    pub fn set_feature(&mut self, q: i32, r: i32, feature: Feature) {
        if let Some(i) = self.index(q, r) {
            self.features[i] = feature;
        }
    }

    /// Takes one resource unit from a forest tile.
    ///
    /// Returns the units left, or `None` if the tile holds nothing to
    /// harvest. The tile reverts to [`FeatureKind::None`] when it runs out.
    pub fn harvest(&mut self, q: i32, r: i32) -> Option<u32> {
        let i = self.index(q, r)?;
        let feature = &mut self.features[i];
        if !feature.kind.is_forest() || feature.resource_count == 0 {
            return None;
        }

        feature.resource_count -= 1;
        if feature.resource_count == 0 {
            *feature = Feature::NONE;
        }
        Some(feature.resource_count)
    }

    /// Every in-board tile in row-major order.
    pub fn tiles(&self) -> impl Iterator<Item = TileCoord> + '_ {
        let side = self.width as i32;
        (0..side)
            .flat_map(move |r| (0..side).map(move |q| TileCoord::new(q, r)))
            .filter(move |t| self.is_inside(t.q, t.r))
    }

    /// Number of in-board tiles.
    #[must_use]
    pub fn tile_count(&self) -> usize {
        let n = self.board_radius as usize;
        3 * n * (n + 1) + 1
    }
}
