//! # Hex Coordinates
//!
//! Tiles are addressed by axial `(q, r)` pairs stored in array space:
//! both components run over `[0, 2 * board_radius]`, and the board's centre
//! tile is `(board_radius, board_radius)`. Only the hexagon of tiles within
//! `board_radius` steps of the centre is part of the board.

use serde::{Deserialize, Serialize};

/// The six axial neighbor offsets, in the order the pathfinder expands them.
pub const HEX_DIRECTIONS: [(i32, i32); 6] = [(1, 0), (-1, 0), (0, 1), (0, -1), (1, -1), (-1, 1)];

/// A tile address on the board (array-space axial coordinates).
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct TileCoord {
    /// Column.
    pub q: i32,
    /// Row.
    pub r: i32,
}

impl TileCoord {
    /// Creates a new tile coordinate.
    #[inline]
    #[must_use]
    pub const fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }

    /// Returns this coordinate shifted by `(dq, dr)`.
    #[inline]
    #[must_use]
    pub const fn offset(self, dq: i32, dr: i32) -> Self {
        Self::new(self.q + dq, self.r + dr)
    }

    /// The six adjacent coordinates, in [`HEX_DIRECTIONS`] order.
    ///
    /// Neighbors may lie outside the board; callers filter.
    pub fn neighbors(self) -> impl Iterator<Item = Self> {
        HEX_DIRECTIONS.into_iter().map(move |(dq, dr)| self.offset(dq, dr))
    }

    /// True when `other` is one of the six adjacent tiles.
    #[must_use]
    pub fn is_adjacent(self, other: Self) -> bool {
        hex_distance(self, other) == 1
    }
}

impl From<(i32, i32)> for TileCoord {
    fn from((q, r): (i32, i32)) -> Self {
        Self::new(q, r)
    }
}

/// Tests whether array-space `(q, r)` lies on a board of the given radius.
///
/// With `aq = q - radius` and `ar = r - radius`, a tile is inside iff
/// `|aq|`, `|ar|` and `|aq + ar|` are all at most `radius`.
#[inline]
#[must_use]
pub const fn is_inside(q: i32, r: i32, board_radius: i32) -> bool {
    // Widened so coordinates near the i32 limits report "outside"
    let radius = board_radius as i64;
    let aq = q as i64 - radius;
    let ar = r as i64 - radius;
    aq.abs() <= radius && ar.abs() <= radius && (aq + ar).abs() <= radius
}

/// Projects centred axial coordinates onto the ground plane (flat-top hexes).
///
/// Returns `(x, z)` with `x = 1.5 * radius * q` and
/// `z = sqrt(3) * radius * (r + q / 2)`.
#[inline]
#[must_use]
pub fn axial_to_planar(q: f64, r: f64, tile_radius: f64) -> (f64, f64) {
    let x = tile_radius * 1.5 * q;
    let z = tile_radius * 3f64.sqrt() * (r + q / 2.0);
    (x, z)
}

/// Number of hex steps between two tiles (cube distance).
#[inline]
#[must_use]
pub fn hex_distance(a: TileCoord, b: TileCoord) -> u32 {
    let dq = a.q - b.q;
    let dr = a.r - b.r;
    dq.unsigned_abs()
        .max(dr.unsigned_abs())
        .max((dq + dr).unsigned_abs())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inside_matches_definition() {
        let radius: i32 = 5;
        for q in -3..=2 * radius + 3 {
            for r in -3..=2 * radius + 3 {
                let aq = q - radius;
                let ar = r - radius;
                let expected =
                    aq.abs() <= radius && ar.abs() <= radius && (aq + ar).abs() <= radius;
                assert_eq!(is_inside(q, r, radius), expected, "Mismatch at ({q}, {r})");
            }
        }
    }

    #[test]
    fn test_extreme_coordinates_are_outside() {
        for (q, r) in [
            (i32::MIN, 0),
            (0, i32::MIN),
            (i32::MAX, i32::MAX),
            (i32::MIN, i32::MAX),
            (i32::MAX, i32::MIN),
        ] {
            assert!(!is_inside(q, r, 5), "({q}, {r}) should be off the board");
        }
        assert!(!is_inside(i32::MIN, 0, i32::MAX));
        assert!(is_inside(i32::MAX, i32::MAX, i32::MAX));
    }

    #[test]
    fn test_tile_count() {
        // A hexagon of radius n holds 3n(n+1)+1 tiles
        let radius = 7;
        let count = (0..=2 * radius)
            .flat_map(|r| (0..=2 * radius).map(move |q| (q, r)))
            .filter(|&(q, r)| is_inside(q, r, radius))
            .count();
        assert_eq!(count, (3 * radius * (radius + 1) + 1) as usize);
    }

    #[test]
    fn test_axial_to_planar() {
        let (x, z) = axial_to_planar(0.0, 0.0, 1.0);
        assert_eq!((x, z), (0.0, 0.0));

        let (x, z) = axial_to_planar(2.0, 1.0, 0.5);
        assert!((x - 1.5).abs() < 1e-12);
        assert!((z - 0.5 * 3f64.sqrt() * 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_neighbors_are_distance_one() {
        let centre = TileCoord::new(4, 4);
        let neighbors: Vec<_> = centre.neighbors().collect();
        assert_eq!(neighbors.len(), 6);
        for n in neighbors {
            assert_eq!(hex_distance(centre, n), 1);
            assert!(centre.is_adjacent(n));
        }
    }

    #[test]
    fn test_hex_distance() {
        assert_eq!(hex_distance(TileCoord::new(0, 0), TileCoord::new(3, 0)), 3);
        assert_eq!(hex_distance(TileCoord::new(0, 0), TileCoord::new(3, -3)), 3);
        assert_eq!(hex_distance(TileCoord::new(0, 0), TileCoord::new(2, 2)), 4);
        assert_eq!(hex_distance(TileCoord::new(2, 2), TileCoord::new(2, 2)), 0);
    }
}
