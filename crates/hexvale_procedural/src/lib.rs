//! # Hexvale Procedural Generation
//!
//! Deterministic terrain for a bounded hexagonal board.
//!
//! ## Design Principles
//!
//! 1. **Deterministic**: Same seed and parameters always produce the same board
//! 2. **Bounded**: The board is a hexagon of fixed radius, generated once, up front
//! 3. **Ordered**: Six passes run in a fixed sequence behind one entry point
//! 4. **Total**: Placement loops are capped and degrade instead of failing
//!
//! ## Core Components
//!
//! - `NoiseField`: seeded Perlin noise with fbm and ridged variants
//! - `Rng`: seeded uniform stream for counts, attempts and jitter
//! - `HexBoard`: height, block and feature grids with "no terrain" reads
//! - `generate`: the pipeline, producing a `Terrain`
//!
//! ## Example
//!
//! ```rust
//! use hexvale_procedural::{generate, TerrainConfig};
//!
//! let config = TerrainConfig {
//!     board_radius: 16,
//!     ..TerrainConfig::with_seed("harbor")
//! };
//! let terrain = generate(&config).unwrap();
//!
//! let centre = terrain.board().centre();
//! assert!(terrain.board().height(centre.q, centre.r).is_some());
//! assert_eq!(terrain.river_path().len(), terrain.board().depth());
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod biome;
pub mod board;
pub mod config;
pub mod error;
pub mod hex;
mod landform;
pub mod noise;
pub mod rng;
pub mod terrain;

pub use biome::{tile_distance, PropSpawn, RiverSide};
pub use board::{BlockType, Feature, FeatureKind, HexBoard};
pub use config::{MountainConfig, SettlementConfig, TerrainConfig, MAX_HEIGHT_LIMIT};
pub use error::{GenResult, TerrainError};
pub use hex::{axial_to_planar, hex_distance, is_inside, TileCoord, HEX_DIRECTIONS};
pub use noise::{NoiseField, WorldSeed};
pub use rng::Rng;
pub use terrain::{generate, generate_with, Terrain};
