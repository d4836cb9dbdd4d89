//! # Hexvale Traversal
//!
//! Walking on a generated board: player structures and path queries.
//!
//! ## Core Components
//!
//! - `StructureOverlay`: ladders and bridges keyed by tile
//! - `HexWorld`: board plus overlay, with bridge-aware heights
//! - `find_path`: deterministic A* under the climb/drop rule
//! - `placement`: legal ladder/bridge spots and multi-tile bridge spans
//! - `SharedWorld`: lock-guarded world for multi-threaded hosts
//!
//! ## Example
//!
//! ```rust
//! use hexvale_procedural::{HexBoard, TileCoord};
//! use hexvale_traversal::HexWorld;
//!
//! let world = HexWorld::new(HexBoard::new(4, 10));
//! let path = world
//!     .find_path(TileCoord::new(4, 4), TileCoord::new(7, 4))
//!     .unwrap()
//!     .unwrap();
//! assert_eq!(path.len(), 4);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod error;
pub mod pathfinder;
pub mod placement;
pub mod shared;
pub mod structure;
pub mod world;

pub use error::{TraversalError, TraversalResult};
pub use pathfinder::{can_traverse, find_path, MAX_CLIMB, MAX_DROP};
pub use placement::{
    bridge_spots, ladder_spots, place_bridge, place_ladder, plan_bridge, plan_ladder, BridgeSpot,
};
pub use shared::SharedWorld;
pub use structure::{Structure, StructureOverlay};
pub use world::HexWorld;
