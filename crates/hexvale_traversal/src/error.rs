//! # Traversal Error Types
//!
//! Invalid-argument conditions of the traversal API.
//!
//! "No path" is not an error: a disconnected board is a normal outcome and
//! is reported as `Ok(None)`.

use thiserror::Error;

/// Errors that can occur when querying or editing a world.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TraversalError {
    /// A path query named a start or goal outside the board.
    #[error("tile ({q}, {r}) is outside the board")]
    OutOfBoard {
        /// Column.
        q: i32,
        /// Row.
        r: i32,
    },

    /// A structure was requested on a tile that does not exist.
    #[error("cannot build at ({q}, {r}): outside the board")]
    StructureOutOfBoard {
        /// Column.
        q: i32,
        /// Row.
        r: i32,
    },

    /// The tile holds no harvestable resource.
    #[error("nothing to harvest at ({q}, {r})")]
    NothingToHarvest {
        /// Column.
        q: i32,
        /// Row.
        r: i32,
    },
}

/// Result type for traversal operations.
pub type TraversalResult<T> = Result<T, TraversalError>;
