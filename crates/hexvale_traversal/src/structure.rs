//! # Structure Overlay
//!
//! Player-built ladders and bridges, keyed by the tile they occupy.
//!
//! The overlay is plain storage. It does not check a ladder spans a real
//! height difference or that a bridge crosses water; the placement helpers
//! in [`crate::placement`] do that before inserting.
//!
//! One record per tile: adding to an occupied tile replaces its record.
//! Ladder records are also indexed by both endpoints, so a ladder stored at
//! only one end is still found from the other.

use std::collections::{BTreeMap, BTreeSet};

use hexvale_procedural::TileCoord;

/// A structure record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Structure {
    /// Connects `from` (low end) and `to` (high end) regardless of height.
    ///
    /// Stored at both endpoints.
    Ladder {
        /// Lower endpoint.
        from: TileCoord,
        /// Upper endpoint.
        to: TileCoord,
    },
    /// A span over water, stored on every water tile it covers.
    Bridge {
        /// Bank the bridge was built from; bridge tiles stand at its height.
        from: TileCoord,
        /// First water tile of the span.
        across: TileCoord,
        /// Far bank, or `across` when the span found no landing.
        to: TileCoord,
    },
}

impl Structure {
    /// Returns true for ladders.
    #[inline]
    #[must_use]
    pub const fn is_ladder(&self) -> bool {
        matches!(self, Self::Ladder { .. })
    }

    /// Returns true for bridges.
    #[inline]
    #[must_use]
    pub const fn is_bridge(&self) -> bool {
        matches!(self, Self::Bridge { .. })
    }

    /// True when this is a ladder joining `a` and `b`, in either direction.
    #[must_use]
    pub fn ladder_joins(&self, a: TileCoord, b: TileCoord) -> bool {
        match *self {
            Self::Ladder { from, to } => (from == a && to == b) || (from == b && to == a),
            Self::Bridge { .. } => false,
        }
    }

    /// The ladder endpoint opposite `at`, if this is a ladder touching `at`.
    #[must_use]
    pub fn ladder_partner(&self, at: TileCoord) -> Option<TileCoord> {
        match *self {
            Self::Ladder { from, to } if from == at => Some(to),
            Self::Ladder { from, to } if to == at => Some(from),
            _ => None,
        }
    }
}

/// Tile-keyed structure storage.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StructureOverlay {
    records: BTreeMap<TileCoord, Structure>,
    /// Ladder endpoint -> tiles holding a ladder record that touches it.
    ladder_ends: BTreeMap<TileCoord, BTreeSet<TileCoord>>,
}

impl StructureOverlay {
    /// Creates an empty overlay.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `record` at `at`, returning the record it replaced.
    pub fn add(&mut self, at: TileCoord, record: Structure) -> Option<Structure> {
        let replaced = self.records.insert(at, record);
        if let Some(old) = replaced {
            self.unindex(at, old);
        }
        if let Structure::Ladder { from, to } = record {
            for end in [from, to] {
                self.ladder_ends.entry(end).or_default().insert(at);
            }
        }
        replaced
    }

    /// The record at `at`.
    #[inline]
    #[must_use]
    pub fn get(&self, at: TileCoord) -> Option<&Structure> {
        self.records.get(&at)
    }

    /// Removes and returns the record at `at`.
    pub fn remove(&mut self, at: TileCoord) -> Option<Structure> {
        let removed = self.records.remove(&at)?;
        self.unindex(at, removed);
        Some(removed)
    }

    /// Drops every record.
    pub fn clear(&mut self) {
        self.records.clear();
        self.ladder_ends.clear();
    }

    /// Tiles a ladder connects `at` to, wherever the ladder record is stored.
    pub fn ladder_partners(&self, at: TileCoord) -> impl Iterator<Item = TileCoord> + '_ {
        self.ladder_ends
            .get(&at)
            .into_iter()
            .flatten()
            .filter_map(move |holder| self.records.get(holder)?.ladder_partner(at))
            .filter(move |&partner| partner != at)
    }

    /// True when some ladder record joins `a` and `b`.
    #[must_use]
    pub fn ladder_links(&self, a: TileCoord, b: TileCoord) -> bool {
        self.ladder_ends.get(&a).is_some_and(|holders| {
            holders
                .iter()
                .any(|holder| self.records.get(holder).is_some_and(|s| s.ladder_joins(a, b)))
        })
    }

    fn unindex(&mut self, at: TileCoord, record: Structure) {
        let Structure::Ladder { from, to } = record else {
            return;
        };
        for end in [from, to] {
            if let Some(holders) = self.ladder_ends.get_mut(&end) {
                holders.remove(&at);
                if holders.is_empty() {
                    self.ladder_ends.remove(&end);
                }
            }
        }
    }

    /// Number of occupied tiles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when no tile carries a record.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Occupied tiles and their records, in coordinate order.
    pub fn iter(&self) -> impl Iterator<Item = (TileCoord, &Structure)> + '_ {
        self.records.iter().map(|(&at, record)| (at, record))
    }

    /// True when `at` carries a bridge record.
    #[inline]
    #[must_use]
    pub fn is_bridge(&self, at: TileCoord) -> bool {
        self.get(at).is_some_and(Structure::is_bridge)
    }
}
