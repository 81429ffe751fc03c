//! Grid index constants, resolved ranges, and tile alignment.
//!
//! The model domain is split into 10x10-cell tiles. Grid indices start at 2,
//! so every tile boundary index ends in the digit 2 (2, 12, 22, ...).

use serde::{Deserialize, Serialize};

/// Largest valid I index in the full-domain reference table.
pub const MAX_I: i32 = 476;
/// Largest valid J index in the full-domain reference table.
pub const MAX_J: i32 = 425;
/// Smallest valid grid index on either axis.
pub const MIN_INDEX: i32 = 2;
/// Grid cells per tile along each axis.
pub const TILE_SPAN: i32 = 10;

/// The minimal tile-index range enclosing a bounding query.
///
/// Wire field names are fixed by existing clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedRange {
    pub min_i: i32,
    pub max_i: i32,
    pub min_j: i32,
    pub max_j: i32,
}

impl ResolvedRange {
    pub fn new(min_i: i32, max_i: i32, min_j: i32, max_j: i32) -> Self {
        Self {
            min_i,
            max_i,
            min_j,
            max_j,
        }
    }

    /// The range an empty (degraded) index serves: the whole grid.
    pub fn full_domain() -> Self {
        Self::new(MIN_INDEX, MAX_I, MIN_INDEX, MAX_J)
    }
}

/// Greatest index less than or equal to `n` that ends in digit 2.
///
/// Used to snap a resolved minimum index down to the enclosing tile's
/// lower boundary before stepping through tiles.
pub fn floor_tile_index(n: i32) -> i32 {
    if n % 10 == 2 {
        n
    } else if n < 12 {
        2
    } else if n % 10 < 2 {
        n - 10 - (n % 10) + 2
    } else {
        n - (n % 10) + 2
    }
}

/// Smallest index greater than or equal to `n` that ends in digit 2.
pub fn ceil_tile_index(n: i32) -> i32 {
    if n % 10 == 2 {
        n
    } else if n < 2 {
        2
    } else if n % 10 < 2 {
        n + (2 - n % 10)
    } else {
        n + (12 - n % 10)
    }
}
