//! The strategy seam for lat/lon to grid-cell resolution.
//!
//! Two implementations exist: the table-scan resolver in `grid-index`
//! (nearest reference sample) and the analytic Lambert Conformal resolver
//! in `projection`. Callers pick one at configuration time and talk to it
//! through this trait only.

use crate::error::GridResult;

/// A single cell of the model's native grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct GridCell {
    pub i: i32,
    pub j: i32,
}

impl GridCell {
    pub fn new(i: i32, j: i32) -> Self {
        Self { i, j }
    }
}

/// Resolve an arbitrary lat/lon (degrees) to the grid cell covering it.
pub trait GridResolver: Send + Sync {
    fn resolve_cell(&self, lat: f64, lon: f64) -> GridResult<GridCell>;
}
