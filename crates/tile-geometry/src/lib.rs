//! Per-tile polygon geometry from the reference table.
//!
//! Each 10x10 tile contributes its four extreme corner samples. Because
//! corner coordinates are computed independently per tile, corners of
//! adjacent tiles do not exactly coincide, which leaves visible gaps
//! ("dead zones") between rendered polygons. Clustering adjacent corners
//! and averaging their coordinates closes the gaps.

mod corners;
mod merge;

pub use corners::{extract_corner_points, group_by_tile, TileCorner};
pub use merge::merge_dead_zones;

use grid_index::GridSample;

use std::collections::BTreeMap;

/// Full pipeline: corner extraction, dead-zone merge, grouping by tile.
pub fn build_tile_groups(samples: &[GridSample]) -> BTreeMap<u32, Vec<TileCorner>> {
    let mut corners = extract_corner_points(samples);
    merge_dead_zones(&mut corners);
    group_by_tile(corners)
}
