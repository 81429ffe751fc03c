//! Corner extraction from the tile reference table.

use std::collections::BTreeMap;

use grid_index::GridSample;
use serde::{Deserialize, Serialize};

/// One corner point of a tile polygon.
///
/// Indices are floating point: extraction produces whole-cell values, but
/// the dead-zone merge replaces clustered corners with their average, which
/// lands between cells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TileCorner {
    pub tile_id: u32,
    pub i: f64,
    pub j: f64,
    pub lat: f64,
    pub lon: f64,
}

/// Reduce the tile table to the four extreme corners of each tile: the
/// samples whose i is the tile's minimum or maximum and whose j is the
/// tile's minimum or maximum. Samples without a tile id are ignored.
/// Output preserves table order.
pub fn extract_corner_points(samples: &[GridSample]) -> Vec<TileCorner> {
    // (min_i, max_i, min_j, max_j) per tile
    let mut extents: BTreeMap<u32, (i32, i32, i32, i32)> = BTreeMap::new();
    for sample in samples {
        let Some(tile_id) = sample.tile_id else {
            continue;
        };
        let entry = extents
            .entry(tile_id)
            .or_insert((sample.i, sample.i, sample.j, sample.j));
        entry.0 = entry.0.min(sample.i);
        entry.1 = entry.1.max(sample.i);
        entry.2 = entry.2.min(sample.j);
        entry.3 = entry.3.max(sample.j);
    }

    samples
        .iter()
        .filter_map(|sample| {
            let tile_id = sample.tile_id?;
            let (min_i, max_i, min_j, max_j) = extents[&tile_id];
            let on_i_edge = sample.i == min_i || sample.i == max_i;
            let on_j_edge = sample.j == min_j || sample.j == max_j;
            (on_i_edge && on_j_edge).then(|| TileCorner {
                tile_id,
                i: sample.i as f64,
                j: sample.j as f64,
                lat: sample.lat,
                lon: sample.lon,
            })
        })
        .collect()
}

/// Group corners by tile id, preserving their order within each tile.
pub fn group_by_tile(corners: Vec<TileCorner>) -> BTreeMap<u32, Vec<TileCorner>> {
    let mut groups: BTreeMap<u32, Vec<TileCorner>> = BTreeMap::new();
    for corner in corners {
        groups.entry(corner.tile_id).or_default().push(corner);
    }
    groups
}
