//! Dead-zone closing.
//!
//! Corner coordinates come from independent per-tile interpolation, so the
//! corners that four neighbouring tiles contribute at a shared junction
//! disagree by a fraction of a cell. Snapping every member of such a
//! cluster to the cluster average makes the polygons meet exactly.

use crate::corners::TileCorner;

/// Two corners belong to the same junction when their whole-cell indices
/// differ by exactly one step: along i, along j, or diagonally.
fn is_adjacent(a: &TileCorner, b: &TileCorner) -> bool {
    let di = (a.i - b.i).abs();
    let dj = (a.j - b.j).abs();
    (a.i == b.i && dj == 1.0) || (a.j == b.j && di == 1.0) || (di == 1.0 && dj == 1.0)
}

/// Cluster adjacent corners and overwrite each cluster with its average
/// coordinates.
///
/// Each unconsumed corner in turn seeds a cluster of the corners still
/// unconsumed and adjacent to it. Clusters of one are left untouched and
/// stay available to a later seed. Averaged indices are fractional and can
/// never satisfy the exact one-step adjacency again, so the pass is
/// idempotent.
pub fn merge_dead_zones(corners: &mut [TileCorner]) {
    let mut consumed = vec![false; corners.len()];

    for seed in 0..corners.len() {
        if consumed[seed] {
            continue;
        }
        let mut cluster = vec![seed];
        for other in 0..corners.len() {
            if other == seed || consumed[other] {
                continue;
            }
            if is_adjacent(&corners[seed], &corners[other]) {
                cluster.push(other);
            }
        }
        if cluster.len() == 1 {
            continue;
        }

        let n = cluster.len() as f64;
        let (mut i, mut j, mut lat, mut lon) = (0.0, 0.0, 0.0, 0.0);
        for &idx in &cluster {
            i += corners[idx].i;
            j += corners[idx].j;
            lat += corners[idx].lat;
            lon += corners[idx].lon;
        }
        for &idx in &cluster {
            corners[idx].i = i / n;
            corners[idx].j = j / n;
            corners[idx].lat = lat / n;
            corners[idx].lon = lon / n;
            consumed[idx] = true;
        }
    }
}
