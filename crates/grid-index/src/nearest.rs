//! Nearest-sample lookup.
//!
//! Rebuilds the table as square per-cell latitude/longitude matrices
//! indexed by (i, j), evaluates squared degree-distance at every populated
//! cell, and maps the minimum back to its sample. The lookup accepts any
//! input coordinates; callers validate ranges before getting here, and a
//! nonsensical query simply resolves to a geometrically distant sample.

use wrf_common::{GridCell, GridError, GridResolver, GridResult};

use crate::table::{DomainIndex, GridSample};

impl DomainIndex {
    /// The sample whose (lat, lon) minimizes `(dlat)^2 + (dlon)^2` against
    /// the query point. Ties break to the first cell in row-major (i, then
    /// j) order. Returns None only when the index is empty.
    pub fn nearest_sample(&self, lat: f64, lon: f64) -> Option<&GridSample> {
        let side = self
            .rows()
            .iter()
            .map(|s| s.i.max(s.j))
            .max()
            .filter(|&m| m >= 0)? as usize
            + 1;

        // Per-cell coordinate matrices; cells with no sample stay None.
        let mut cells: Vec<Option<(f64, f64)>> = vec![None; side * side];
        for sample in self.rows() {
            if sample.i >= 0 && sample.j >= 0 {
                cells[sample.i as usize * side + sample.j as usize] = Some((sample.lat, sample.lon));
            }
        }

        let mut best: Option<(f64, (i32, i32))> = None;
        for i in 0..side {
            for j in 0..side {
                if let Some((cell_lat, cell_lon)) = cells[i * side + j] {
                    let dist = (lat - cell_lat).powi(2) + (lon - cell_lon).powi(2);
                    if best.map_or(true, |(best_dist, _)| dist < best_dist) {
                        best = Some((dist, (i as i32, j as i32)));
                    }
                }
            }
        }

        let (_, (i, j)) = best?;
        self.sample_at(i, j)
    }
}

impl GridResolver for DomainIndex {
    fn resolve_cell(&self, lat: f64, lon: f64) -> GridResult<GridCell> {
        self.nearest_sample(lat, lon)
            .map(|s| GridCell::new(s.i, s.j))
            .ok_or_else(|| GridError::ServiceUnavailable("reference table not loaded".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::{regular_domain_csv, tile_domain_csv};

    #[test]
    fn test_exact_sample_resolves_to_itself() {
        let index = DomainIndex::parse(&regular_domain_csv(10));
        for probe in [(2, 2), (5, 9), (11, 11)] {
            let sample = index.sample_at(probe.0, probe.1).unwrap().clone();
            let found = index.nearest_sample(sample.lat, sample.lon).unwrap();
            assert_eq!((found.i, found.j), (sample.i, sample.j));
        }
    }

    #[test]
    fn test_nearest_between_cells() {
        let index = DomainIndex::parse(&regular_domain_csv(10));
        // slightly north-east of the (5, 5) sample (lat 44.5, lon -139.5)
        let found = index.nearest_sample(44.52, -139.48).unwrap();
        assert_eq!((found.i, found.j), (5, 5));
    }

    #[test]
    fn test_far_away_query_still_resolves() {
        let index = DomainIndex::parse(&regular_domain_csv(10));
        // nonsense coordinates resolve to the closest corner, never an error
        let found = index.nearest_sample(-90.0, 170.0).unwrap();
        assert_eq!((found.i, found.j), (11, 2));
    }

    #[test]
    fn test_empty_index_returns_none() {
        let index = DomainIndex::empty();
        assert!(index.nearest_sample(50.0, -125.0).is_none());
    }

    #[test]
    fn test_carries_tile_metadata() {
        let index = DomainIndex::parse(&tile_domain_csv(2));
        let sample = index.sample_at(7, 7).unwrap().clone();
        let found = index.nearest_sample(sample.lat, sample.lon).unwrap();
        assert_eq!(found.tile_id, Some(1));
        assert!(found.full_url.is_some());
    }

    #[test]
    fn test_resolver_trait_on_index() {
        let index = DomainIndex::parse(&regular_domain_csv(10));
        let cell = index.resolve_cell(44.5, -139.5).unwrap();
        assert_eq!(cell, GridCell::new(5, 5));

        let empty = DomainIndex::empty();
        assert!(empty.resolve_cell(44.5, -139.5).is_err());
    }
}
