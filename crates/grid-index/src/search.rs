//! Boundary search over the reference table.
//!
//! A bounding query is resolved in two passes. The first pass finds j
//! bounds against the whole table, then i bounds along the resolved minimum
//! j row. The second pass re-resolves the j bounds constrained to the i
//! range, tightening the result.
//!
//! Both i bounds are read from the minimum-j row rather than using the
//! maximum-j row for the eastern bound. The grid's rows curve relative to
//! lines of latitude, so the boundary columns are identified from a single
//! reference row; this matches the production behavior and must not be
//! "fixed" without validating against the real table.

use wrf_common::{BoundingQuery, ResolvedRange, MAX_I, MAX_J, MIN_INDEX};

use crate::table::DomainIndex;

/// Longitude sentinels bracketing every real longitude value.
const LON_LOW_SENTINEL: f64 = -200.0;
const LON_HIGH_SENTINEL: f64 = 200.0;

/// The index window a row scan is constrained to.
///
/// Passing the window as named fields keeps the four-bound contract
/// unambiguous at every call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanWindow {
    pub j_low: i32,
    pub j_high: i32,
    pub i_low: i32,
    pub i_high: i32,
}

impl ScanWindow {
    /// The whole grid.
    pub fn full() -> Self {
        Self {
            j_low: MIN_INDEX,
            j_high: MAX_J,
            i_low: MIN_INDEX,
            i_high: MAX_I,
        }
    }
}

impl DomainIndex {
    /// Largest j whose row lies entirely south of `target_lat`, within the
    /// window. A row qualifies only if it has at least one sample in the i
    /// range and every such sample's latitude is strictly below the target.
    /// Defaults to 2 when nothing qualifies above it.
    pub fn resolve_min_j(&self, target_lat: f64, window: ScanWindow) -> i32 {
        let mut min_j = MIN_INDEX;

        for j_scan in window.j_low..=window.j_high {
            let mut populated = false;
            let mut in_domain = true;

            for sample in self.rows_at_j(j_scan) {
                if sample.i < window.i_low || sample.i > window.i_high {
                    continue;
                }
                populated = true;
                if sample.lat >= target_lat {
                    in_domain = false;
                    break;
                }
            }

            if populated && in_domain && j_scan > min_j {
                min_j = j_scan;
            }
        }
        min_j
    }

    /// Smallest j whose row lies entirely north of `target_lat`, within the
    /// window. Defaults to MAX_J when nothing qualifies below it.
    pub fn resolve_max_j(&self, target_lat: f64, window: ScanWindow) -> i32 {
        let mut max_j = MAX_J;

        for j_scan in window.j_low..=window.j_high {
            let mut populated = false;
            let mut in_domain = true;

            for sample in self.rows_at_j(j_scan) {
                if sample.i < window.i_low || sample.i > window.i_high {
                    continue;
                }
                populated = true;
                if sample.lat <= target_lat {
                    in_domain = false;
                    break;
                }
            }

            if populated && in_domain && j_scan < max_j {
                max_j = j_scan;
            }
        }
        max_j
    }

    /// Along the fixed j row, the i of the sample with the greatest
    /// longitude still west of `target_lon`. Defaults to 2.
    pub fn resolve_min_i(&self, target_lon: f64, j_fixed: i32) -> i32 {
        let mut min_i = MIN_INDEX;
        let mut best_lon = LON_LOW_SENTINEL;

        for sample in self.rows_at_j(j_fixed) {
            if sample.lon > best_lon && sample.lon < target_lon {
                best_lon = sample.lon;
                min_i = sample.i;
            }
        }
        min_i
    }

    /// Along the fixed j row, the i of the sample with the least longitude
    /// still east of `target_lon`. Defaults to 2.
    pub fn resolve_max_i(&self, target_lon: f64, j_fixed: i32) -> i32 {
        let mut max_i = MIN_INDEX;
        let mut best_lon = LON_HIGH_SENTINEL;

        for sample in self.rows_at_j(j_fixed) {
            if sample.lon < best_lon && sample.lon > target_lon {
                best_lon = sample.lon;
                max_i = sample.i;
            }
        }
        max_i
    }

    /// Resolve the minimal enclosing tile-index range for a bounding query.
    ///
    /// An empty (degraded) index serves the full-domain default range so
    /// callers degrade to "whole grid" rather than an error.
    pub fn resolve_bounding_range(&self, query: &BoundingQuery) -> ResolvedRange {
        if self.is_empty() {
            return ResolvedRange::full_domain();
        }

        // First pass: j bounds over the whole grid, then i bounds along the
        // minimum-j row.
        let min_j = self.resolve_min_j(query.bottom_left_lat, ScanWindow::full());
        let max_j = self.resolve_max_j(
            query.top_right_lat,
            ScanWindow {
                j_low: min_j,
                j_high: MAX_J,
                i_low: MIN_INDEX,
                i_high: MAX_I,
            },
        );
        let min_i = self.resolve_min_i(query.bottom_left_lon, min_j);
        let max_i = self.resolve_max_i(query.top_right_lon, min_j);

        // Second pass: re-resolve j constrained to the i range.
        let window = ScanWindow {
            j_low: min_j,
            j_high: max_j,
            i_low: min_i,
            i_high: max_i,
        };
        let min_j = self.resolve_min_j(query.bottom_left_lat, window);
        let max_j = self.resolve_max_j(query.top_right_lat, ScanWindow { j_low: min_j, ..window });

        ResolvedRange::new(min_i, max_i, min_j, max_j)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::DomainIndex;
    use test_utils::{regular_domain_csv, DomainTableBuilder};

    /// The sparse two-row scenario: j=10 entirely at 48.0, j=20 entirely
    /// at 49.0.
    fn sparse_index() -> DomainIndex {
        let mut builder = DomainTableBuilder::new();
        for i in (2..=50).step_by(2) {
            builder = builder.row(i, 10, 48.0, -132.0 + 0.1 * i as f64);
        }
        for i in (2..=50).step_by(2) {
            builder = builder.row(i, 20, 49.0, -132.0 + 0.1 * i as f64);
        }
        DomainIndex::parse(&builder.build())
    }

    #[test]
    fn test_min_j_sparse_scenario() {
        let index = sparse_index();
        assert_eq!(index.resolve_min_j(48.5, ScanWindow::full()), 10);
    }

    #[test]
    fn test_max_j_sparse_scenario() {
        let index = sparse_index();
        assert_eq!(index.resolve_max_j(48.5, ScanWindow::full()), 20);
    }

    #[test]
    fn test_min_j_defaults_when_nothing_below() {
        let index = sparse_index();
        // every populated row has samples at or above 47.0
        assert_eq!(index.resolve_min_j(47.0, ScanWindow::full()), 2);
    }

    #[test]
    fn test_max_j_defaults_when_nothing_above() {
        let index = sparse_index();
        assert_eq!(index.resolve_max_j(50.0, ScanWindow::full()), MAX_J);
    }

    #[test]
    fn test_min_j_monotonic_in_latitude() {
        let index = DomainIndex::parse(&regular_domain_csv(20));
        let mut previous = MIN_INDEX;
        for step in 0..30 {
            let lat = 44.0 + 0.1 * step as f64;
            let resolved = index.resolve_min_j(lat, ScanWindow::full());
            assert!(
                resolved >= previous,
                "min_j decreased from {} to {} at lat {}",
                previous,
                resolved,
                lat
            );
            previous = resolved;
        }
    }

    #[test]
    fn test_max_j_monotonic_in_latitude() {
        let index = DomainIndex::parse(&regular_domain_csv(20));
        let mut previous = MAX_J;
        for step in (0..30).rev() {
            let lat = 44.0 + 0.1 * step as f64;
            let resolved = index.resolve_max_j(lat, ScanWindow::full());
            assert!(
                resolved <= previous,
                "max_j increased from {} to {} at lat {}",
                previous,
                resolved,
                lat
            );
            previous = resolved;
        }
    }

    #[test]
    fn test_min_i_tracks_best_longitude() {
        // regular domain: lon = -140 + 0.1 * i on every row
        let index = DomainIndex::parse(&regular_domain_csv(20));
        // target -138.95: best lon below it is -139.0 at i = 10
        assert_eq!(index.resolve_min_i(-138.95, 2), 10);
        // nothing west of the westernmost sample
        assert_eq!(index.resolve_min_i(-139.9, 2), MIN_INDEX);
    }

    #[test]
    fn test_max_i_tracks_best_longitude() {
        let index = DomainIndex::parse(&regular_domain_csv(20));
        // target -138.95: least lon above it is -138.9 at i = 11
        assert_eq!(index.resolve_max_i(-138.95, 2), 11);
        // nothing east of the easternmost sample falls back to the default
        assert_eq!(index.resolve_max_i(-100.0, 2), MIN_INDEX);
    }

    #[test]
    fn test_bounding_range_ordering() {
        let index = DomainIndex::parse(&regular_domain_csv(20));
        let query = wrf_common::BoundingQuery::new(44.55, -139.55, 45.75, -138.35);
        let range = index.resolve_bounding_range(&query);
        assert!(range.min_i <= range.max_i, "range: {:?}", range);
        assert!(range.min_j <= range.max_j, "range: {:?}", range);
    }

    #[test]
    fn test_bounding_range_expected_rows() {
        let index = DomainIndex::parse(&regular_domain_csv(20));
        // lat = 44 + 0.1j, lon = -140 + 0.1i, i and j in 2..=21.
        // Southern boundary 44.55 -> rows up to j=5 (44.5) are below it.
        // Northern boundary 45.75 -> rows from j=18 (45.8) are above it.
        let query = wrf_common::BoundingQuery::new(44.55, -139.55, 45.75, -138.35);
        let range = index.resolve_bounding_range(&query);
        assert_eq!(range.min_j, 5);
        assert_eq!(range.max_j, 18);
        // Western boundary -139.55 -> best lon below is -139.6 at i=4.
        // Eastern boundary -138.35 -> least lon above is -138.3 at i=17.
        assert_eq!(range.min_i, 4);
        assert_eq!(range.max_i, 17);
    }

    #[test]
    fn test_bounding_range_idempotent() {
        let index = DomainIndex::parse(&regular_domain_csv(20));
        let query = wrf_common::BoundingQuery::new(44.8, -139.2, 45.4, -138.6);
        let first = index.resolve_bounding_range(&query);
        let second = index.resolve_bounding_range(&query);
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_index_serves_full_domain() {
        let index = DomainIndex::empty();
        let query = wrf_common::BoundingQuery::new(49.0, -125.0, 51.0, -120.0);
        assert_eq!(
            index.resolve_bounding_range(&query),
            ResolvedRange::full_domain()
        );
    }
}
