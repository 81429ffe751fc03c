//! Properties every `GridResolver` strategy must satisfy, run against both
//! the analytic Lambert resolver and the table-backed nearest-sample
//! resolver.

use grid_index::DomainIndex;
use projection::LambertGrid;
use wrf_common::{GridCell, GridResolver};

struct Probe {
    resolver: Box<dyn GridResolver>,
    /// lat/lon rectangle the strategy is exercised over
    extent: (f64, f64, f64, f64),
}

fn probes() -> Vec<Probe> {
    let table = DomainIndex::parse(&test_utils::regular_domain_csv(20));
    vec![
        Probe {
            resolver: Box::new(LambertGrid::bc_wrf()),
            extent: (46.0, 58.0, -140.0, -115.0),
        },
        Probe {
            // synthetic table covers lat 44.2..46.1, lon -139.8..-137.9
            resolver: Box::new(table),
            extent: (44.3, 46.0, -139.7, -138.0),
        },
    ]
}

fn sample_points(extent: (f64, f64, f64, f64)) -> Vec<(f64, f64)> {
    let (lat_min, lat_max, lon_min, lon_max) = extent;
    let mut points = Vec::new();
    for a in 0..6 {
        for b in 0..6 {
            let lat = lat_min + (lat_max - lat_min) * a as f64 / 5.0;
            let lon = lon_min + (lon_max - lon_min) * b as f64 / 5.0;
            points.push((lat, lon));
        }
    }
    points
}

#[test]
fn every_strategy_is_total_over_its_extent() {
    for probe in probes() {
        for (lat, lon) in sample_points(probe.extent) {
            probe
                .resolver
                .resolve_cell(lat, lon)
                .unwrap_or_else(|e| panic!("resolver failed at ({}, {}): {}", lat, lon, e));
        }
    }
}

#[test]
fn every_strategy_is_deterministic() {
    for probe in probes() {
        for (lat, lon) in sample_points(probe.extent) {
            let first = probe.resolver.resolve_cell(lat, lon).unwrap();
            let second = probe.resolver.resolve_cell(lat, lon).unwrap();
            assert_eq!(first, second, "at ({}, {})", lat, lon);
        }
    }
}

#[test]
fn i_grows_eastward_and_j_grows_northward() {
    for probe in probes() {
        let (lat_min, lat_max, lon_min, lon_max) = probe.extent;
        let mid_lat = (lat_min + lat_max) / 2.0;
        let mid_lon = (lon_min + lon_max) / 2.0;

        let west: GridCell = probe.resolver.resolve_cell(mid_lat, lon_min).unwrap();
        let east: GridCell = probe.resolver.resolve_cell(mid_lat, lon_max).unwrap();
        assert!(east.i > west.i, "i did not grow eastward: {:?} {:?}", west, east);

        let south = probe.resolver.resolve_cell(lat_min, mid_lon).unwrap();
        let north = probe.resolver.resolve_cell(lat_max, mid_lon).unwrap();
        assert!(north.j > south.j, "j did not grow northward: {:?} {:?}", south, north);
    }
}
