//! Shared service state, built once at startup and read-only afterwards.

use std::collections::BTreeMap;

use grid_index::DomainIndex;
use projection::LambertGrid;
use tile_geometry::{build_tile_groups, TileCorner};

/// Which point-resolution strategy the `/point` route uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolverStrategy {
    /// Nearest sample from the reference table.
    Table,
    /// Closed-form Lambert Conformal inverse mapping.
    Analytic,
}

pub struct AppState {
    /// Full-domain table, drives bounding-range resolution.
    pub domain_index: DomainIndex,
    /// Tile table with tile ids and archive URLs.
    pub tile_index: DomainIndex,
    /// Merged corner polygons, precomputed from the tile table.
    pub tile_groups: BTreeMap<u32, Vec<TileCorner>>,
    pub strategy: ResolverStrategy,
    pub analytic: LambertGrid,
}

impl AppState {
    pub fn new(
        domain_index: DomainIndex,
        tile_index: DomainIndex,
        strategy: ResolverStrategy,
    ) -> Self {
        let tile_groups = build_tile_groups(tile_index.rows());
        Self {
            domain_index,
            tile_index,
            tile_groups,
            strategy,
            analytic: LambertGrid::bc_wrf(),
        }
    }
}
