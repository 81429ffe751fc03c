//! Common types shared across the wrf-tile services.

pub mod error;
pub mod geo;
pub mod resolver;
pub mod tile;

pub use error::{GridError, GridResult};
pub use geo::{BoundingQuery, LatLon, APP_EXTENT};
pub use resolver::{GridCell, GridResolver};
pub use tile::{ceil_tile_index, floor_tile_index, ResolvedRange, MAX_I, MAX_J, MIN_INDEX, TILE_SPAN};
