//! In-memory spatial index over the BC-WRF reference table.
//!
//! The reference table maps every model grid cell (i, j) to its
//! latitude/longitude. Rows of constant j do not follow lines of constant
//! latitude because the grid is curvilinear, so bounding queries are
//! answered by scanning candidate rows rather than by arithmetic.
//!
//! The index is built once at startup and is read-only afterwards; queries
//! take `&self` and the whole structure is `Send + Sync`.

pub mod nearest;
pub mod search;
pub mod table;

pub use search::ScanWindow;
pub use table::{DomainIndex, GridSample};
