//! Monthly tile-archive manifest generation.
//!
//! Tile archives are named by the (i, j) range of the 10x10 tile they
//! cover and the month they belong to:
//! `x{i1:03}y{j1:03}x{i2:03}y{j2:03}.{yyyy}{mm}.10x10.m3d.7z`.
//! A manifest enumerates every archive covering a resolved index range for
//! every month in a requested span.

use chrono::NaiveDate;
use tracing::warn;

use wrf_common::{floor_tile_index, GridError, GridResult, ResolvedRange, TILE_SPAN};

/// Hard cap on manifest length; a whole-domain multi-year request would
/// otherwise enumerate tens of thousands of archives.
pub const MAX_MANIFEST_ENTRIES: usize = 500;

/// An inclusive span of calendar months.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthRange {
    pub start_year: i32,
    pub start_month: u32,
    pub end_year: i32,
    pub end_month: u32,
}

impl MonthRange {
    /// Validate the months and ordering.
    pub fn validate(&self) -> GridResult<()> {
        for (param, year, month) in [
            ("start", self.start_year, self.start_month),
            ("end", self.end_year, self.end_month),
        ] {
            if NaiveDate::from_ymd_opt(year, month, 1).is_none() {
                return Err(GridError::InvalidParameter {
                    param: param.to_string(),
                    message: format!("{}-{:02} is not a calendar month", year, month),
                });
            }
        }
        if (self.start_year, self.start_month) > (self.end_year, self.end_month) {
            return Err(GridError::InvalidParameter {
                param: "end".to_string(),
                message: "end month precedes start month".to_string(),
            });
        }
        Ok(())
    }

    /// Every (year, month) in the span, in order.
    fn months(&self) -> Vec<(i32, u32)> {
        let mut months = Vec::new();
        let (mut year, mut month) = (self.start_year, self.start_month);
        while (year, month) <= (self.end_year, self.end_month) {
            months.push((year, month));
            month += 1;
            if month > 12 {
                month = 1;
                year += 1;
            }
        }
        months
    }
}

/// Archive name for the tile whose lower boundary is (i1, j1). The upper
/// corner is the inclusive top cell of the 10x10 tile, nine cells up.
fn archive_name(i1: i32, j1: i32, year: i32, month: u32) -> String {
    format!(
        "x{:03}y{:03}x{:03}y{:03}.{}{:02}.10x10.m3d.7z",
        i1,
        j1,
        i1 + TILE_SPAN - 1,
        j1 + TILE_SPAN - 1,
        year,
        month
    )
}

/// An enumerated manifest, with the truncation fact carried alongside the
/// names rather than inferred from their count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    pub archives: Vec<String>,
    pub truncated: bool,
}

/// Enumerate archive names covering `range` for every month in `months`.
///
/// The range's minimum indices are snapped down to tile boundaries, then
/// tiles are stepped by 10 on both axes up to and including the maxima.
/// The list is capped at [`MAX_MANIFEST_ENTRIES`].
pub fn build_manifest(range: &ResolvedRange, months: &MonthRange) -> GridResult<Manifest> {
    months.validate()?;

    let i_start = floor_tile_index(range.min_i);
    let j_start = floor_tile_index(range.min_j);

    let mut archives = Vec::new();
    let mut truncated = false;
    'months: for (year, month) in months.months() {
        let mut j = j_start;
        while j <= range.max_j {
            let mut i = i_start;
            while i <= range.max_i {
                if archives.len() >= MAX_MANIFEST_ENTRIES {
                    warn!(
                        cap = MAX_MANIFEST_ENTRIES,
                        "Manifest truncated at entry cap"
                    );
                    truncated = true;
                    break 'months;
                }
                archives.push(archive_name(i, j, year, month));
                i += TILE_SPAN;
            }
            j += TILE_SPAN;
        }
    }
    Ok(Manifest {
        archives,
        truncated,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn one_month() -> MonthRange {
        MonthRange {
            start_year: 2024,
            start_month: 1,
            end_year: 2024,
            end_month: 1,
        }
    }

    #[test]
    fn test_single_tile_single_month() {
        let range = ResolvedRange::new(2, 11, 2, 11);
        let manifest = build_manifest(&range, &one_month()).unwrap();
        // the upper corner names the tile's inclusive top cell, nine up
        assert_eq!(
            manifest.archives,
            vec!["x002y002x011y011.202401.10x10.m3d.7z"]
        );
        assert!(!manifest.truncated);
    }

    #[test]
    fn test_min_indices_snap_to_tile_boundary() {
        // minima inside a tile snap down to the enclosing boundary
        let range = ResolvedRange::new(15, 25, 27, 33);
        let manifest = build_manifest(&range, &one_month()).unwrap();
        assert_eq!(
            manifest.archives,
            vec![
                "x012y022x021y031.202401.10x10.m3d.7z",
                "x022y022x031y031.202401.10x10.m3d.7z",
                "x012y032x021y041.202401.10x10.m3d.7z",
                "x022y032x031y041.202401.10x10.m3d.7z",
            ]
        );
    }

    #[test]
    fn test_month_stepping_is_inclusive_across_year_end() {
        let range = ResolvedRange::new(2, 11, 2, 11);
        let months = MonthRange {
            start_year: 2023,
            start_month: 11,
            end_year: 2024,
            end_month: 2,
        };
        let manifest = build_manifest(&range, &months).unwrap();
        assert_eq!(manifest.archives.len(), 4);
        assert_eq!(manifest.archives[0], "x002y002x011y011.202311.10x10.m3d.7z");
        assert_eq!(manifest.archives[3], "x002y002x011y011.202402.10x10.m3d.7z");
    }

    #[test]
    fn test_entry_cap() {
        // the whole domain in one month is 48 x 43 tiles, well over the cap
        let range = ResolvedRange::full_domain();
        let manifest = build_manifest(&range, &one_month()).unwrap();
        assert_eq!(manifest.archives.len(), MAX_MANIFEST_ENTRIES);
        assert!(manifest.truncated);
    }

    #[test]
    fn test_exactly_full_manifest_is_not_truncated() {
        // 25 tiles along i (2..=242) x 20 along j (2..=192) = 500 exactly
        let range = ResolvedRange::new(2, 242, 2, 192);
        let manifest = build_manifest(&range, &one_month()).unwrap();
        assert_eq!(manifest.archives.len(), MAX_MANIFEST_ENTRIES);
        assert!(!manifest.truncated);
    }

    #[test]
    fn test_invalid_month_rejected() {
        let range = ResolvedRange::new(2, 11, 2, 11);
        let months = MonthRange {
            start_year: 2024,
            start_month: 13,
            end_year: 2024,
            end_month: 13,
        };
        let err = build_manifest(&range, &months).unwrap_err();
        assert!(matches!(err, GridError::InvalidParameter { .. }));
    }

    #[test]
    fn test_reversed_months_rejected() {
        let range = ResolvedRange::new(2, 11, 2, 11);
        let months = MonthRange {
            start_year: 2024,
            start_month: 6,
            end_year: 2024,
            end_month: 1,
        };
        assert!(build_manifest(&range, &months).is_err());
    }
}
