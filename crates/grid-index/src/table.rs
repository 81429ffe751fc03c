//! Reference table parsing and row storage.

use std::collections::HashMap;
use std::ops::Range;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Metadata lines preceding the data rows in the reference CSV.
const METADATA_LINES: usize = 3;

/// One row of the reference table.
///
/// The bounding-search table (`domaininfo_bcwrf.csv`) carries only
/// `I,J,LAT,LON`; the tile table (`tile_domain_info.csv`) adds the tile id,
/// archive filename, and object-store URL, so those columns are optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridSample {
    pub i: i32,
    pub j: i32,
    pub lat: f64,
    pub lon: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tile_id: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_url: Option<String>,
}

impl GridSample {
    fn parse_line(line: &str) -> Result<Self, String> {
        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        if fields.len() < 4 {
            return Err(format!("expected at least 4 columns, got {}", fields.len()));
        }

        let i = fields[0]
            .parse::<i32>()
            .map_err(|e| format!("bad I '{}': {}", fields[0], e))?;
        let j = fields[1]
            .parse::<i32>()
            .map_err(|e| format!("bad J '{}': {}", fields[1], e))?;
        let lat = fields[2]
            .parse::<f64>()
            .map_err(|e| format!("bad LAT '{}': {}", fields[2], e))?;
        let lon = fields[3]
            .parse::<f64>()
            .map_err(|e| format!("bad LON '{}': {}", fields[3], e))?;

        let tile_id = match fields.get(4) {
            Some(f) if !f.is_empty() => Some(
                f.parse::<u32>()
                    .map_err(|e| format!("bad TILE_ID '{}': {}", f, e))?,
            ),
            _ => None,
        };
        let filename = fields
            .get(5)
            .filter(|f| !f.is_empty())
            .map(|f| f.to_string());
        let full_url = fields
            .get(6)
            .filter(|f| !f.is_empty())
            .map(|f| f.to_string());

        Ok(Self {
            i,
            j,
            lat,
            lon,
            tile_id,
            filename,
            full_url,
        })
    }
}

/// The loaded reference table plus its lookup structures.
///
/// Rows keep file order (ascending j, rows per j contiguous). A span index
/// over contiguous runs of equal j lets row scans touch only the candidate
/// row instead of the whole table.
#[derive(Debug, Default)]
pub struct DomainIndex {
    rows: Vec<GridSample>,
    j_spans: Vec<(i32, Range<usize>)>,
    by_pair: HashMap<(i32, i32), usize>,
    skipped_rows: usize,
}

impl DomainIndex {
    /// An index with no rows. Queries against it degrade to the full-domain
    /// defaults instead of failing.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse reference CSV content. The first three lines are metadata and
    /// are skipped; malformed data rows are dropped and counted, never
    /// silently coerced.
    pub fn parse(content: &str) -> Self {
        let mut rows = Vec::new();
        let mut skipped = 0usize;

        for (line_no, line) in content.lines().enumerate().skip(METADATA_LINES) {
            if line.trim().is_empty() {
                continue;
            }
            match GridSample::parse_line(line) {
                Ok(sample) => rows.push(sample),
                Err(message) => {
                    skipped += 1;
                    warn!(line = line_no + 1, %message, "Skipping malformed reference row");
                }
            }
        }

        let index = Self::from_rows(rows, skipped);
        info!(
            rows = index.rows.len(),
            skipped = index.skipped_rows,
            "Loaded reference table"
        );
        index
    }

    fn from_rows(rows: Vec<GridSample>, skipped_rows: usize) -> Self {
        let mut j_spans: Vec<(i32, Range<usize>)> = Vec::new();
        let mut by_pair = HashMap::with_capacity(rows.len());

        for (idx, sample) in rows.iter().enumerate() {
            match j_spans.last_mut() {
                Some((j, span)) if *j == sample.j && span.end == idx => span.end = idx + 1,
                _ => j_spans.push((sample.j, idx..idx + 1)),
            }
            by_pair.entry((sample.i, sample.j)).or_insert(idx);
        }

        Self {
            rows,
            j_spans,
            by_pair,
            skipped_rows,
        }
    }

    pub fn rows(&self) -> &[GridSample] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Malformed rows dropped during parsing.
    pub fn skipped_rows(&self) -> usize {
        self.skipped_rows
    }

    /// Look up the sample at an exact (i, j) pair. When the source file
    /// repeats a pair, the first occurrence wins.
    pub fn sample_at(&self, i: i32, j: i32) -> Option<&GridSample> {
        self.by_pair.get(&(i, j)).map(|&idx| &self.rows[idx])
    }

    /// Iterate every sample with the given j, in file order.
    pub(crate) fn rows_at_j(&self, j: i32) -> impl Iterator<Item = &GridSample> {
        self.j_spans
            .iter()
            .filter(move |(span_j, _)| *span_j == j)
            .flat_map(|(_, span)| self.rows[span.clone()].iter())
    }
}
