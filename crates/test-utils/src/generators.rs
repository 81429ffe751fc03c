//! Synthetic reference-table generators.
//!
//! The real BC-WRF reference tables are large CSV files; tests build small
//! tables with known geometry instead. Latitude grows with j and longitude
//! grows with i, which makes expected index ranges easy to compute by hand.

use std::fmt::Write;

/// Builder for a reference table in the `I,J,LAT,LON` format with the
/// three metadata lines the production file carries.
#[derive(Debug, Default)]
pub struct DomainTableBuilder {
    rows: Vec<String>,
}

impl DomainTableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a 4-column row.
    pub fn row(mut self, i: i32, j: i32, lat: f64, lon: f64) -> Self {
        self.rows.push(format!("{},{},{},{}", i, j, lat, lon));
        self
    }

    /// Append a 7-column row carrying tile metadata.
    pub fn tile_row(
        mut self,
        i: i32,
        j: i32,
        lat: f64,
        lon: f64,
        tile_id: u32,
        filename: &str,
        full_url: &str,
    ) -> Self {
        self.rows.push(format!(
            "{},{},{},{},{},{},{}",
            i, j, lat, lon, tile_id, filename, full_url
        ));
        self
    }

    /// Append a raw line verbatim (for malformed-row tests).
    pub fn raw_line(mut self, line: &str) -> Self {
        self.rows.push(line.to_string());
        self
    }

    /// Render the table with metadata preamble.
    pub fn build(self) -> String {
        let mut out = String::from("BC-WRF domain reference table\ngenerated for tests\nI,J,LAT,LON\n");
        for row in &self.rows {
            writeln!(out, "{}", row).unwrap();
        }
        out
    }
}

/// A regular square domain of side `n`: indices run 2..=(n + 1), latitude
/// is constant along each j row and increases with j, longitude increases
/// with i.
pub fn regular_domain_csv(n: i32) -> String {
    let mut builder = DomainTableBuilder::new();
    for j in 2..=(n + 1) {
        for i in 2..=(n + 1) {
            let lat = 44.0 + 0.1 * j as f64;
            let lon = -140.0 + 0.1 * i as f64;
            builder = builder.row(i, j, lat, lon);
        }
    }
    builder.build()
}

/// A square domain of `tiles_per_side` x `tiles_per_side` tiles of 10x10
/// cells each, with tile ids, filenames, and URLs filled in. Indices start
/// at 2 as in the production table.
pub fn tile_domain_csv(tiles_per_side: i32) -> String {
    let side = tiles_per_side * 10;
    let mut builder = DomainTableBuilder::new();
    for j in 2..(2 + side) {
        for i in 2..(2 + side) {
            let tile_col = (i - 2) / 10;
            let tile_row = (j - 2) / 10;
            let tile_id = (tile_row * tiles_per_side + tile_col + 1) as u32;
            let lat = 44.0 + 0.01 * j as f64;
            let lon = -140.0 + 0.01 * i as f64;
            let filename = format!("tile_{:04}.m3d.7z", tile_id);
            let full_url = format!("https://objectstore.example/wrf/{}", filename);
            builder = builder.tile_row(i, j, lat, lon, tile_id, &filename, &full_url);
        }
    }
    builder.build()
}
