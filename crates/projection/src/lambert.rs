//! Lambert Conformal Conic inverse mapping.
//!
//! Maps geographic coordinates onto the model's native grid using the
//! single-cone formulation: a cone constant derived from the two true
//! latitudes, a pole radius computed from the known grid cell (1,1), and a
//! polar-coordinate inverse for the query point. Latitude/longitude inputs
//! are degrees; all trigonometry is done in radians.

use std::f64::consts::PI;

use wrf_common::{GridCell, GridResolver, GridResult};

const RAD_PER_DEG: f64 = PI / 180.0;

/// Latitude difference below which the two true latitudes are treated as a
/// tangent cone.
const TANGENT_CONE_THRESHOLD_DEG: f64 = 0.1;

/// Half-cell bias subtracted from the raw fractional index before rounding.
/// Applied on both axes; the production grid numbering depends on it.
const INDEX_ROUND_BIAS: f64 = 0.1;

/// Fixed Lambert Conformal parameters for one deployment of the grid.
///
/// `truelat1` must not be ±90°; that is a configuration invariant of the
/// deployment constants, not a runtime check.
#[derive(Debug, Clone)]
pub struct LambertGridParams {
    /// Grid spacing in meters at the true latitudes.
    pub dx: f64,
    /// Longitude parallel to the y-axis, degrees.
    pub stdlon: f64,
    /// First true latitude, degrees.
    pub truelat1: f64,
    /// Second true latitude, degrees.
    pub truelat2: f64,
    /// Latitude of the known grid cell, degrees.
    pub known_lat: f64,
    /// Longitude of the known grid cell, degrees.
    pub known_lon: f64,
    /// I-location of the known lat/lon.
    pub known_i: f64,
    /// J-location of the known lat/lon.
    pub known_j: f64,
    /// Radius of the spherical earth, meters.
    pub earth_radius: f64,
    /// +1 for northern hemisphere, -1 for southern.
    pub hemi: f64,
}

impl LambertGridParams {
    /// The BC-WRF 4 km deployment grid.
    pub fn bc_wrf() -> Self {
        Self {
            dx: 4000.0,
            stdlon: -125.0,
            truelat1: 46.5,
            truelat2: 63.5,
            known_lat: 46.3873596,
            known_lon: -137.7155914,
            known_i: 1.0,
            known_j: 1.0,
            earth_radius: 6_370_000.0,
            hemi: 1.0,
        }
    }
}

/// Analytic resolver for a Lambert Conformal grid.
///
/// The derived quantities (cone constant, pole radius and offsets) are
/// computed once at construction and immutable afterwards.
#[derive(Debug, Clone)]
pub struct LambertGrid {
    params: LambertGridParams,
    cone: f64,
    rebydx: f64,
    pole_i: f64,
    pole_j: f64,
}

impl LambertGrid {
    /// Resolver for the fixed BC-WRF deployment.
    pub fn bc_wrf() -> Self {
        Self::new(LambertGridParams::bc_wrf())
    }

    pub fn new(params: LambertGridParams) -> Self {
        let cone = cone_constant(params.truelat1, params.truelat2);
        let rebydx = params.earth_radius / params.dx;
        let hemi = params.hemi;

        let delta_lon = normalize_lon_delta(params.known_lon - params.stdlon);
        let ctl1r = (params.truelat1 * RAD_PER_DEG).cos();

        // Radius from the pole to the known grid cell, in grid lengths.
        let rsw = rebydx * ctl1r / cone
            * (((90.0 * hemi - params.known_lat) * RAD_PER_DEG / 2.0).tan()
                / ((90.0 * hemi - hemi * params.truelat1) * RAD_PER_DEG / 2.0).tan())
            .powf(cone);

        let arg = cone * delta_lon * RAD_PER_DEG;
        let pole_i = hemi * params.known_i - hemi * rsw * arg.sin();
        let pole_j = hemi * params.known_j + rsw * arg.cos();

        Self {
            params,
            cone,
            rebydx,
            pole_i,
            pole_j,
        }
    }

    pub fn params(&self) -> &LambertGridParams {
        &self.params
    }

    /// Cone constant n of the projection.
    pub fn cone(&self) -> f64 {
        self.cone
    }

    /// Raw fractional grid coordinates for a point, before the rounding
    /// bias is applied.
    pub fn fractional_ij(&self, lat: f64, lon: f64) -> (f64, f64) {
        let hemi = self.params.hemi;
        let delta_lon = normalize_lon_delta(lon - self.params.stdlon);
        let ctl1r = (self.params.truelat1 * RAD_PER_DEG).cos();

        let rm = self.rebydx * ctl1r / self.cone
            * (((90.0 * hemi - lat) * RAD_PER_DEG / 2.0).tan()
                / ((90.0 * hemi - hemi * self.params.truelat1) * RAD_PER_DEG / 2.0).tan())
            .powf(self.cone);

        let arg = self.cone * delta_lon * RAD_PER_DEG;
        let i = self.pole_i + hemi * rm * arg.sin();
        let j = self.pole_j - rm * arg.cos();

        (hemi * i, hemi * j)
    }

    /// The grid cell covering a point.
    pub fn cell_for(&self, lat: f64, lon: f64) -> GridCell {
        let (i, j) = self.fractional_ij(lat, lon);
        GridCell::new(
            (i - INDEX_ROUND_BIAS).round() as i32,
            (j - INDEX_ROUND_BIAS).round() as i32,
        )
    }
}

impl GridResolver for LambertGrid {
    fn resolve_cell(&self, lat: f64, lon: f64) -> GridResult<GridCell> {
        Ok(self.cell_for(lat, lon))
    }
}

/// Cone constant from the two true latitudes. Latitudes closer together
/// than 0.1° collapse to the tangent case. Absolute latitudes are used so
/// the same formula serves both hemispheres.
fn cone_constant(truelat1: f64, truelat2: f64) -> f64 {
    if (truelat1 - truelat2).abs() > TANGENT_CONE_THRESHOLD_DEG {
        let t1 = truelat1.abs();
        let t2 = truelat2.abs();
        let numerator = (t1 * RAD_PER_DEG).cos().ln() - (t2 * RAD_PER_DEG).cos().ln();
        let denominator = ((45.0 - t1 / 2.0) * RAD_PER_DEG).tan().ln()
            - ((45.0 - t2 / 2.0) * RAD_PER_DEG).tan().ln();
        numerator / denominator
    } else {
        (truelat1.abs() * RAD_PER_DEG).sin()
    }
}

/// Normalize a longitude difference to (-180, 180].
fn normalize_lon_delta(mut delta: f64) -> f64 {
    while delta > 180.0 {
        delta -= 360.0;
    }
    while delta <= -180.0 {
        delta += 360.0;
    }
    delta
}
