//! HTTP routes for the grid coordinate API.
//!
//! Coordinate validation against the application extent happens here, at
//! the service boundary. The resolution crates accept any coordinates.

use std::sync::Arc;

use axum::{
    extract::{Extension, Query},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use wrf_common::{BoundingQuery, GridError, GridResolver, ResolvedRange, APP_EXTENT};

use crate::manifest::{self, MonthRange};
use crate::state::{AppState, ResolverStrategy};

// ============================================================================
// Request / Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct PointQuery {
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestQuery {
    pub bottom_left_lat: f64,
    pub bottom_left_lon: f64,
    pub top_right_lat: f64,
    pub top_right_lon: f64,
    pub start_year: i32,
    pub start_month: u32,
    pub end_year: i32,
    pub end_month: u32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestResponse {
    pub range: ResolvedRange,
    pub count: usize,
    pub truncated: bool,
    pub archives: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CellResponse {
    pub i: i32,
    pub j: i32,
}

// ============================================================================
// Error Mapping
// ============================================================================

/// Wrapper turning a `GridError` into an HTTP response with the error's
/// status code and a JSON body.
pub struct ApiError(GridError);

impl From<GridError> for ApiError {
    fn from(err: GridError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(serde_json::json!({ "error": self.0.to_string() }))).into_response()
    }
}

// ============================================================================
// Validation
// ============================================================================

fn validate_point(lat: f64, lon: f64) -> Result<(), GridError> {
    if !APP_EXTENT.contains(lat, lon) {
        return Err(GridError::InvalidParameter {
            param: "lat/lon".to_string(),
            message: format!("({}, {}) is outside the supported region", lat, lon),
        });
    }
    Ok(())
}

fn validate_bounding_query(query: &BoundingQuery) -> Result<(), GridError> {
    if !query.is_ordered() {
        return Err(GridError::InvalidParameter {
            param: "boundingQuery".to_string(),
            message: "bottom-left corner must be south and west of top-right".to_string(),
        });
    }
    validate_point(query.bottom_left_lat, query.bottom_left_lon)?;
    validate_point(query.top_right_lat, query.top_right_lon)?;
    Ok(())
}

// ============================================================================
// Router
// ============================================================================

pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/range", post(range_handler))
        .route("/point", get(point_handler))
        .route("/corners", get(corners_handler))
        .route("/manifest", get(manifest_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(Extension(state))
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /range - Resolve a bounding region to its enclosing index range
async fn range_handler(
    Extension(state): Extension<Arc<AppState>>,
    Json(query): Json<BoundingQuery>,
) -> Result<Json<ResolvedRange>, ApiError> {
    validate_bounding_query(&query)?;
    Ok(Json(state.domain_index.resolve_bounding_range(&query)))
}

/// GET /point?lat=..&lon=.. - Resolve a single point
///
/// The table strategy answers with the nearest reference sample including
/// its tile metadata; the analytic strategy answers with the computed cell.
async fn point_handler(
    Extension(state): Extension<Arc<AppState>>,
    Query(params): Query<PointQuery>,
) -> Result<Response, ApiError> {
    let lat = params
        .lat
        .ok_or_else(|| GridError::MissingParameter("lat".to_string()))?;
    let lon = params
        .lon
        .ok_or_else(|| GridError::MissingParameter("lon".to_string()))?;
    validate_point(lat, lon)?;

    match state.strategy {
        ResolverStrategy::Analytic => {
            let cell = state.analytic.resolve_cell(lat, lon)?;
            Ok(Json(CellResponse {
                i: cell.i,
                j: cell.j,
            })
            .into_response())
        }
        ResolverStrategy::Table => {
            // prefer the tile table for its archive metadata
            let index = if state.tile_index.is_empty() {
                &state.domain_index
            } else {
                &state.tile_index
            };
            let sample = index.nearest_sample(lat, lon).ok_or_else(|| {
                GridError::ServiceUnavailable("no reference table loaded".to_string())
            })?;
            Ok(Json(sample).into_response())
        }
    }
}

/// GET /corners - Merged tile-corner polygons keyed by tile id
async fn corners_handler(Extension(state): Extension<Arc<AppState>>) -> impl IntoResponse {
    Json(state.tile_groups.clone())
}

/// GET /manifest - Tile archive names for a region and month span
async fn manifest_handler(
    Extension(state): Extension<Arc<AppState>>,
    Query(params): Query<ManifestQuery>,
) -> Result<Json<ManifestResponse>, ApiError> {
    let query = BoundingQuery::new(
        params.bottom_left_lat,
        params.bottom_left_lon,
        params.top_right_lat,
        params.top_right_lon,
    );
    validate_bounding_query(&query)?;

    let months = MonthRange {
        start_year: params.start_year,
        start_month: params.start_month,
        end_year: params.end_year,
        end_month: params.end_month,
    };

    let range = state.domain_index.resolve_bounding_range(&query);
    let manifest = manifest::build_manifest(&range, &months)?;

    Ok(Json(ManifestResponse {
        range,
        count: manifest.archives.len(),
        truncated: manifest.truncated,
        archives: manifest.archives,
    }))
}

/// GET /health - Health check endpoint
async fn health_handler(Extension(state): Extension<Arc<AppState>>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "grid-api",
        "domainRows": state.domain_index.len(),
        "tileRows": state.tile_index.len(),
    }))
}

/// Start the HTTP server.
pub async fn run_server(state: Arc<AppState>, port: u16) -> anyhow::Result<()> {
    let app = create_router(state);
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));

    info!(port = port, "Starting grid API server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
