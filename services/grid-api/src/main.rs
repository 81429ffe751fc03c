//! BC-WRF grid coordinate API.
//!
//! Serves the grid resolution engine over HTTP:
//! - Bounding-region to tile-index-range resolution
//! - Nearest-sample / analytic point lookup
//! - Merged tile-corner polygons
//! - Monthly tile archive manifests
//!
//! Reference tables are loaded once at startup, from local disk or
//! S3-compatible object storage. A table that fails to load degrades to an
//! empty index serving full-domain defaults; the service still starts.

mod manifest;
mod server;
mod state;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use grid_index::DomainIndex;
use storage::{LocalFileSource, ObjectStorageConfig, ObjectStoreSource, ReferenceTableSource};

use state::{AppState, ResolverStrategy};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum StrategyArg {
    /// Nearest-sample scan over the reference table
    Table,
    /// Closed-form Lambert Conformal inverse mapping
    Analytic,
}

#[derive(Parser, Debug)]
#[command(name = "grid-api")]
#[command(about = "HTTP API for BC-WRF grid-coordinate resolution")]
struct Args {
    /// Port for the HTTP server
    #[arg(long, env = "PORT", default_value = "8080")]
    port: u16,

    /// Directory holding the reference CSVs (ignored when --s3-endpoint is set)
    #[arg(long, env = "TABLE_DIR", default_value = "reference")]
    table_dir: PathBuf,

    /// S3/MinIO endpoint; when set, tables are fetched from object storage
    #[arg(long, env = "S3_ENDPOINT")]
    s3_endpoint: Option<String>,

    /// Bucket holding the reference tables
    #[arg(long, env = "S3_BUCKET", default_value = "wrf-reference")]
    s3_bucket: String,

    /// Key prefix inside the bucket
    #[arg(long, env = "S3_PREFIX", default_value = "tables")]
    s3_prefix: String,

    #[arg(long, env = "S3_ACCESS_KEY_ID", default_value = "minioadmin")]
    s3_access_key_id: String,

    #[arg(long, env = "S3_SECRET_ACCESS_KEY", default_value = "minioadmin")]
    s3_secret_access_key: String,

    #[arg(long, env = "S3_REGION", default_value = "us-east-1")]
    s3_region: String,

    /// Full-domain table used for bounding-range resolution
    #[arg(long, env = "DOMAIN_TABLE", default_value = "domaininfo_bcwrf.csv")]
    domain_table: String,

    /// Tile table carrying tile ids, filenames, and URLs
    #[arg(long, env = "TILE_TABLE", default_value = "tile_domain_info.csv")]
    tile_table: String,

    /// Point-resolution strategy
    #[arg(long, value_enum, env = "RESOLVER_STRATEGY", default_value = "table")]
    strategy: StrategyArg,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

/// Load a reference table, degrading to an empty index on failure so the
/// service still answers with full-domain defaults.
async fn load_index(source: &dyn ReferenceTableSource, name: &str) -> DomainIndex {
    match source.fetch(name).await {
        Ok(content) => DomainIndex::parse(&content),
        Err(e) => {
            warn!(
                table = name,
                error = %e,
                "Failed to load reference table; serving full-domain defaults"
            );
            DomainIndex::empty()
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment from .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    // Initialize tracing
    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_thread_ids(true)
        .json()
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting grid coordinate API");

    let source: Box<dyn ReferenceTableSource> = match &args.s3_endpoint {
        Some(endpoint) => {
            let config = ObjectStorageConfig {
                endpoint: endpoint.clone(),
                bucket: args.s3_bucket.clone(),
                access_key_id: args.s3_access_key_id.clone(),
                secret_access_key: args.s3_secret_access_key.clone(),
                region: args.s3_region.clone(),
                allow_http: true,
                prefix: args.s3_prefix.clone(),
            };
            Box::new(ObjectStoreSource::new(&config)?)
        }
        None => Box::new(LocalFileSource::new(&args.table_dir)),
    };
    info!(source = %source.describe(), "Loading reference tables");

    let domain_index = load_index(source.as_ref(), &args.domain_table).await;
    let tile_index = load_index(source.as_ref(), &args.tile_table).await;

    let strategy = match args.strategy {
        StrategyArg::Table => ResolverStrategy::Table,
        StrategyArg::Analytic => ResolverStrategy::Analytic,
    };

    let state = Arc::new(AppState::new(domain_index, tile_index, strategy));
    info!(
        domain_rows = state.domain_index.len(),
        tile_rows = state.tile_index.len(),
        tiles = state.tile_groups.len(),
        strategy = ?args.strategy,
        "Reference tables loaded"
    );

    server::run_server(state, args.port).await
}
