use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use folio_server::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialise structured JSON logging. Level controlled via RUST_LOG.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("folio=info".parse()?),
        )
        .json()
        .init();

    let cfg = folio_core::config::Config::from_env().map_err(|e| anyhow::anyhow!(e))?;

    // Open the embedded store; schema and ordered migrations run at open.
    let db = folio_duckdb::DuckDbBackend::open(&cfg.db_path, &cfg.duckdb_memory_limit)?;

    // GeoIP is optional enrichment. Visitors are stored with NULL geo fields
    // when the database is absent.
    if !std::path::Path::new(&cfg.geoip_path).exists() {
        tracing::warn!(
            geoip_path = %cfg.geoip_path,
            "GeoIP database not found. Visitors stored with NULL country/city. \
             Set FOLIO_GEOIP_PATH to a MaxMind City database to enable lookups."
        );
    }

    let state = Arc::new(AppState::new(db, cfg.clone()));

    let addr = format!("0.0.0.0:{}", cfg.port);
    let app = folio_server::app::build_app(Arc::clone(&state));

    info!(port = cfg.port, db_path = %cfg.db_path, "folio listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            tokio::signal::ctrl_c().await.ok();
        })
        .await?;

    Ok(())
}
