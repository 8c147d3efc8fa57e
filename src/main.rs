use anyhow::Result;
use photorio::{
    config::AppConfig,
    db,
    metadata::SiteMetadata,
    services::{gallery_service::GalleryService, identity_service::HttpIdentityService},
    state::AppState,
};
use std::{io::ErrorKind, sync::Arc};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // --- Logging setup ---
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // --- Parse config + migrate flag ---
    let (cfg, migrate) = AppConfig::from_env_and_args()?;

    tracing::info!("Starting photorio with config: {:?}", cfg);

    // --- Initialize SQLite connection ---
    let pool = db::connect(&cfg.database_url).await?;

    // --- Handle migration mode ---
    if migrate {
        db::run_migrations(&pool).await?;
        tracing::info!("Database migration complete.");
        return Ok(()); // exit after migration
    }

    // --- Initialize services ---
    let identity = HttpIdentityService::new(
        cfg.identity_api_url.clone(),
        cfg.identity_api_key.clone(),
        cfg.identity_timeout,
    )?;
    if cfg.identity_api_key.is_none() {
        tracing::warn!("PHOTORIO_IDENTITY_API_KEY is not set; identity lookups are unauthenticated");
    }
    let gallery = GalleryService::new(Arc::new(pool), Arc::new(identity));
    let state = AppState::new(gallery, SiteMetadata::new(cfg.app_url.clone()), &cfg.viewer_header)?;

    // --- Build router ---
    let app = photorio::app(state);

    // --- Start server ---
    let addr = cfg.addr();
    let listener = match TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(err)
            if err.kind() == ErrorKind::PermissionDenied
                && matches!(cfg.host.as_str(), "0.0.0.0" | "::") =>
        {
            let fallback_addr = format!("127.0.0.1:{}", cfg.port);
            tracing::warn!(
                "Permission denied binding to {} ({}). Falling back to {}",
                addr,
                err,
                fallback_addr
            );
            TcpListener::bind(&fallback_addr).await?
        }
        Err(err) => return Err(err.into()),
    };

    tracing::info!("Server listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
