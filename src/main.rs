use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use med_ia::{api, catalog, config, CoreState};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let catalog = catalog::load(&config::catalog_path());
    tracing::info!(
        records = catalog.records.len(),
        fallback = catalog.used_fallback,
        "catalogue ready"
    );

    let core = Arc::new(CoreState::new(catalog));
    let app = api::router::api_router(core);

    let addr = config::bind_addr();
    tracing::info!(%addr, "listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await
}
