use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use sha2::{Digest, Sha256};
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bookscout_core::{
    load_config, validate_config, Aggregator, BatchPipeline, BookCatalog, InsightClient,
    ListingSource, WatchStore,
};
use bookscout_core::{
    insight::GeminiClient,
    resolver::GoogleBooksCatalog,
    sources::{EbaySource, WebSearchSource},
    store::SqliteWatchStore,
};

use bookscout_server::api::create_router;
use bookscout_server::state::AppState;

/// Application version
const VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine config path
    let config_path = std::env::var("BOOKSCOUT_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config.toml"));

    // Load configuration
    info!("Loading configuration from {:?}", config_path);
    let config = load_config(&config_path)
        .with_context(|| format!("Failed to load config from {:?}", config_path))?;

    // Validate configuration
    validate_config(&config).context("Configuration validation failed")?;

    // Compute config hash so deployments can be told apart in logs
    let config_json = serde_json::to_string(&config).unwrap_or_default();
    let config_hash = format!("{:x}", Sha256::digest(config_json.as_bytes()));

    info!("Configuration loaded successfully");
    info!("Version: {}, config hash: {}", VERSION, &config_hash[..16]);
    info!("Database path: {:?}", config.database.path);
    info!("Live search: {}", config.search.live);

    // Create the book catalog client
    let catalog: Arc<dyn BookCatalog> = Arc::new(
        GoogleBooksCatalog::new(config.catalog.base_url.clone())
            .context("Failed to create book catalog client")?,
    );
    info!("Book catalog client initialized");

    // Create listing sources from whatever is configured
    let mut sources: Vec<Arc<dyn ListingSource>> = Vec::new();
    if let Some(ebay_config) = &config.sources.ebay {
        match EbaySource::new(ebay_config.clone()) {
            Ok(source) => {
                info!("Initializing eBay listing source");
                sources.push(Arc::new(source));
            }
            Err(e) => error!("Failed to create eBay source: {}", e),
        }
    }
    if let Some(ws_config) = &config.sources.web_search {
        match WebSearchSource::new(ws_config.clone()) {
            Ok(source) => {
                info!("Initializing web search listing source");
                sources.push(Arc::new(source));
            }
            Err(e) => error!("Failed to create web search source: {}", e),
        }
    }
    if sources.is_empty() {
        info!("No listing sources configured, searches will use the synthetic market");
    }

    // Create the aggregator and batch pipeline
    let adapter_timeout = Duration::from_secs(config.search.adapter_timeout_secs as u64);
    let aggregator = Arc::new(Aggregator::new(
        Arc::clone(&catalog),
        sources,
        config.search.live,
        adapter_timeout,
    ));
    let batch = Arc::new(BatchPipeline::new(
        Arc::clone(&catalog),
        Arc::clone(&aggregator),
        config.search.live,
        config.search.batch_concurrency,
    ));

    // Create SQLite watch store (alerts + wishlist)
    let store: Arc<dyn WatchStore> = Arc::new(
        SqliteWatchStore::new(&config.database.path).context("Failed to create watch store")?,
    );
    info!("Watch store initialized");

    // Create insight client if configured
    let insight: Option<Arc<dyn InsightClient>> = match &config.insight {
        Some(insight_config) => match GeminiClient::new(insight_config.clone()) {
            Ok(client) => {
                info!("Initializing Gemini insight client");
                Some(Arc::new(client))
            }
            Err(e) => {
                error!("Failed to create insight client: {}", e);
                None
            }
        },
        None => {
            info!("No insight provider configured");
            None
        }
    };

    // Create app state
    let state = Arc::new(AppState::new(
        config.clone(),
        aggregator,
        batch,
        store,
        insight,
    ));

    // Create router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::new(config.server.host, config.server.port);
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    // Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shut down");

    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
