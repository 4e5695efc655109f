//! Oracle Price Dashboard API Server
//!
//! Polls the price oracle in the background and serves the derived
//! dashboard view to frontends.

mod routes;

use axum::{
    http::{header, Method},
    Router,
};
use dashboard_oracle::OracleClient;
use dashboard_services::{
    DashboardConfig, RefreshController, RefreshMonitor, ViewBuilder, ViewStateStore,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{debug, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<ViewStateStore>,
    pub view: Arc<ViewBuilder>,
    pub refresh: RefreshMonitor,
}

impl AppState {
    pub fn new(store: Arc<ViewStateStore>, view: ViewBuilder, refresh: RefreshMonitor) -> Self {
        Self {
            store,
            view: Arc::new(view),
            refresh,
        }
    }
}

/// Build the HTTP application
pub fn app(state: AppState) -> Router {
    // Configure CORS for frontend
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .nest("/api", routes::api_routes())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env.local file
    if let Err(e) = dotenvy::from_filename(".env.local") {
        // Not an error if the file doesn't exist
        if !matches!(e, dotenvy::Error::Io(_)) {
            eprintln!("Warning: Failed to load .env.local: {}", e);
        }
    }

    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("info,dashboard_api=debug,dashboard_services=debug")
        }))
        .init();

    info!("Starting Oracle Price Dashboard API");

    let config = DashboardConfig::from_env()?;
    info!(
        "Tracking {} pairs from {} every {}s",
        config.tracked_pairs.len(),
        config.oracle_url,
        config.poll_interval_secs
    );

    let client = OracleClient::with_timeout(&config.oracle_url, config.request_timeout())?;
    let store = Arc::new(ViewStateStore::new());
    let view = ViewBuilder::new(config.tracked_pairs.clone(), config.explorer_tx_base_url.clone());

    // Start polling (first fetch happens immediately)
    let refresh = RefreshController::new(Arc::new(client), Arc::clone(&store), config.poll_interval())
        .start();

    // Log each publication as a plain-text board
    let mut updates = store.subscribe();
    let console_view = view.clone();
    tokio::spawn(async move {
        while updates.changed().await.is_ok() {
            let state = updates.borrow_and_update().clone();
            let dashboard = console_view.build(&state);
            for card in &dashboard.pairs {
                match card.view.quote() {
                    Some(quote) => debug!(
                        "{:>8}  {:>12}  conf {:>6}%  {}  {}",
                        card.label,
                        quote.display_price,
                        quote.display_confidence,
                        quote.display_time,
                        quote.prediction_text
                    ),
                    None => debug!("{:>8}  No data yet", card.label),
                }
            }
        }
    });

    let state = AppState::new(Arc::clone(&store), view, refresh.monitor());

    let port = std::env::var("SERVER_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(3001);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Shutting down refresh loop");
    refresh.stop().await;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
