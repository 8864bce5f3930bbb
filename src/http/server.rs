//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (tracing, request timeout)
//! - Bind server to listener
//! - Carry the shared service handles into handlers via state

use axum::routing::get;
use axum::Router;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::chain::accounts::NodeAccounts;
use crate::chain::client::ChainClient;
use crate::chain::contract::MarketContract;
use crate::config::PortalConfig;
use crate::http::flash::FlashStore;
use crate::http::handlers;
use crate::market::{AccountService, MarketService};

/// Application state injected into handlers.
///
/// Constructed once at startup and shared read-only thereafter; the flash
/// store is the only mutable member and is internally synchronized.
#[derive(Clone)]
pub struct AppState {
    pub market: MarketService,
    pub accounts: AccountService,
    pub flash: FlashStore,
    pub chain: ChainClient,
}

impl AppState {
    pub fn new(
        chain: ChainClient,
        contract: Arc<dyn MarketContract>,
        node: Arc<dyn NodeAccounts>,
    ) -> Self {
        Self {
            market: MarketService::new(contract),
            accounts: AccountService::new(node),
            flash: FlashStore::new(),
            chain,
        }
    }
}

/// HTTP server for the portal.
pub struct HttpServer {
    router: Router,
    config: PortalConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration and state.
    pub fn new(config: PortalConfig, state: AppState) -> Self {
        let router = build_router(&config, state);
        Self { router, config }
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &PortalConfig {
        &self.config
    }
}

/// Build the Axum router with all routes and middleware layers.
pub fn build_router(config: &PortalConfig, state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route(
            "/register",
            get(handlers::register_form).post(handlers::register_submit),
        )
        .route(
            "/login",
            get(handlers::login_form).post(handlers::login_submit),
        )
        .route("/dashboard/{address}", get(handlers::dashboard))
        .route(
            "/create_estate",
            get(handlers::create_estate_form).post(handlers::create_estate_submit),
        )
        .route(
            "/create_ad",
            get(handlers::create_ad_form).post(handlers::create_ad_submit),
        )
        .route(
            "/buy_estate",
            get(handlers::buy_estate_form).post(handlers::buy_estate_submit),
        )
        .route(
            "/withdraw_funds",
            get(handlers::withdraw_funds_form).post(handlers::withdraw_funds_submit),
        )
        .route(
            "/change_estate_status",
            get(handlers::change_estate_status_form).post(handlers::change_estate_status_submit),
        )
        .route(
            "/change_ad_status",
            get(handlers::change_ad_status_form).post(handlers::change_ad_status_submit),
        )
        .route("/get_estates", get(handlers::estates_view))
        .route("/get_ads", get(handlers::ads_view))
        .route("/get_balance/{address}", get(handlers::balance_view))
        .route("/health", get(handlers::health))
        .with_state(state)
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.http.request_timeout_secs,
        )))
        .layer(TraceLayer::new_for_http())
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received");
}
