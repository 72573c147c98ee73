//! Momentum Ranker Library
//!
//! Ranks a watchlist of stocks by momentum. A TradingView CSV export is
//! uploaded, each stock is scored across five components (price momentum,
//! volume momentum, technical strength, breakout potential, stability),
//! the weighted composite is ranked, and portfolio-wide analytics are
//! derived from the ranked batch.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                   momentum-ranker (Rust Service)                │
//! │                            :8000                                │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────────────┐  │
//! │  │  CSV Ingest  │  │  Scoring +   │  │  Analytics +         │  │
//! │  │  (upload)    │  │  Ranking     │  │  Market Overview     │  │
//! │  └──────────────┘  └──────────────┘  └──────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The ranked batch lives in an in-memory session replaced on each upload.

#![warn(clippy::all)]
#![allow(clippy::pedantic)]

pub mod config;
pub mod data;
pub mod logging;
pub mod models;
pub mod query;
pub mod ranking;
pub mod routes;
pub mod scoring;

use anyhow::Result;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tower_http::{cors::CorsLayer, limit::RequestBodyLimitLayer, timeout::TimeoutLayer};

use crate::config::Settings;
use crate::data::MarketDataClient;
use crate::models::RankedStock;
use crate::ranking::Analytics;

/// Multipart framing overhead allowed on top of the file size limit.
const UPLOAD_OVERHEAD_BYTES: usize = 16 * 1024;

/// The ranked batch from the most recent upload.
#[derive(Debug, Default)]
pub struct Session {
    /// Ranked stocks in rank order
    pub stocks: Vec<RankedStock>,
    /// Analytics derived from the ranked batch
    pub analytics: Option<Analytics>,
}

/// Ranker service state
pub struct RankerState {
    /// Configuration
    pub settings: Settings,
    /// Current session, replaced on each upload
    pub session: RwLock<Session>,
    /// Market overview client
    pub market: MarketDataClient,
}

impl RankerState {
    /// Create a new ranker state
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            session: RwLock::new(Session::default()),
            market: MarketDataClient::new(),
        }
    }
}

/// Main ranker service
pub struct RankerService {
    state: Arc<RankerState>,
}

impl RankerService {
    /// Create a new ranker service
    pub fn new(settings: Settings) -> Self {
        let state = Arc::new(RankerState::new(settings));
        Self { state }
    }

    /// Build the HTTP router.
    pub fn router(&self) -> Router {
        let upload_limit = self.state.settings.max_file_size_bytes() + UPLOAD_OVERHEAD_BYTES;

        Router::new()
            .route("/health", get(routes::health))
            .route("/api/v1/stocks/upload", post(routes::upload_stocks))
            .route("/api/v1/stocks", get(routes::get_stocks))
            .route("/api/v1/analytics", get(routes::get_analytics))
            .route("/api/v1/market", get(routes::get_market))
            .layer(DefaultBodyLimit::disable())
            .layer(RequestBodyLimitLayer::new(upload_limit))
            .layer(TimeoutLayer::new(Duration::from_secs(30)))
            .layer(CorsLayer::permissive())
            .with_state(self.state.clone())
    }

    /// Start the ranker service
    pub async fn start(self) -> Result<()> {
        let host = self.state.settings.host.clone();
        let port = self.state.settings.port;

        let app = self.router();

        let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
        tracing::info!(address = %addr, "Starting HTTP server");

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app).await?;

        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
