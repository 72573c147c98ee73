//! HTTP routes for the momentum ranker service.

use axum::{
    extract::{Multipart, Query, State},
    http::StatusCode,
    response::Json,
};
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info};

use crate::data::{parse_csv, MarketEtf};
use crate::models::RankedStock;
use crate::query::{SortDir, SortKey, StockQuery, UnknownSortKey};
use crate::ranking::{calculate_analytics, rank_stocks, Analytics};
use crate::RankerState;

// ============================================================================
// Response Types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub service: String,
}

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub total_stocks: usize,
    pub top_stocks: usize,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct StocksResponse {
    pub stocks: Vec<RankedStock>,
    pub count: usize,
    pub total: usize,
}

#[derive(Debug, Serialize)]
pub struct MarketResponse {
    pub indices: Vec<MarketEtf>,
    pub updated_at: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Error responses carry a JSON body naming the problem.
pub type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
}

// ============================================================================
// Query Parameters
// ============================================================================

/// Raw query parameters for the stocks listing.
#[derive(Debug, Default, Deserialize)]
pub struct StocksParams {
    pub industry: Option<String>,
    pub sector: Option<String>,
    pub search: Option<String>,
    pub max_rank: Option<usize>,
    pub sort_by: Option<String>,
    pub sort_dir: Option<String>,
}

/// Validate raw parameters into a query. An unrecognized sort key or
/// direction is a client error.
fn parse_query(params: StocksParams) -> Result<StockQuery, UnknownSortKey> {
    let sort_by = params
        .sort_by
        .as_deref()
        .map(str::parse::<SortKey>)
        .transpose()?;
    let sort_dir = params
        .sort_dir
        .as_deref()
        .map(str::parse::<SortDir>)
        .transpose()?
        .unwrap_or_default();

    Ok(StockQuery {
        industry: params.industry,
        sector: params.sector,
        search: params.search,
        max_rank: params.max_rank,
        sort_by,
        sort_dir,
    })
}

// ============================================================================
// Route Handlers
// ============================================================================

/// Health check endpoint
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        service: "momentum-ranker".to_string(),
    })
}

/// Upload a TradingView CSV export, rank it, and replace the session.
pub async fn upload_stocks(
    State(state): State<Arc<RankerState>>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    let max_bytes = state.settings.max_file_size_bytes();

    let mut content = None;
    while let Some(field) = multipart.next_field().await.map_err(|e| {
        api_error(
            StatusCode::BAD_REQUEST,
            format!("invalid multipart body: {e}"),
        )
    })? {
        if field.name() == Some("file") {
            let is_csv = field
                .file_name()
                .map(|name| name.ends_with(".csv"))
                .unwrap_or(false);
            if !is_csv {
                return Err(api_error(
                    StatusCode::BAD_REQUEST,
                    "only .csv files are accepted",
                ));
            }

            let bytes = field.bytes().await.map_err(|e| {
                api_error(StatusCode::BAD_REQUEST, format!("failed to read file: {e}"))
            })?;
            content = Some(bytes);
            break;
        }
    }

    let Some(content) = content else {
        return Err(api_error(
            StatusCode::BAD_REQUEST,
            "missing multipart field 'file'",
        ));
    };

    if content.len() > max_bytes {
        return Err(api_error(
            StatusCode::PAYLOAD_TOO_LARGE,
            format!(
                "file exceeds {} MB limit",
                state.settings.max_file_size_mb
            ),
        ));
    }

    let stocks = parse_csv(&content).map_err(|e| {
        error!(error = %e, "CSV parse failed");
        api_error(StatusCode::BAD_REQUEST, format!("could not parse CSV: {e}"))
    })?;

    if stocks.is_empty() {
        return Err(api_error(
            StatusCode::BAD_REQUEST,
            "no valid stock rows found in file",
        ));
    }

    let ranked = rank_stocks(&stocks, &state.settings);
    let analytics = calculate_analytics(&ranked);
    let total = ranked.len();
    let top = ranked.iter().filter(|s| s.is_top).count();

    info!(total_stocks = total, top_stocks = top, "Ranked uploaded batch");

    let mut session = state.session.write().await;
    session.stocks = ranked;
    session.analytics = Some(analytics);

    Ok(Json(UploadResponse {
        total_stocks: total,
        top_stocks: top,
        message: format!("Ranked {total} stocks"),
    }))
}

/// List ranked stocks with optional filtering and sorting.
pub async fn get_stocks(
    State(state): State<Arc<RankerState>>,
    Query(params): Query<StocksParams>,
) -> Result<Json<StocksResponse>, ApiError> {
    let query =
        parse_query(params).map_err(|e| api_error(StatusCode::BAD_REQUEST, e.to_string()))?;

    let session = state.session.read().await;
    let total = session.stocks.len();
    let stocks = query.apply(&session.stocks);
    let count = stocks.len();

    Ok(Json(StocksResponse {
        stocks,
        count,
        total,
    }))
}

/// Analytics for the current session. Empty summary before any upload.
pub async fn get_analytics(State(state): State<Arc<RankerState>>) -> Json<Analytics> {
    let session = state.session.read().await;
    Json(session.analytics.clone().unwrap_or_else(Analytics::empty))
}

/// Market overview for the major index ETFs.
pub async fn get_market(
    State(state): State<Arc<RankerState>>,
) -> Result<Json<MarketResponse>, ApiError> {
    let indices = state.market.fetch_overview().await;

    if indices.is_empty() {
        return Err(api_error(
            StatusCode::BAD_GATEWAY,
            "market data is currently unavailable",
        ));
    }

    Ok(Json(MarketResponse {
        indices,
        updated_at: Local::now().to_rfc3339(),
    }))
}

// ============================================================================
// Tests
// ============================================================================
