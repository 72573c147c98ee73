//! Momentum Ranker - HTTP service that ranks a stock watchlist by momentum.
//!
//! Accepts a TradingView CSV export, scores each stock across five weighted
//! components, ranks the batch, and serves the ranking, analytics, and a
//! market overview over a JSON API.

use anyhow::Result;
use momentum_ranker::config::Settings;
use momentum_ranker::logging::init_logging;
use momentum_ranker::RankerService;

#[tokio::main]
async fn main() -> Result<()> {
    // Start timing immediately for cold-start measurement
    let startup_start = std::time::Instant::now();

    // Load configuration
    let settings = Settings::from_env();

    // Initialize logging
    init_logging(&settings.log_level, &settings.log_format);

    tracing::info!("Momentum Ranker v{}", env!("CARGO_PKG_VERSION"));

    // Start the ranking service
    let service = RankerService::new(settings);

    // Log startup timing before entering the server loop
    let startup_duration = startup_start.elapsed();
    tracing::info!(
        duration_ms = startup_duration.as_millis() as u64,
        "Service initialized in {:?}",
        startup_duration
    );

    service.start().await
}
