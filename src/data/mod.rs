//! Data boundary: CSV ingestion and external market data.
//!
//! Everything here produces fully materialized, immutable batches before the
//! ranking core is invoked; the core never consumes an in-flight collection.

pub mod ingest;
pub mod market;

pub use ingest::{parse_csv, IngestError};
pub use market::{MarketDataClient, MarketEtf};
