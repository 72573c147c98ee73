//! Service configuration.
//!
//! All tunable values live in a single `Settings` struct, loaded once at
//! process start and passed by reference into the scoring functions. Values
//! resolve from `MOMENTUM_`-prefixed environment variables with documented
//! defaults; weights are trusted as provided and never validated to sum
//! to 1.0.

use serde::{Deserialize, Serialize};

/// Environment variable prefix for all settings.
const ENV_PREFIX: &str = "MOMENTUM_";

// ============================================================================
// Settings
// ============================================================================

/// Application settings. Immutable after load.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    // === Service ===
    /// Bind host for the HTTP server
    #[serde(default = "default_host")]
    pub host: String,

    /// Bind port for the HTTP server
    #[serde(default = "default_port")]
    pub port: u16,

    /// Base log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Log output format: "pretty" or "json"
    #[serde(default = "default_log_format")]
    pub log_format: String,

    /// Maximum accepted upload size in megabytes
    #[serde(default = "default_max_file_size_mb")]
    pub max_file_size_mb: usize,

    // === Top-level scoring weights (nominally sum to 1.0) ===
    #[serde(default = "default_weight_price")]
    pub weight_price: f64,
    #[serde(default = "default_weight_volume")]
    pub weight_volume: f64,
    #[serde(default = "default_weight_technical")]
    pub weight_technical: f64,
    #[serde(default = "default_weight_breakout")]
    pub weight_breakout: f64,
    #[serde(default = "default_weight_stability")]
    pub weight_stability: f64,

    // === Price momentum sub-weights ===
    #[serde(default = "default_price_weight_6m")]
    pub price_weight_6m: f64,
    #[serde(default = "default_price_weight_3m")]
    pub price_weight_3m: f64,
    #[serde(default = "default_price_weight_1m")]
    pub price_weight_1m: f64,
    #[serde(default = "default_price_weight_1y")]
    pub price_weight_1y: f64,
    #[serde(default = "default_price_weight_1w")]
    pub price_weight_1w: f64,

    // === Volume scoring ===
    /// Cap applied to each volume sub-signal
    #[serde(default = "default_volume_score_cap")]
    pub volume_score_cap: f64,

    // === Technical / breakout thresholds ===
    /// 52-week proximity % above which a breakout is considered imminent
    #[serde(default = "default_high_52w_breakout_threshold")]
    pub high_52w_breakout_threshold: f64,
    /// 52-week proximity % above which price is consolidating near highs
    #[serde(default = "default_high_52w_near_threshold")]
    pub high_52w_near_threshold: f64,
    /// 52-week proximity % marking a confirmed uptrend
    #[serde(default = "default_high_52w_uptrend_threshold")]
    pub high_52w_uptrend_threshold: f64,
    /// Relative volume confirming a breakout
    #[serde(default = "default_rel_vol_breakout_threshold")]
    pub rel_vol_breakout_threshold: f64,
    /// Relative volume confirming near-high accumulation
    #[serde(default = "default_rel_vol_near_threshold")]
    pub rel_vol_near_threshold: f64,

    // === Market cap tiers (in billions) ===
    #[serde(default = "default_mcap_mega")]
    pub mcap_mega: f64,
    #[serde(default = "default_mcap_large")]
    pub mcap_large: f64,
    #[serde(default = "default_mcap_mid_high")]
    pub mcap_mid_high: f64,
    #[serde(default = "default_mcap_mid")]
    pub mcap_mid: f64,
    #[serde(default = "default_mcap_small")]
    pub mcap_small: f64,

    // === Beta tiers ===
    #[serde(default = "default_beta_stable_max")]
    pub beta_stable_max: f64,
    #[serde(default = "default_beta_moderate_max")]
    pub beta_moderate_max: f64,
    #[serde(default = "default_beta_high_max")]
    pub beta_high_max: f64,
    #[serde(default = "default_beta_very_high_max")]
    pub beta_very_high_max: f64,

    // === Display / ranking ===
    /// Number of stocks flagged `is_top`
    #[serde(default = "default_top_stocks_count")]
    pub top_stocks_count: usize,

    /// Days before/after an earnings date during which a stock is unsafe
    #[serde(default = "default_earnings_exclusion_days")]
    pub earnings_exclusion_days: i64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_level: default_log_level(),
            log_format: default_log_format(),
            max_file_size_mb: default_max_file_size_mb(),
            weight_price: default_weight_price(),
            weight_volume: default_weight_volume(),
            weight_technical: default_weight_technical(),
            weight_breakout: default_weight_breakout(),
            weight_stability: default_weight_stability(),
            price_weight_6m: default_price_weight_6m(),
            price_weight_3m: default_price_weight_3m(),
            price_weight_1m: default_price_weight_1m(),
            price_weight_1y: default_price_weight_1y(),
            price_weight_1w: default_price_weight_1w(),
            volume_score_cap: default_volume_score_cap(),
            high_52w_breakout_threshold: default_high_52w_breakout_threshold(),
            high_52w_near_threshold: default_high_52w_near_threshold(),
            high_52w_uptrend_threshold: default_high_52w_uptrend_threshold(),
            rel_vol_breakout_threshold: default_rel_vol_breakout_threshold(),
            rel_vol_near_threshold: default_rel_vol_near_threshold(),
            mcap_mega: default_mcap_mega(),
            mcap_large: default_mcap_large(),
            mcap_mid_high: default_mcap_mid_high(),
            mcap_mid: default_mcap_mid(),
            mcap_small: default_mcap_small(),
            beta_stable_max: default_beta_stable_max(),
            beta_moderate_max: default_beta_moderate_max(),
            beta_high_max: default_beta_high_max(),
            beta_very_high_max: default_beta_very_high_max(),
            top_stocks_count: default_top_stocks_count(),
            earnings_exclusion_days: default_earnings_exclusion_days(),
        }
    }
}

impl Settings {
    /// Load settings from `MOMENTUM_`-prefixed environment variables,
    /// falling back to the documented default for anything unset or
    /// unparsable.
    pub fn from_env() -> Self {
        let mut s = Self::default();

        if let Some(v) = env_string("HOST") {
            s.host = v;
        }
        env_parse("PORT", &mut s.port);
        if let Some(v) = env_string("LOG_LEVEL") {
            s.log_level = v;
        }
        if let Some(v) = env_string("LOG_FORMAT") {
            s.log_format = v;
        }
        env_parse("MAX_FILE_SIZE_MB", &mut s.max_file_size_mb);

        env_parse("WEIGHT_PRICE", &mut s.weight_price);
        env_parse("WEIGHT_VOLUME", &mut s.weight_volume);
        env_parse("WEIGHT_TECHNICAL", &mut s.weight_technical);
        env_parse("WEIGHT_BREAKOUT", &mut s.weight_breakout);
        env_parse("WEIGHT_STABILITY", &mut s.weight_stability);

        env_parse("PRICE_WEIGHT_6M", &mut s.price_weight_6m);
        env_parse("PRICE_WEIGHT_3M", &mut s.price_weight_3m);
        env_parse("PRICE_WEIGHT_1M", &mut s.price_weight_1m);
        env_parse("PRICE_WEIGHT_1Y", &mut s.price_weight_1y);
        env_parse("PRICE_WEIGHT_1W", &mut s.price_weight_1w);

        env_parse("VOLUME_SCORE_CAP", &mut s.volume_score_cap);

        env_parse(
            "HIGH_52W_BREAKOUT_THRESHOLD",
            &mut s.high_52w_breakout_threshold,
        );
        env_parse("HIGH_52W_NEAR_THRESHOLD", &mut s.high_52w_near_threshold);
        env_parse(
            "HIGH_52W_UPTREND_THRESHOLD",
            &mut s.high_52w_uptrend_threshold,
        );
        env_parse(
            "REL_VOL_BREAKOUT_THRESHOLD",
            &mut s.rel_vol_breakout_threshold,
        );
        env_parse("REL_VOL_NEAR_THRESHOLD", &mut s.rel_vol_near_threshold);

        env_parse("MCAP_MEGA", &mut s.mcap_mega);
        env_parse("MCAP_LARGE", &mut s.mcap_large);
        env_parse("MCAP_MID_HIGH", &mut s.mcap_mid_high);
        env_parse("MCAP_MID", &mut s.mcap_mid);
        env_parse("MCAP_SMALL", &mut s.mcap_small);

        env_parse("BETA_STABLE_MAX", &mut s.beta_stable_max);
        env_parse("BETA_MODERATE_MAX", &mut s.beta_moderate_max);
        env_parse("BETA_HIGH_MAX", &mut s.beta_high_max);
        env_parse("BETA_VERY_HIGH_MAX", &mut s.beta_very_high_max);

        env_parse("TOP_STOCKS_COUNT", &mut s.top_stocks_count);
        env_parse("EARNINGS_EXCLUSION_DAYS", &mut s.earnings_exclusion_days);

        s
    }

    /// Maximum upload size in bytes.
    pub fn max_file_size_bytes(&self) -> usize {
        self.max_file_size_mb * 1024 * 1024
    }
}

// ============================================================================
// Env Helpers
// ============================================================================

fn env_string(key: &str) -> Option<String> {
    std::env::var(format!("{}{}", ENV_PREFIX, key)).ok()
}

fn env_parse<T: std::str::FromStr>(key: &str, slot: &mut T) {
    if let Some(raw) = env_string(key) {
        if let Ok(parsed) = raw.parse::<T>() {
            *slot = parsed;
        }
    }
}

// ============================================================================
// Defaults
// ============================================================================

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_max_file_size_mb() -> usize {
    10
}

fn default_weight_price() -> f64 {
    0.40
}

fn default_weight_volume() -> f64 {
    0.30
}

fn default_weight_technical() -> f64 {
    0.10
}

fn default_weight_breakout() -> f64 {
    0.10
}

fn default_weight_stability() -> f64 {
    0.10
}

fn default_price_weight_6m() -> f64 {
    0.35
}

fn default_price_weight_3m() -> f64 {
    0.25
}

fn default_price_weight_1m() -> f64 {
    0.20
}

fn default_price_weight_1y() -> f64 {
    0.10
}

fn default_price_weight_1w() -> f64 {
    0.10
}

fn default_volume_score_cap() -> f64 {
    25.0
}

fn default_high_52w_breakout_threshold() -> f64 {
    95.0
}

fn default_high_52w_near_threshold() -> f64 {
    90.0
}

fn default_high_52w_uptrend_threshold() -> f64 {
    85.0
}

fn default_rel_vol_breakout_threshold() -> f64 {
    1.5
}

fn default_rel_vol_near_threshold() -> f64 {
    1.2
}

fn default_mcap_mega() -> f64 {
    100.0
}

fn default_mcap_large() -> f64 {
    50.0
}

fn default_mcap_mid_high() -> f64 {
    20.0
}

fn default_mcap_mid() -> f64 {
    10.0
}

fn default_mcap_small() -> f64 {
    2.0
}

fn default_beta_stable_max() -> f64 {
    1.0
}

fn default_beta_moderate_max() -> f64 {
    1.5
}

fn default_beta_high_max() -> f64 {
    2.0
}

fn default_beta_very_high_max() -> f64 {
    2.5
}

fn default_top_stocks_count() -> usize {
    20
}

fn default_earnings_exclusion_days() -> i64 {
    5
}

// ============================================================================
// Tests
// ============================================================================
