use crate::client::DEFAULT_API_VERSION;
use crate::core::{BatchConfig, Delay};
use crate::telemetry::LogFormat;
use crate::types::LocationId;
use clap::Parser;
use std::time::Duration;

/// Synchronize storefront inventory levels from a supplier stock feed
///
/// Every option is read from the environment (or a `.env` file), so the job
/// normally runs without arguments.
#[derive(Parser, Debug)]
#[command(name = "stock-feed-sync")]
#[command(version, about, long_about = None)]
pub struct CliArgs {
    /// Shop handle or myshopify.com domain
    #[arg(long, env = "SHOPIFY_SHOP_NAME")]
    pub shop_name: String,

    /// Admin API access token
    #[arg(long, env = "SHOPIFY_ACCESS_TOKEN", hide_env_values = true)]
    pub access_token: String,

    /// Location whose inventory levels are set
    #[arg(long, env = "SHOPIFY_LOCATION_ID")]
    pub location_id: LocationId,

    /// Supplier feed URL, credentials included
    #[arg(long, env = "FEED_URL", hide_env_values = true)]
    pub feed_url: String,

    /// Admin API version
    #[arg(long, env = "SHOPIFY_API_VERSION", default_value = DEFAULT_API_VERSION)]
    pub api_version: String,

    /// Number of records per batch
    #[arg(long, env = "SYNC_BATCH_SIZE", default_value_t = 2)]
    pub batch_size: usize,

    /// Pause after every batch, in milliseconds
    #[arg(long, env = "SYNC_BATCH_DELAY_MS", default_value_t = 1000)]
    pub batch_delay_ms: u64,

    /// Pause after every successful update, in milliseconds
    #[arg(long, env = "SYNC_CALL_DELAY_MS", default_value_t = 1000)]
    pub call_delay_ms: u64,

    /// Upper bound of the random jitter added to both pauses, in milliseconds
    #[arg(long, env = "SYNC_JITTER_MS", default_value_t = 200)]
    pub jitter_ms: u64,

    /// Timeout for every HTTP request, in seconds
    #[arg(long, env = "HTTP_TIMEOUT_SECS", default_value_t = 30)]
    pub http_timeout_secs: u64,

    /// Log output format
    #[arg(long, env = "SYNC_LOG_FORMAT", value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, env = "SYNC_LOG_FILTER", default_value = "info")]
    pub log_filter: String,
}

impl CliArgs {
    /// Create a BatchConfig from the parsed options
    pub fn to_batch_config(&self) -> BatchConfig {
        let jitter = Duration::from_millis(self.jitter_ms);
        BatchConfig::new(
            self.batch_size,
            Delay::jittered(Duration::from_millis(self.batch_delay_ms), jitter),
            Delay::jittered(Duration::from_millis(self.call_delay_ms), jitter),
        )
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }
}
