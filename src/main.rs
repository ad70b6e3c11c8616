//! Stock Feed Sync CLI
//!
//! Downloads the supplier stock feed and sets the matching storefront
//! inventory levels.
//!
//! # Usage
//!
//! ```bash
//! # configuration from the environment or a .env file
//! cargo run --release
//! SYNC_LOG_FORMAT=json SYNC_LOG_FILTER=debug cargo run --release
//! ```
//!
//! # Exit Codes
//!
//! - 0: The run completed (individual records may still have failed; see the log)
//! - 1: Fatal error (invalid configuration, feed unreachable or unreadable)

use stock_feed_sync::cli;
use stock_feed_sync::pipeline;
use stock_feed_sync::telemetry;
use stock_feed_sync::{BatchSynchronizer, HttpFeedSource, ShopifyClient, TokioPacer};
use std::process;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let args = cli::parse_args();
    if let Err(e) = telemetry::init_tracing(args.log_format, &args.log_filter) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    let http = match reqwest::Client::builder().timeout(args.http_timeout()).build() {
        Ok(http) => http,
        Err(e) => {
            error!(error = %e, "Failed to build HTTP client");
            process::exit(1);
        }
    };

    let feed = HttpFeedSource::new(http.clone(), args.feed_url.clone());
    let client = ShopifyClient::new(http, &args.shop_name, args.access_token.clone(), args.api_version.clone());
    let synchronizer = BatchSynchronizer::new(client, TokioPacer, args.location_id, args.to_batch_config());

    info!(
        shop = %args.shop_name,
        location_id = args.location_id,
        "Starting stock sync"
    );

    // Fatal feed errors are logged by the pipeline
    if pipeline::run(&feed, &synchronizer).await.is_err() {
        process::exit(1);
    }
}
