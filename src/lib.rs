//! Stock Feed Sync Library
//! # Overview
//!
//! This library synchronizes storefront inventory levels from a supplier's
//! `;`-separated stock feed, matching products by barcode (EAN). A run is a
//! one-shot batch job: ingest the whole feed, then apply it record by record.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (FeedRecord, Product, SyncOutcome, errors)
//! - [`cli`] - Environment-backed configuration
//! - [`io`] - Streaming feed parsing with row validation
//! - [`core`] - Business logic components:
//!   - [`core::traits`] - Capability traits for the feed, the storefront and pacing
//!   - [`core::synchronizer`] - Rate-limited, retrying batch synchronizer
//!   - [`core::pacing`] - Jittered pacing delays
//! - [`client`] - HTTP feed source and Shopify inventory client
//! - [`pipeline`] - One complete run: ingest, then synchronize
//! - [`telemetry`] - Tracing subscriber setup
//!
//! # Record Outcomes
//!
//! Every ingested record ends in exactly one outcome:
//!
//! - **Applied**: the inventory level was set
//! - **SkippedNotFound**: no product carries the barcode
//! - **SkippedNoInventoryTarget**: the matched product has no inventory item
//! - **FailedPermanently**: a remote call failed and the record was abandoned
//!
//! # Failure Tiers
//!
//! - Feed errors are run-fatal: nothing is synchronized
//! - Storefront errors are record-local: connection resets are retried up to
//!   three attempts in total, everything else is logged and the run continues

// Module declarations
pub mod cli;
pub mod client;
pub mod core;
pub mod io;
pub mod pipeline;
pub mod telemetry;
pub mod types;

pub use client::{HttpFeedSource, ShopifyClient};
pub use core::{BatchConfig, BatchSynchronizer, Delay, PauseReason, TokioPacer};
pub use io::FeedReader;
pub use types::{
    FeedError, FeedRecord, Product, RemoteError, SyncOutcome, SyncReport, Variant,
};
