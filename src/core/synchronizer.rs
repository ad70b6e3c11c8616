//! Rate-limited batch synchronization of feed records
//!
//! This module provides the `BatchSynchronizer`, which applies every feed
//! record to the storefront inventory while staying under the storefront's
//! call-rate ceiling.
//!
//! # Design
//!
//! ```text
//! records ── chunks(batch_size) ──▶ batch ──▶ sync_record (sequential)
//!                                      │          ├── find_products_by_barcode
//!                                      │          ├── set_inventory_level
//!                                      │          └── pause AfterUpdate
//!                                      └── pause BetweenBatches
//! ```
//!
//! Only one remote call is ever in flight. A record is fully resolved
//! (applied, skipped, or abandoned) before the next one starts, and records
//! are processed in input order.
//!
//! # Retries
//!
//! A connection reset on either call restarts the whole record procedure
//! after a fixed delay, for at most [`MAX_ATTEMPTS`] attempts in total. Any
//! other failure, or the last reset, abandons the record. Nothing a single
//! record does can stop the run.

use crate::core::pacing::{Delay, PauseReason};
use crate::core::traits::{InventoryClient, Pacer};
use crate::types::{FeedRecord, LocationId, RemoteError, SyncOutcome, SyncReport};
use std::time::Duration;
use tracing::{error, info, warn};

/// Total attempts per record, first try included
pub const MAX_ATTEMPTS: u32 = 3;

/// Wait before retrying a record after a connection reset
pub const RETRY_DELAY: Delay = Delay::fixed(Duration::from_millis(3000));

/// Configuration for batch pacing
///
/// Controls how many records share a batch and how long to wait between
/// batches and after each successful update.
#[derive(Clone, Debug, PartialEq)]
pub struct BatchConfig {
    /// Number of records per batch
    pub batch_size: usize,
    /// Pause after every batch
    pub batch_delay: Delay,
    /// Pause after every successful inventory update
    pub call_delay: Delay,
}

impl Default for BatchConfig {
    fn default() -> Self {
        let pacing = Delay::jittered(Duration::from_millis(1000), Duration::from_millis(200));
        Self {
            batch_size: 2,
            batch_delay: pacing,
            call_delay: pacing,
        }
    }
}

impl BatchConfig {
    /// Create a new BatchConfig with custom values
    ///
    /// A zero batch size falls back to the default.
    pub fn new(batch_size: usize, batch_delay: Delay, call_delay: Delay) -> Self {
        let batch_size = if batch_size == 0 {
            let default = Self::default().batch_size;
            warn!(batch_size, default, "Invalid batch size, using default");
            default
        } else {
            batch_size
        };

        Self {
            batch_size,
            batch_delay,
            call_delay,
        }
    }
}

/// Applies feed records to the storefront in paced batches
pub struct BatchSynchronizer<C, P> {
    client: C,
    pacer: P,
    location_id: LocationId,
    config: BatchConfig,
}

impl<C: InventoryClient, P: Pacer> BatchSynchronizer<C, P> {
    /// Create a new BatchSynchronizer
    ///
    /// # Arguments
    ///
    /// * `client` - Storefront inventory client
    /// * `pacer` - Performs the pacing and retry delays
    /// * `location_id` - Location whose inventory levels are set
    /// * `config` - Batch size and pacing delays
    pub fn new(client: C, pacer: P, location_id: LocationId, config: BatchConfig) -> Self {
        Self {
            client,
            pacer,
            location_id,
            config,
        }
    }

    pub fn config(&self) -> &BatchConfig {
        &self.config
    }

    /// Synchronize every record, batch by batch
    ///
    /// Each batch is followed by one inter-batch pause, the last one
    /// included. Per-record failures are counted in the report, never
    /// returned.
    pub async fn run(&self, records: &[FeedRecord]) -> SyncReport {
        let mut report = SyncReport::default();
        let batch_size = self.config.batch_size.max(1);

        for batch in records.chunks(batch_size) {
            for record in batch {
                let outcome = self.sync_record(record).await;
                report.record(&outcome);
            }

            info!("Waiting for the next batch...");
            self.pacer
                .pause(PauseReason::BetweenBatches, self.config.batch_delay)
                .await;
        }

        report
    }

    /// Apply a single record, retrying on connection resets
    pub async fn sync_record(&self, record: &FeedRecord) -> SyncOutcome {
        let mut attempt = 1;

        loop {
            match self.try_sync(record, attempt).await {
                Ok(outcome) => return outcome,
                Err(err) if err.is_connection_reset() && attempt < MAX_ATTEMPTS => {
                    warn!(
                        barcode = %record.barcode,
                        attempt,
                        error = %err,
                        "Connection reset, retrying in {}s",
                        RETRY_DELAY.base.as_secs()
                    );
                    self.pacer.pause(PauseReason::BeforeRetry, RETRY_DELAY).await;
                    attempt += 1;
                }
                Err(err) => {
                    error!(
                        barcode = %record.barcode,
                        attempt,
                        detail = %err.detail(),
                        "Error updating stock"
                    );
                    return SyncOutcome::FailedPermanently {
                        attempts: attempt,
                        error: err,
                    };
                }
            }
        }
    }

    /// One pass of the record procedure: lookup, resolve target, update
    async fn try_sync(&self, record: &FeedRecord, attempt: u32) -> Result<SyncOutcome, RemoteError> {
        info!(barcode = %record.barcode, stock = record.stock, attempt, "Syncing stock");

        let products = self.client.find_products_by_barcode(&record.barcode).await?;

        let Some(product) = products.first() else {
            warn!(barcode = %record.barcode, "No product found with barcode");
            return Ok(SyncOutcome::SkippedNotFound);
        };

        let Some(inventory_item_id) = product.first_inventory_item() else {
            warn!(
                barcode = %record.barcode,
                product_id = product.id,
                "No valid inventory_item_id found for product"
            );
            return Ok(SyncOutcome::SkippedNoInventoryTarget);
        };

        self.client
            .set_inventory_level(self.location_id, inventory_item_id, record.stock)
            .await?;

        info!(
            barcode = %record.barcode,
            stock = record.stock,
            inventory_item_id,
            "Stock updated"
        );

        self.pacer
            .pause(PauseReason::AfterUpdate, self.config.call_delay)
            .await;

        Ok(SyncOutcome::Applied { attempts: attempt })
    }
}
