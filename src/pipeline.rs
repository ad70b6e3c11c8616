//! One complete sync run: ingest the feed, then synchronize it
//!
//! Ingestion is all-or-nothing. If the feed cannot be fetched, or its stream
//! breaks part way, the run stops with a [`FeedError`] and the synchronizer
//! is never invoked. Once ingestion succeeds, the run always completes and
//! per-record problems only show up in the returned [`SyncReport`].

use crate::core::traits::{FeedSource, InventoryClient, Pacer};
use crate::core::BatchSynchronizer;
use crate::io::FeedReader;
use crate::types::{FeedError, SyncReport};
use tracing::{error, info};

/// Run the feed-to-storefront sync once
pub async fn run<F, C, P>(
    feed: &F,
    synchronizer: &BatchSynchronizer<C, P>,
) -> Result<SyncReport, FeedError>
where
    F: FeedSource + ?Sized,
    C: InventoryClient,
    P: Pacer,
{
    let stream = feed.open().await.map_err(|e| {
        error!(error = %e, "Error downloading CSV");
        e
    })?;

    let records = FeedReader::new(stream).read_all().await.map_err(|e| {
        error!(error = %e, "Error processing CSV stream");
        e
    })?;

    info!(
        records = records.len(),
        batch_size = synchronizer.config().batch_size,
        "Starting batch synchronization"
    );

    let report = synchronizer.run(&records).await;
    info!(%report, "Sync finished");

    Ok(report)
}
