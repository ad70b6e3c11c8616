//! Capability traits for the feed, the storefront and pacing
//!
//! The synchronizer and the pipeline only see these traits, so the
//! network-backed implementations in `client` and the real sleeps in
//! `pacing` can be swapped for fakes in tests.

use crate::core::pacing::{Delay, PauseReason};
use crate::types::{FeedError, InventoryItemId, LocationId, Product, RemoteError, Stock};
use async_trait::async_trait;
use futures::io::AsyncRead;

/// Byte stream of a feed body
pub type FeedStream = Box<dyn AsyncRead + Unpin + Send>;

/// Source of the supplier feed
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FeedSource: Send + Sync {
    /// Open the feed for streaming
    ///
    /// Transport failures and non-success responses are run-fatal and
    /// reported here, before any byte is parsed.
    async fn open(&self) -> Result<FeedStream, FeedError>;
}

/// Storefront inventory operations used by the synchronizer
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InventoryClient: Send + Sync {
    /// List the products whose variants carry the given barcode
    async fn find_products_by_barcode(&self, barcode: &str) -> Result<Vec<Product>, RemoteError>;

    /// Set the available quantity of an inventory item at a location
    async fn set_inventory_level(
        &self,
        location_id: LocationId,
        inventory_item_id: InventoryItemId,
        available: Stock,
    ) -> Result<(), RemoteError>;
}

/// Suspends the run between remote calls
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Pacer: Send + Sync {
    async fn pause(&self, reason: PauseReason, delay: Delay);
}
