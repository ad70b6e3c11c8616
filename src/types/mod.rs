//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `feed`: Feed records and identifiers
//! - `product`: Storefront products and variants
//! - `outcome`: Per-record outcomes and the run report
//! - `error`: Error types for the feed and storefront tiers

pub mod error;
pub mod feed;
pub mod outcome;
pub mod product;

pub use error::{ErrorPayload, FeedError, RemoteError};
pub use feed::{Barcode, FeedRecord, InventoryItemId, LocationId, Stock};
pub use outcome::{SyncOutcome, SyncReport};
pub use product::{Product, Variant};
