//! Core business logic module
//!
//! This module contains the synchronization components:
//! - `traits` - Capability traits for the feed, the storefront and pacing
//! - `pacing` - Jittered delays and the tokio-backed pacer
//! - `synchronizer` - Rate-limited, retrying batch synchronizer

pub mod pacing;
pub mod synchronizer;
pub mod traits;

pub use pacing::{Delay, PauseReason, TokioPacer};
pub use synchronizer::{BatchConfig, BatchSynchronizer, MAX_ATTEMPTS, RETRY_DELAY};
pub use traits::{FeedSource, FeedStream, InventoryClient, Pacer};
