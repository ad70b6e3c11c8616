//! Outcome types for record synchronization
//!
//! Every record ends in exactly one [`SyncOutcome`]; the [`SyncReport`]
//! tallies them for the end-of-run summary.

use super::error::RemoteError;
use std::fmt;

/// Terminal state of applying one feed record to the storefront
#[derive(Debug, Clone, PartialEq)]
pub enum SyncOutcome {
    /// Inventory level was set
    Applied {
        /// Attempts used, including the successful one
        attempts: u32,
    },

    /// The barcode lookup returned no products
    SkippedNotFound,

    /// The first matched product has no variant with an inventory item
    SkippedNoInventoryTarget,

    /// A remote call failed and the record was abandoned
    ///
    /// Either the error was not retryable or the attempt budget ran out.
    FailedPermanently {
        attempts: u32,
        error: RemoteError,
    },
}

impl SyncOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, SyncOutcome::Applied { .. })
    }
}

/// Per-outcome counts for one run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub applied: usize,
    pub skipped_not_found: usize,
    pub skipped_no_inventory_target: usize,
    pub failed: usize,
}

impl SyncReport {
    /// Count an outcome
    pub fn record(&mut self, outcome: &SyncOutcome) {
        match outcome {
            SyncOutcome::Applied { .. } => self.applied += 1,
            SyncOutcome::SkippedNotFound => self.skipped_not_found += 1,
            SyncOutcome::SkippedNoInventoryTarget => self.skipped_no_inventory_target += 1,
            SyncOutcome::FailedPermanently { .. } => self.failed += 1,
        }
    }

    /// Number of records processed
    pub fn total(&self) -> usize {
        self.applied + self.skipped_not_found + self.skipped_no_inventory_target + self.failed
    }
}

impl fmt::Display for SyncReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} records: {} applied, {} not found, {} without inventory item, {} failed",
            self.total(),
            self.applied,
            self.skipped_not_found,
            self.skipped_no_inventory_target,
            self.failed
        )
    }
}
