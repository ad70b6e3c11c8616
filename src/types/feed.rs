//! Feed-related types for the stock synchronizer
//!
//! This module defines the record produced for every valid feed row and the
//! identifiers used when applying it to the storefront.

/// Barcode (EAN) exactly as it appears in the supplier feed
///
/// No normalization is applied: whitespace and leading zeros are kept,
/// since the storefront matches on the literal value.
pub type Barcode = String;

/// Stock quantity
///
/// Non-negative; quantities above 4,294,967,295 are rejected at parse time.
pub type Stock = u32;

/// Storefront inventory item identifier
pub type InventoryItemId = u64;

/// Storefront location identifier
pub type LocationId = u64;

/// A single unit of work parsed from the supplier feed
///
/// Created by the feed reader for each syntactically valid row and never
/// mutated afterwards. Barcodes are not guaranteed unique within a feed;
/// duplicates are synchronized independently and the last write wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedRecord {
    /// Barcode used to look up the product on the storefront
    pub barcode: Barcode,

    /// Quantity to set as available at the configured location
    pub stock: Stock,
}

impl FeedRecord {
    pub fn new(barcode: impl Into<Barcode>, stock: Stock) -> Self {
        FeedRecord {
            barcode: barcode.into(),
            stock,
        }
    }
}
