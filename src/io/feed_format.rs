//! Feed format handling for supplier stock rows
//!
//! This module centralizes all feed format concerns, providing:
//! - FeedRow structure for deserialization
//! - Leading-prefix stock parsing
//! - Conversion from feed rows to domain records
//!
//! All functions are pure (no I/O) for easy testing.

use crate::types::{FeedRecord, Stock};
use serde::Deserialize;

/// Field separator used by the supplier feed
pub const FEED_DELIMITER: u8 = b';';

/// Feed row structure for deserialization
///
/// Only the `ean` and `stock` columns are read; the supplier feed carries
/// many more (title, price, brand, ...) which are ignored. Both fields are
/// optional so that rows with missing or empty cells still deserialize and
/// can be rejected with a diagnostic instead of a parse error.
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct FeedRow {
    #[serde(default)]
    pub ean: Option<String>,
    #[serde(default)]
    pub stock: Option<String>,
}

/// Parse a stock quantity using leading-numeric-prefix semantics
///
/// Leading whitespace and an optional sign are accepted, then the longest
/// run of decimal digits is read and everything after it is ignored:
/// `"42"` and `"42.9"` and `"42 units"` all yield 42.
///
/// # Returns
///
/// * `Ok(stock)` for a non-negative value that fits in [`Stock`]
/// * `Err(String)` when there is no numeric prefix, the value is negative,
///   or it is out of range
pub fn parse_stock(raw: &str) -> Result<Stock, String> {
    let trimmed = raw.trim_start();

    let (negative, unsigned) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits_len = unsigned
        .bytes()
        .take_while(|b| b.is_ascii_digit())
        .count();
    if digits_len == 0 {
        return Err(format!("Stock '{}' is not a number", raw));
    }
    let digits = &unsigned[..digits_len];

    // Out of range before sign handling, so "-99999999999" is out of range too
    let value = digits
        .parse::<Stock>()
        .map_err(|_| format!("Stock '{}' is out of range", raw))?;

    if negative && value != 0 {
        return Err(format!("Stock '{}' is negative", raw));
    }

    Ok(value)
}

/// Convert a FeedRow to a FeedRecord
///
/// The barcode is taken verbatim. A row is rejected when the barcode is
/// missing or empty, or when the stock has no usable numeric prefix.
///
/// # Returns
///
/// Result containing either:
/// - Ok(FeedRecord) - Row is usable
/// - Err(String) - Reason the row is skipped
pub fn convert_feed_row(row: FeedRow) -> Result<FeedRecord, String> {
    let barcode = match row.ean {
        Some(ean) if !ean.is_empty() => ean,
        _ => {
            return Err(format!(
                "Missing EAN (stock: {})",
                row.stock.as_deref().unwrap_or("<none>")
            ))
        }
    };

    let stock = match row.stock.as_deref() {
        Some(raw) => parse_stock(raw).map_err(|e| format!("{} for EAN {}", e, barcode))?,
        None => return Err(format!("Missing stock for EAN {}", barcode)),
    };

    Ok(FeedRecord { barcode, stock })
}
