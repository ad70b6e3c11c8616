//! I/O module
//!
//! Handles supplier feed parsing.
//!
//! # Components
//!
//! - `feed_format` - Feed format handling (row structure, stock parsing, record conversion)
//! - `feed_reader` - Asynchronous feed reader with stream interface

pub mod feed_format;
pub mod feed_reader;

pub use feed_format::{convert_feed_row, parse_stock, FeedRow, FEED_DELIMITER};
pub use feed_reader::FeedReader;
