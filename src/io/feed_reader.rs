//! Asynchronous feed reader with stream interface
//!
//! Provides a lazy sequence of feed records parsed from a `;`-separated
//! supplier feed as it arrives over the network.
//!
//! # Design
//!
//! The FeedReader uses:
//! - csv-async for streaming parsing (the body is never buffered whole)
//! - the feed_format module for row validation and conversion
//!
//! Rows are read as raw byte records and only the `ean` and `stock` cells are
//! decoded, so a title or description in another encoding does not affect
//! the run.
//!
//! # Architecture
//!
//! ```text
//! Feed body → FeedReader → FeedRecords
//!                 ↓
//!          feed_format module
//!        (FeedRow, convert_feed_row)
//! ```
//!
//! # Error Handling
//!
//! - Rows failing validation are logged and skipped; reading continues
//! - A decode or I/O error ends the sequence with a single `Err`; nothing
//!   is yielded after it. Invalid UTF-8 in the `ean` or `stock` cell counts
//!   as a decode error.

use crate::io::feed_format::{convert_feed_row, FeedRow, FEED_DELIMITER};
use crate::types::{FeedError, FeedRecord};
use csv_async::{AsyncReaderBuilder, ByteRecord};
use futures::io::AsyncRead;
use futures::stream::{self, Stream};
use tracing::{debug, info, warn};

/// Asynchronous feed reader
///
/// Yields one [`FeedRecord`] per valid row, in feed order.
pub struct FeedReader<R: AsyncRead + Unpin> {
    csv_reader: csv_async::AsyncReader<R>,
    headers: Option<ByteRecord>,
    record: ByteRecord,
    rows_read: u64,
    rows_skipped: u64,
    failed: bool,
}

impl<R: AsyncRead + Unpin + Send + 'static> FeedReader<R> {
    /// Create a new FeedReader from an async reader
    ///
    /// The first line is read as the header. Rows may have fewer or more
    /// fields than the header; fields are never trimmed.
    pub fn new(reader: R) -> Self {
        let csv_reader = AsyncReaderBuilder::new()
            .delimiter(FEED_DELIMITER)
            .flexible(true)
            .create_reader(reader);

        Self {
            csv_reader,
            headers: None,
            record: ByteRecord::new(),
            rows_read: 0,
            rows_skipped: 0,
            failed: false,
        }
    }

    /// Read the next valid record
    ///
    /// # Returns
    ///
    /// - `Some(Ok(record))` for the next valid row
    /// - `Some(Err(e))` once, when the stream cannot be decoded
    /// - `None` when the feed is exhausted or after an error
    pub async fn next_record(&mut self) -> Option<Result<FeedRecord, FeedError>> {
        if self.failed {
            return None;
        }

        if self.headers.is_none() {
            match self.csv_reader.byte_headers().await {
                Ok(headers) => self.headers = Some(headers.clone()),
                Err(e) => return Some(Err(self.fail(e))),
            }
        }

        loop {
            match self.csv_reader.read_byte_record(&mut self.record).await {
                Ok(true) => {}
                Ok(false) => return None,
                Err(e) => return Some(Err(self.fail(e))),
            }
            self.rows_read += 1;

            let row: FeedRow = match self.record.deserialize(self.headers.as_ref()) {
                Ok(row) => row,
                Err(e) => return Some(Err(self.fail(e))),
            };
            debug!(row = self.rows_read, ean = ?row.ean, stock = ?row.stock, "Row received");

            match convert_feed_row(row) {
                Ok(record) => return Some(Ok(record)),
                Err(reason) => {
                    self.rows_skipped += 1;
                    warn!(row = self.rows_read, %reason, "Skipping row: invalid EAN or stock");
                }
            }
        }
    }

    fn fail(&mut self, error: csv_async::Error) -> FeedError {
        self.failed = true;
        FeedError::from(error)
    }

    /// Consume the reader as a lazy stream of records
    pub fn into_stream(self) -> impl Stream<Item = Result<FeedRecord, FeedError>> {
        stream::unfold(self, |mut reader| async move {
            reader
                .next_record()
                .await
                .map(|item| (item, reader))
        })
    }

    /// Read the whole feed into memory
    ///
    /// All-or-nothing: if the stream breaks part way, the records read so far
    /// are dropped and the error is returned.
    pub async fn read_all(mut self) -> Result<Vec<FeedRecord>, FeedError> {
        let mut records = Vec::new();

        while let Some(item) = self.next_record().await {
            records.push(item?);
        }

        info!(
            records = records.len(),
            rows = self.rows_read,
            skipped = self.rows_skipped,
            "Feed processed with {} records",
            records.len()
        );

        Ok(records)
    }

    /// Number of data rows read so far (valid or not)
    pub fn rows_read(&self) -> u64 {
        self.rows_read
    }

    /// Number of data rows skipped so far
    pub fn rows_skipped(&self) -> u64 {
        self.rows_skipped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::io::Cursor;
    use futures::StreamExt;

    fn reader_for(content: &[u8]) -> FeedReader<Cursor<Vec<u8>>> {
        FeedReader::new(Cursor::new(content.to_vec()))
    }

    #[tokio::test]
    async fn test_read_all_valid_feed() {
        let feed = b"ean;stock\n1234567890123;7\n8400000000017;0\n";
        let records = reader_for(feed).read_all().await.unwrap();

        assert_eq!(
            records,
            vec![
                FeedRecord::new("1234567890123", 7),
                FeedRecord::new("8400000000017", 0),
            ]
        );
    }

    #[tokio::test]
    async fn test_invalid_rows_are_skipped() {
        let feed = b"ean;stock\n;5\n111;abc\n222;\n333;12abc\n444;42.9\n";
        let mut reader = reader_for(feed);

        let first = reader.next_record().await.unwrap().unwrap();
        assert_eq!(first, FeedRecord::new("333", 12));
        assert_eq!(reader.rows_skipped(), 3);

        let second = reader.next_record().await.unwrap().unwrap();
        assert_eq!(second, FeedRecord::new("444", 42));

        assert!(reader.next_record().await.is_none());
        assert_eq!(reader.rows_read(), 5);
        assert_eq!(reader.rows_skipped(), 3);
    }

    #[tokio::test]
    async fn test_extra_columns_and_order_ignored() {
        let feed = b"id;name;stock;price;ean\n1;Blue mug;15;4,99;8400000000017\n2;Red mug;3;4,99;8400000000024\n";
        let records = reader_for(feed).read_all().await.unwrap();

        assert_eq!(
            records,
            vec![
                FeedRecord::new("8400000000017", 15),
                FeedRecord::new("8400000000024", 3),
            ]
        );
    }

    #[tokio::test]
    async fn test_barcode_is_not_trimmed() {
        let feed = b"ean;stock\n 0042 ;1\n";
        let records = reader_for(feed).read_all().await.unwrap();
        assert_eq!(records, vec![FeedRecord::new(" 0042 ", 1)]);
    }

    #[tokio::test]
    async fn test_comma_is_not_a_separator() {
        let feed = b"ean;stock\n\"123,456\";2\n";
        let records = reader_for(feed).read_all().await.unwrap();
        assert_eq!(records, vec![FeedRecord::new("123,456", 2)]);
    }

    #[tokio::test]
    async fn test_short_rows_are_skipped() {
        let feed = b"ean;stock\n999\n123;4\n";
        let records = reader_for(feed).read_all().await.unwrap();
        assert_eq!(records, vec![FeedRecord::new("123", 4)]);
    }

    #[tokio::test]
    async fn test_missing_stock_column_skips_every_row() {
        let feed = b"ean;quantity\n123;4\n456;5\n";
        let mut reader = reader_for(feed);
        assert!(reader.next_record().await.is_none());
        assert_eq!(reader.rows_skipped(), 2);
    }

    #[tokio::test]
    async fn test_empty_feed() {
        let records = reader_for(b"ean;stock\n").read_all().await.unwrap();
        assert!(records.is_empty());

        let records = reader_for(b"").read_all().await.unwrap();
        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn test_duplicates_are_kept_in_order() {
        let feed = b"ean;stock\n123;1\n456;2\n123;3\n";
        let records = reader_for(feed).read_all().await.unwrap();
        assert_eq!(
            records,
            vec![
                FeedRecord::new("123", 1),
                FeedRecord::new("456", 2),
                FeedRecord::new("123", 3),
            ]
        );
    }

    #[tokio::test]
    async fn test_mid_stream_decode_error_discards_everything() {
        let feed = b"ean;stock\n123;1\n\xff\xfe;2\n456;3\n";
        let result = reader_for(feed).read_all().await;
        assert!(matches!(result, Err(FeedError::Parse { .. })));
    }

    #[tokio::test]
    async fn test_undecodable_ignored_column_is_tolerated() {
        let feed = b"title;ean;stock\nCaf\xe9 mug;8400000000017;5\nPlate;8400000000024;3\n";
        let records = reader_for(feed).read_all().await.unwrap();

        assert_eq!(
            records,
            vec![
                FeedRecord::new("8400000000017", 5),
                FeedRecord::new("8400000000024", 3),
            ]
        );
    }

    #[tokio::test]
    async fn test_undecodable_stock_is_a_decode_error() {
        let feed = b"ean;stock\n123;1\n456;\xff\n";
        let result = reader_for(feed).read_all().await;
        assert!(matches!(result, Err(FeedError::Parse { .. })));
    }

    #[tokio::test]
    async fn test_stream_ends_after_error() {
        let feed = b"ean;stock\n123;1\n\xff\xfe;2\n456;3\n";
        let items: Vec<_> = reader_for(feed).into_stream().collect().await;

        assert_eq!(items.len(), 2);
        assert_eq!(items[0], Ok(FeedRecord::new("123", 1)));
        assert!(items[1].is_err());
    }

    #[tokio::test]
    async fn test_stream_is_lazy() {
        let feed = b"ean;stock\n1;1\n2;2\n3;3\n";
        let first_two: Vec<_> = reader_for(feed).into_stream().take(2).collect().await;
        assert_eq!(
            first_two,
            vec![Ok(FeedRecord::new("1", 1)), Ok(FeedRecord::new("2", 2))]
        );
    }
}
