//! Network-backed implementations of the capability traits
//!
//! - `http_feed` - Supplier feed over HTTP(S)
//! - `shopify` - Shopify Admin REST API inventory client

pub mod http_feed;
pub mod shopify;

pub use http_feed::HttpFeedSource;
pub use shopify::{ShopifyClient, DEFAULT_API_VERSION};
