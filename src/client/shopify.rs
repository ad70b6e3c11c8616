//! Shopify Admin REST API client
//!
//! Implements the two storefront calls the synchronizer needs: product
//! lookup by barcode and setting an inventory level.

use crate::core::traits::InventoryClient;
use crate::types::{InventoryItemId, LocationId, Product, RemoteError, Stock};
use async_trait::async_trait;
use reqwest::Response;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// API version used when none is configured
pub const DEFAULT_API_VERSION: &str = "2024-10";

const ACCESS_TOKEN_HEADER: &str = "X-Shopify-Access-Token";

/// Storefront client authenticated with an Admin API access token
#[derive(Debug, Clone)]
pub struct ShopifyClient {
    http: reqwest::Client,
    base_url: String,
    api_version: String,
    access_token: String,
}

#[derive(Deserialize)]
struct ProductList {
    #[serde(default)]
    products: Vec<Product>,
}

#[derive(Serialize)]
struct InventoryLevelSet {
    location_id: LocationId,
    inventory_item_id: InventoryItemId,
    available: Stock,
}

impl ShopifyClient {
    /// Create a client for the given shop
    ///
    /// `shop_name` may be the bare shop handle (`my-shop`) or a full domain
    /// (`my-shop.myshopify.com`).
    pub fn new(
        http: reqwest::Client,
        shop_name: &str,
        access_token: impl Into<String>,
        api_version: impl Into<String>,
    ) -> Self {
        Self {
            http,
            base_url: format!("https://{}", shop_domain(shop_name)),
            api_version: api_version.into(),
            access_token: access_token.into(),
        }
    }

    /// Point the client at another host (used against mock servers)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, resource: &str) -> String {
        format!(
            "{}/admin/api/{}/{}",
            self.base_url.trim_end_matches('/'),
            self.api_version,
            resource
        )
    }
}

/// Expand a bare shop handle to its myshopify.com domain
pub fn shop_domain(shop_name: &str) -> String {
    let shop_name = shop_name.trim();
    if shop_name.contains('.') {
        shop_name.to_string()
    } else {
        format!("{}.myshopify.com", shop_name)
    }
}

/// Turn a non-success response into an Api error carrying its body
async fn ensure_success(response: Response) -> Result<Response, RemoteError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await?;
    Err(RemoteError::api(status.as_u16(), body))
}

#[async_trait]
impl InventoryClient for ShopifyClient {
    async fn find_products_by_barcode(&self, barcode: &str) -> Result<Vec<Product>, RemoteError> {
        let response = self
            .http
            .get(self.endpoint("products.json"))
            .header(ACCESS_TOKEN_HEADER, &self.access_token)
            .query(&[("barcode", barcode)])
            .send()
            .await?;

        let list: ProductList = ensure_success(response).await?.json().await?;
        debug!(barcode, matches = list.products.len(), "Product lookup finished");

        Ok(list.products)
    }

    async fn set_inventory_level(
        &self,
        location_id: LocationId,
        inventory_item_id: InventoryItemId,
        available: Stock,
    ) -> Result<(), RemoteError> {
        let body = InventoryLevelSet {
            location_id,
            inventory_item_id,
            available,
        };

        let response = self
            .http
            .post(self.endpoint("inventory_levels/set.json"))
            .header(ACCESS_TOKEN_HEADER, &self.access_token)
            .json(&body)
            .send()
            .await?;

        ensure_success(response).await?;
        debug!(location_id, inventory_item_id, available, "Inventory level set");

        Ok(())
    }
}
