//! Shopping search client
//!
//! Queries a SerpAPI-style shopping search, localized to the UK, and
//! normalizes results into [`ShoppingItem`]s.

use async_trait::async_trait;
use fitcheck_core::domain::shopping::{ShoppingItem, UNKNOWN_RETAILER, format_gbp_price};
use reqwest::Client;
use serde::Deserialize;

use crate::error::{ClientError, Result};
use crate::{handle_response, normalize_base_url};

/// Default shopping search base URL
pub const DEFAULT_SHOPPING_URL: &str = "https://serpapi.com";

/// Finds purchasable items for a free-text query
#[async_trait]
pub trait ShoppingProvider: Send + Sync {
    async fn search(&self, query: &str, num_results: usize) -> Result<Vec<ShoppingItem>>;
}

/// HTTP client for the shopping search API
#[derive(Debug, Clone)]
pub struct ShoppingClient {
    base_url: String,
    api_key: String,
    client: Client,
}

impl ShoppingClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_client(DEFAULT_SHOPPING_URL, api_key, Client::new())
    }

    pub fn with_client(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        client: Client,
    ) -> Self {
        Self {
            base_url: normalize_base_url(base_url),
            api_key: api_key.into(),
            client,
        }
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    shopping_results: Vec<RawShoppingResult>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawShoppingResult {
    #[serde(default)]
    title: String,
    #[serde(default)]
    price: Option<String>,
    #[serde(default)]
    source: Option<String>,
    #[serde(default)]
    merchant: Option<String>,
    #[serde(default)]
    seller: Option<String>,
    #[serde(default)]
    link: Option<String>,
    #[serde(default)]
    product_link: Option<String>,
    #[serde(default)]
    thumbnail: Option<String>,
}

impl From<RawShoppingResult> for ShoppingItem {
    fn from(raw: RawShoppingResult) -> Self {
        Self {
            title: raw.title,
            price: raw.price.as_deref().map(format_gbp_price).unwrap_or_default(),
            seller: raw
                .source
                .or(raw.merchant)
                .or(raw.seller)
                .unwrap_or_else(|| UNKNOWN_RETAILER.to_string()),
            link: raw.link.or(raw.product_link).unwrap_or_default(),
            image_url: raw.thumbnail.unwrap_or_default(),
        }
    }
}

#[async_trait]
impl ShoppingProvider for ShoppingClient {
    async fn search(&self, query: &str, num_results: usize) -> Result<Vec<ShoppingItem>> {
        if query.trim().is_empty() {
            return Err(ClientError::InvalidRequest("No query provided".to_string()));
        }

        let url = format!("{}/search.json", self.base_url);
        let num = num_results.to_string();

        tracing::debug!(query, num_results, "Searching shopping results");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("q", query),
                ("tbm", "shop"),
                ("location", "United Kingdom"),
                ("hl", "en"),
                ("gl", "uk"),
                ("currency", "GBP"),
                ("num", num.as_str()),
                ("api_key", self.api_key.as_str()),
            ])
            .send()
            .await?;

        let search: SearchResponse = handle_response(response).await?;

        if let Some(error) = search.error {
            return Err(ClientError::Rejected(error));
        }

        Ok(search
            .shopping_results
            .into_iter()
            .take(num_results)
            .map(ShoppingItem::from)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_normalization() {
        let raw: RawShoppingResult = serde_json::from_str(
            r#"{"title":"Oxford shirt","price":"$25.00","merchant":"Shirts Ltd","link":"https://s/1","thumbnail":"https://s/1.jpg"}"#,
        )
        .unwrap();
        let item = ShoppingItem::from(raw);

        assert_eq!(item.price, "£25.00");
        assert_eq!(item.seller, "Shirts Ltd");
        assert_eq!(item.image_url, "https://s/1.jpg");
    }

    #[test]
    fn test_seller_fallback() {
        let raw: RawShoppingResult =
            serde_json::from_str(r#"{"title":"Chinos","price":"£40","product_link":"https://s/2"}"#)
                .unwrap();
        let item = ShoppingItem::from(raw);

        assert_eq!(item.seller, UNKNOWN_RETAILER);
        assert_eq!(item.price, "£40");
        assert_eq!(item.link, "https://s/2");
    }
}
