//! Catalog source adapter.
//!
//! Pages through the AI Foundry model catalog's regional listing endpoint
//! (the Cognitive Services account management API), following `nextLink`
//! continuation URLs until exhausted.

use async_stream::try_stream;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::credentials::AccessToken;
use crate::error::SourceResult;
use crate::sources::{default_client, get_page};
use crate::traits::source::{ModelSource, RecordStream};
use crate::types::record::{RawModelRecord, SourceDescriptor};

const DEFAULT_BASE_URL: &str = "https://management.azure.com";
const API_VERSION: &str = "2024-10-01";

/// One page of the catalog listing response.
#[derive(Debug, Deserialize)]
struct CatalogPage {
    #[serde(default)]
    value: Vec<Value>,

    #[serde(rename = "nextLink")]
    next_link: Option<String>,
}

/// Adapter for the primary model catalog, queried by region.
pub struct CatalogSource {
    client: reqwest::Client,
    token: AccessToken,
    subscription_id: String,
    region: String,
    base_url: String,
}

impl CatalogSource {
    /// Create a catalog source for one subscription and region.
    pub fn new(
        token: AccessToken,
        subscription_id: impl Into<String>,
        region: impl Into<String>,
    ) -> Self {
        Self {
            client: default_client(),
            token,
            subscription_id: subscription_id.into(),
            region: region.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Override the management endpoint (sovereign clouds, tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Use a custom HTTP client.
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    fn first_page_url(&self) -> String {
        format!(
            "{}/subscriptions/{}/providers/Microsoft.CognitiveServices/locations/{}/models?api-version={}",
            self.base_url, self.subscription_id, self.region, API_VERSION
        )
    }

    async fn fetch_page(&self, url: &str) -> SourceResult<CatalogPage> {
        debug!(url = %url, region = %self.region, "fetching catalog page");
        get_page(&self.client, url, &self.token, &self.region).await
    }
}

impl ModelSource for CatalogSource {
    fn descriptor(&self) -> SourceDescriptor {
        SourceDescriptor::catalog()
    }

    fn list_models(&self) -> RecordStream<'_> {
        Box::pin(try_stream! {
            let mut url = self.first_page_url();
            loop {
                let page = self.fetch_page(&url).await?;
                debug!(
                    region = %self.region,
                    entries = page.value.len(),
                    has_next = page.next_link.is_some(),
                    "catalog page received"
                );
                for entry in page.value {
                    if let Some(record) = RawModelRecord::from_value(entry) {
                        yield record;
                    }
                }
                match page.next_link {
                    Some(next) => url = next,
                    None => break,
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_page_url_targets_the_region() {
        let source = CatalogSource::new(AccessToken::new("t"), "sub-123", "eastus");
        let url = source.first_page_url();

        assert!(url.starts_with("https://management.azure.com/subscriptions/sub-123/"));
        assert!(url.contains("/locations/eastus/models"));
        assert!(url.contains("api-version="));
    }

    #[test]
    fn base_url_override_is_used() {
        let source = CatalogSource::new(AccessToken::new("t"), "sub-123", "eastus")
            .with_base_url("http://localhost:9000");
        assert!(source.first_page_url().starts_with("http://localhost:9000/"));
    }

    #[test]
    fn catalog_page_parses_listing_shape() {
        let json = r#"{
            "value": [
                { "kind": "OpenAI", "skuName": "S0", "model": { "name": "gpt-4o", "version": "2024-05-13" } }
            ],
            "nextLink": "https://management.azure.com/page2"
        }"#;

        let page: CatalogPage = serde_json::from_str(json).unwrap();
        assert_eq!(page.value.len(), 1);
        assert_eq!(page.next_link.as_deref(), Some("https://management.azure.com/page2"));
    }

    #[test]
    fn catalog_page_tolerates_missing_fields() {
        let page: CatalogPage = serde_json::from_str("{}").unwrap();
        assert!(page.value.is_empty());
        assert!(page.next_link.is_none());
    }
}
