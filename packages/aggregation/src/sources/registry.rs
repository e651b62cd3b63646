//! Registry source adapter.
//!
//! Pages through one named model registry's listing endpoint using
//! `$skipToken` continuation (a different pagination style from the catalog's
//! `nextLink`). One instance is constructed per configured registry name.
//!
//! The configured registry list is not assumed accurate: a name that does not
//! exist or is not readable surfaces as a single error on the first page and
//! zero records, never a crash.

use async_stream::try_stream;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;
use url::form_urlencoded;

use crate::credentials::AccessToken;
use crate::error::SourceResult;
use crate::sources::{default_client, get_page};
use crate::traits::source::{ModelSource, RecordStream};
use crate::types::record::{RawModelRecord, SourceDescriptor};

const DEFAULT_BASE_URL: &str = "https://eastus.api.azureml.ms";
const API_VERSION: &str = "2024-04-01";

/// One page of a registry listing response.
#[derive(Debug, Deserialize)]
struct RegistryPage {
    #[serde(default)]
    value: Vec<Value>,

    #[serde(rename = "$skipToken")]
    skip_token: Option<String>,
}

/// Adapter for one named model registry.
pub struct RegistrySource {
    client: reqwest::Client,
    token: AccessToken,
    registry_name: String,
    base_url: String,
}

impl RegistrySource {
    /// Create a source for one registry name.
    pub fn new(token: AccessToken, registry_name: impl Into<String>) -> Self {
        Self {
            client: default_client(),
            token,
            registry_name: registry_name.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Override the registry discovery endpoint (other regions, tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Use a custom HTTP client.
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    /// The registry this source reads from.
    pub fn registry_name(&self) -> &str {
        &self.registry_name
    }

    fn page_url(&self, skip_token: Option<&str>) -> String {
        let mut url = format!(
            "{}/modelregistry/v1.0/registry/models?registryName={}&api-version={}",
            self.base_url, self.registry_name, API_VERSION
        );
        if let Some(token) = skip_token {
            // The token is opaque and server-issued; escape it so reserved
            // query characters inside it cannot split or alter the URL.
            url.push_str("&$skipToken=");
            url.extend(form_urlencoded::byte_serialize(token.as_bytes()));
        }
        url
    }

    async fn fetch_page(&self, skip_token: Option<&str>) -> SourceResult<RegistryPage> {
        let url = self.page_url(skip_token);
        debug!(registry = %self.registry_name, url = %url, "fetching registry page");
        get_page(&self.client, &url, &self.token, &self.registry_name).await
    }
}

impl ModelSource for RegistrySource {
    fn descriptor(&self) -> SourceDescriptor {
        SourceDescriptor::registry(&self.registry_name)
    }

    fn list_models(&self) -> RecordStream<'_> {
        Box::pin(try_stream! {
            let mut skip_token: Option<String> = None;
            loop {
                let page = self.fetch_page(skip_token.as_deref()).await?;
                debug!(
                    registry = %self.registry_name,
                    entries = page.value.len(),
                    has_next = page.skip_token.is_some(),
                    "registry page received"
                );
                for entry in page.value {
                    if let Some(record) = RawModelRecord::from_value(entry) {
                        yield record;
                    }
                }
                match page.skip_token {
                    Some(token) => skip_token = Some(token),
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
    fn page_url_carries_the_registry_name() {
        let source = RegistrySource::new(AccessToken::new("t"), "azureml-meta");
        let url = source.page_url(None);

        assert!(url.contains("registryName=azureml-meta"));
        assert!(!url.contains("$skipToken"));
    }

    #[test]
    fn page_url_appends_continuation_token() {
        let source = RegistrySource::new(AccessToken::new("t"), "azureml");
        let url = source.page_url(Some("abc123"));
        assert!(url.ends_with("&$skipToken=abc123"));
    }

    #[test]
    fn continuation_token_is_escaped_as_one_query_value() {
        let source = RegistrySource::new(AccessToken::new("t"), "azureml");
        let url = source.page_url(Some("abc&registryName=evil+x"));

        assert!(url.ends_with("&$skipToken=abc%26registryName%3Devil%2Bx"));
        assert_eq!(url.matches("registryName=").count(), 1);
    }

    #[test]
    fn registry_page_parses_listing_shape() {
        let json = r#"{
            "value": [
                { "name": "Llama-3-8B", "version": 2, "modelType": "custom_model", "stage": "Production" }
            ],
            "$skipToken": "next-token"
        }"#;

        let page: RegistryPage = serde_json::from_str(json).unwrap();
        assert_eq!(page.value.len(), 1);
        assert_eq!(page.skip_token.as_deref(), Some("next-token"));
    }

    #[test]
    fn registry_page_tolerates_empty_registry() {
        let page: RegistryPage = serde_json::from_str(r#"{"value": []}"#).unwrap();
        assert!(page.value.is_empty());
        assert!(page.skip_token.is_none());
    }
}
