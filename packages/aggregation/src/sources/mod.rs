//! Source adapter implementations.

pub mod catalog;
pub mod mock;
pub mod registry;

pub use catalog::CatalogSource;
pub use mock::MockSource;
pub use registry::RegistrySource;

use std::time::Duration;

use serde::de::DeserializeOwned;

use crate::credentials::AccessToken;
use crate::error::{SourceError, SourceResult};

/// Ceiling for one page fetch. Carried on every request rather than the
/// client, so no client configuration can leave requests unbounded.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Build an authenticated GET for one listing page.
fn listing_request(
    client: &reqwest::Client,
    url: &str,
    token: &AccessToken,
) -> reqwest::RequestBuilder {
    client
        .get(url)
        .timeout(REQUEST_TIMEOUT)
        .bearer_auth(token.expose())
}

/// Fetch one listing page as JSON, mapping HTTP failures to [`SourceError`].
///
/// `subject` names the source for error messages (registry name, or the
/// catalog region).
pub(crate) async fn get_page<T: DeserializeOwned>(
    client: &reqwest::Client,
    url: &str,
    token: &AccessToken,
    subject: &str,
) -> SourceResult<T> {
    let response = listing_request(client, url, token)
        .send()
        .await
        .map_err(|e| {
            tracing::warn!(url = %url, error = %e, "page request failed");
            SourceError::Http(Box::new(e))
        })?;

    let status = response.status();
    if status == reqwest::StatusCode::NOT_FOUND {
        return Err(SourceError::NotFound(subject.to_string()));
    }
    if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
        return Err(SourceError::AccessDenied(subject.to_string()));
    }
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(SourceError::Api {
            status: status.as_u16(),
            message: body.chars().take(500).collect(),
        });
    }

    response
        .json::<T>()
        .await
        .map_err(|e| SourceError::Http(Box::new(e)))
}

/// Build the shared HTTP client used by the real adapters. Timeouts ride on
/// each request via [`listing_request`], not on the client.
pub(crate) fn default_client() -> reqwest::Client {
    reqwest::Client::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listing_requests_carry_the_timeout_and_credential() {
        let client = default_client();
        let token = AccessToken::new("t");

        let request = listing_request(&client, "https://example.com/models", &token)
            .build()
            .unwrap();

        assert_eq!(request.timeout(), Some(&REQUEST_TIMEOUT));
        assert!(request
            .headers()
            .contains_key(reqwest::header::AUTHORIZATION));
    }
}
