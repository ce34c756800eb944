//! Upstream API client.
//!
//! Builds list URLs for the three resources and fetches pages through the
//! shared [`HttpClient`]. The client is cheap to clone, so the fetch
//! coordinator hands an owned copy to every spawned request.

use anyhow::{Context, Result};
use url::Url;

use super::http::HttpClient;
use super::models::Page;
use crate::resource::ResourceKind;

/// Public endpoint the client talks to unless overridden on the CLI.
pub const DEFAULT_BASE_URL: &str = "https://rickandmortyapi.com/api";

/// Client bound to one API base URL.
#[derive(Clone)]
pub struct ApiClient {
    http: HttpClient,
    base: String,
}

impl ApiClient {
    /// Create a client for the given base URL. The URL is validated here so
    /// a bad `--base-url` fails at startup instead of on the first fetch.
    pub fn new(base_url: &str) -> Result<Self> {
        let base = base_url.trim_end_matches('/').to_string();
        Url::parse(&base).with_context(|| format!("Invalid base URL: {}", base_url))?;

        Ok(Self {
            http: HttpClient::new()?,
            base,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base
    }

    /// Build the list URL for one page of a resource.
    ///
    /// The name filter is only attached for resources that support search,
    /// and is percent-encoded.
    pub fn page_url(&self, kind: ResourceKind, page: u32, name: &str) -> String {
        let mut url = format!("{}/{}?page={}", self.base, kind.def().path, page);
        if kind.supports_search() && !name.is_empty() {
            url.push_str("&name=");
            url.push_str(&urlencoding::encode(name));
        }
        url
    }

    /// Fetch one page of a resource, optionally filtered by name.
    pub async fn fetch_page(&self, kind: ResourceKind, page: u32, name: &str) -> Result<Page> {
        let url = self.page_url(kind, page, name);
        let value = self.http.get(&url).await?;
        let parsed: Page = serde_json::from_value(value).context("Unexpected response shape")?;

        tracing::debug!(
            "Fetched {} {} (page {} of {})",
            parsed.results.len(),
            kind.def().key,
            page,
            parsed.info.pages
        );
        Ok(parsed)
    }
}
