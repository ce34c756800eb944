//! Response envelope types.
//!
//! Every list endpoint wraps its payload in `{ "info": ..., "results": [...] }`.
//! Only the envelope is typed here; the items inside stay loose JSON because
//! their shape depends on which resource was requested and the table columns
//! pull fields out by path at render time.

use serde::Deserialize;
use serde_json::Value;

/// Pagination metadata attached to every list response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageInfo {
    /// Total number of items across all pages.
    #[serde(default)]
    pub count: u64,
    /// Total number of pages.
    #[serde(default)]
    pub pages: u32,
    /// Absolute URL of the next page, if any.
    #[serde(default)]
    pub next: Option<String>,
    /// Absolute URL of the previous page, if any.
    #[serde(default)]
    pub prev: Option<String>,
}

/// One page of results as returned by the upstream API.
///
/// Both fields default, so a body that parses as JSON but misses either key
/// still produces a usable (empty) page instead of a hard failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Page {
    #[serde(default)]
    pub info: PageInfo,
    #[serde(default)]
    pub results: Vec<Value>,
}

impl Page {
    /// True when the page parsed fine but carried no items.
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}
