// src/github/search.rs
// =============================================================================
// The GitHub repository search endpoint: what we send and what comes back.
//
// Request:
//   GET https://api.github.com/search/repositories?q=swift&sort=stars&order=asc&page=N
//
// Response (only the fields we read, everything else is ignored):
//   { "items": [ { "name": "...", "description": "..." | null,
//                  "owner": { "avatar_url": "..." } } ] }
//
// Rust concepts:
// - serde Deserialize: Turns JSON into typed structs, rejecting bad shapes
// - Option<T>: For the description, which GitHub sends as null when unset
// - url::Url: Builds query strings with proper percent-encoding
// =============================================================================

use serde::Deserialize;
use url::Url;

use super::error::FetchError;
use crate::list::ListEntry;

pub const DEFAULT_BASE_URL: &str = "https://api.github.com/search/repositories";
pub const DEFAULT_TERM: &str = "swift";
pub const DEFAULT_SORT: &str = "stars";
pub const DEFAULT_ORDER: &str = "asc";

/// The fixed part of every search request. Only the page number varies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub base_url: String,
    pub term: String,
    pub sort: String,
    pub order: String,
}

impl Default for SearchQuery {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            term: DEFAULT_TERM.to_string(),
            sort: DEFAULT_SORT.to_string(),
            order: DEFAULT_ORDER.to_string(),
        }
    }
}

impl SearchQuery {
    /// Builds the URL for one page of results
    ///
    /// The page number goes into the `page` query parameter as-is.
    pub fn page_url(&self, page: u32) -> Result<Url, FetchError> {
        let page = page.to_string();
        let url = Url::parse_with_params(
            &self.base_url,
            &[
                ("q", self.term.as_str()),
                ("sort", self.sort.as_str()),
                ("order", self.order.as_str()),
                ("page", page.as_str()),
            ],
        )?;
        Ok(url)
    }
}

// Wire format. These types only exist between the HTTP body and ListEntry.
#[derive(Debug, Deserialize)]
struct SearchResponse {
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    name: String,
    #[serde(default)]
    description: Option<String>,
    owner: Owner,
}

#[derive(Debug, Deserialize)]
struct Owner {
    avatar_url: String,
}

impl From<SearchItem> for ListEntry {
    fn from(item: SearchItem) -> Self {
        ListEntry::new(
            item.name,
            item.description.unwrap_or_default(),
            item.owner.avatar_url,
        )
    }
}

/// Decodes a response body into entries, keeping the server's order
///
/// Fails with FetchError::Decode when `items` is missing or a field has the
/// wrong type. GitHub's error bodies (rate limit, validation failed) land here.
pub fn decode_page(body: &[u8]) -> Result<Vec<ListEntry>, FetchError> {
    let response: SearchResponse = serde_json::from_slice(body)?;
    Ok(response.items.into_iter().map(ListEntry::from).collect())
}
