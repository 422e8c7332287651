// src/github/fetch.rs
// =============================================================================
// This module fetches one page of repository search results from GitHub.
//
// Strategy:
// - Build the page URL from the fixed SearchQuery plus the page number
// - Send exactly one GET request (no retry, no cancellation)
// - Decode the body into ListEntry values, whatever the HTTP status was
//
// Why decode non-2xx bodies at all?
// - GitHub answers rate limits and "only the first 1000 results" with a JSON
//   error object. It has no `items`, so it fails as a decode error, which is
//   exactly how the list treats any other unusable page.
//
// Rust concepts:
// - Traits: PageFetcher is the seam the list controller depends on
// - BoxFuture: Lets a trait method return an async result
// - Arc: The reqwest client is shared, cloning it is cheap
// =============================================================================

use futures::future::BoxFuture;
use log::{debug, warn};
use reqwest::Client;

use super::error::FetchError;
use super::search::{decode_page, SearchQuery};
use crate::list::ListEntry;

/// Something that can produce one page of entries.
///
/// The returned future resolves exactly once, with either the entries or an
/// error. The controller only ever talks to this trait, so tests can hand it a
/// scripted fake.
pub trait PageFetcher: Send + Sync {
    fn fetch_page(&self, page: u32) -> BoxFuture<'_, Result<Vec<ListEntry>, FetchError>>;
}

/// `reqwest`-backed implementation of [`PageFetcher`].
#[derive(Debug, Clone)]
pub struct SearchClient {
    query: SearchQuery,
    http: Client,
}

impl SearchClient {
    /// Creates a client for the given query
    ///
    /// GitHub refuses API requests without a User-Agent, so we send the
    /// crate name and version. No other headers are added.
    pub fn new(query: SearchQuery) -> anyhow::Result<Self> {
        let http = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { query, http })
    }

    pub fn query(&self) -> &SearchQuery {
        &self.query
    }

    /// The underlying HTTP client, for sharing its connection pool
    pub fn http(&self) -> &Client {
        &self.http
    }

    async fn fetch(&self, page: u32) -> Result<Vec<ListEntry>, FetchError> {
        let url = self.query.page_url(page)?;
        debug!("fetching page {} from {}", page, url);

        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!("search page {} answered with HTTP {}", page, status);
        }

        let body = response.bytes().await?;
        let entries = decode_page(&body)?;
        debug!("page {} decoded into {} entries", page, entries.len());
        Ok(entries)
    }
}

impl PageFetcher for SearchClient {
    fn fetch_page(&self, page: u32) -> BoxFuture<'_, Result<Vec<ListEntry>, FetchError>> {
        Box::pin(self.fetch(page))
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why a trait instead of calling SearchClient directly?
//    - The controller only needs "give me page N"
//    - In tests we swap in a fake that returns canned pages instantly
//    - No network, no flaky tests
//
// 2. What is BoxFuture?
//    - Pin<Box<dyn Future<Output = T> + Send + 'a>>
//    - Traits can't easily return `impl Future`, so we box it
//    - The 'a lifetime ties the future to &self
//
// 3. Why does the ? operator work with three different error types?
//    - FetchError has #[from] conversions for url, reqwest and serde_json errors
//    - ? calls From::from for us, picking the right variant
//
// 4. What is concat!/env!?
//    - Compile-time macros: the User-Agent string is baked into the binary
//    - CARGO_PKG_NAME and CARGO_PKG_VERSION come from Cargo.toml
// -----------------------------------------------------------------------------
