// src/github/mod.rs
// =============================================================================
// This module talks to the GitHub repository search API.
//
// Currently implements:
// - Building the paginated search URL (search.rs)
// - Decoding the JSON envelope into list entries (search.rs)
// - The PageFetcher trait and its reqwest implementation (fetch.rs)
// - The three fetch error kinds (error.rs)
// =============================================================================

mod error;
mod fetch;
mod search;

pub use error::FetchError;
pub use fetch::{PageFetcher, SearchClient};
pub use search::{
    SearchQuery, DEFAULT_BASE_URL, DEFAULT_ORDER, DEFAULT_SORT, DEFAULT_TERM,
};
