// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// All configuration comes from flags. Every flag has a default, so running
// `repo-scroll` with no arguments pages through Swift repositories sorted by
// stars, ascending, exactly like the app it mirrors.
// =============================================================================

use clap::Parser;

use crate::github::SearchQuery;

#[derive(Parser, Debug)]
#[command(
    name = "repo-scroll",
    version = "0.1.0",
    about = "Scroll through GitHub repository search results in your terminal",
    long_about = "repo-scroll loads GitHub repository search results one page at a time. \
                  Press Enter to scroll to the bottom and load the next page, \
                  'c' to clear the avatar cache, 'q' to quit."
)]
pub struct Cli {
    /// Search term sent as the `q` parameter
    #[arg(long, default_value = crate::github::DEFAULT_TERM)]
    pub query: String,

    /// Sort key (stars, forks, help-wanted-issues, updated)
    #[arg(long, default_value = crate::github::DEFAULT_SORT)]
    pub sort: String,

    /// Sort order (asc or desc)
    #[arg(long, default_value = crate::github::DEFAULT_ORDER)]
    pub order: String,

    /// Search endpoint to query
    #[arg(long, default_value = crate::github::DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Load this many pages without prompting, then exit
    ///
    /// Stops early on an empty page or a failed fetch.
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub pages: Option<u32>,

    /// Print each repository as a JSON line instead of a table
    #[arg(long)]
    pub json: bool,

    /// Don't download owner avatars
    #[arg(long)]
    pub no_avatars: bool,
}

impl Cli {
    pub fn search_query(&self) -> SearchQuery {
        SearchQuery {
            base_url: self.base_url.clone(),
            term: self.query.clone(),
            sort: self.sort.clone(),
            order: self.order.clone(),
        }
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What does Option<u32> mean for a flag?
//    - The flag is optional: None when the user leaves it out
//    - value_parser!(u32).range(1..) rejects --pages 0 before we ever see it
//
// 2. Why is --no-avatars a bool?
//    - #[arg(long)] on a bool creates a switch: present = true
// -----------------------------------------------------------------------------
