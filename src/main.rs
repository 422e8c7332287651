// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Wire the fetch client, the list controller and the terminal view together
// 3. Run the event loop: user input in, fetched pages in, rows out
// 4. Exit with proper code (0 = success, 1 = a fetch failed, 2 = error)
//
// The event loop is the single owner of the list. Fetches run on their own
// tokio tasks and send their results back here, so the list is only ever
// changed from this one place.
//
// Rust concepts used:
// - async/await: Network requests don't block reading the keyboard
// - tokio::select!: Wait on whichever happens first, input or a finished page
// - Rc/Weak: The view is owned here, the controller only borrows it weakly
// =============================================================================

// Module declarations - tells Rust about our other source files
mod cli;      // src/cli.rs - command-line parsing
mod github;   // src/github/ - search URL, decoding, HTTP fetch
mod list;     // src/list/ - entries and the paging controller
mod ui;       // src/ui/ - progress indicator, avatar cache, terminal view

use std::rc::{Rc, Weak};
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use log::{debug, info, warn};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc::UnboundedReceiver;

use cli::Cli;
use github::SearchClient;
use list::{ListController, ListView, ListViewModel, LoadOutcome, LoadState, PageLoaded};
use ui::{ImageCache, MemoryImageCache, TerminalProgress, TerminalView};

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

async fn run() -> Result<i32> {
    // Parse command-line arguments into our Cli struct
    let cli = Cli::parse();

    // The fetch client owns the fixed search query; only the page number changes
    let client = SearchClient::new(cli.search_query())?;
    info!("searching {:?}", client.query());

    // The avatar cache reuses the search client's connection pool
    let images: Arc<dyn ImageCache> = Arc::new(MemoryImageCache::new(client.http().clone()));
    let avatars = (!cli.no_avatars).then(|| Arc::clone(&images));

    // The view lives here; the controller only gets a Weak handle to it
    let view = Rc::new(TerminalView::new(cli.json, avatars));

    // `completions` receives one PageLoaded per fetch the controller starts
    let (mut controller, mut completions) =
        ListController::new(Arc::new(client), Box::new(TerminalProgress::new()));
    let weak_view: Weak<dyn ListView> = Rc::downgrade(&view) as Weak<dyn ListView>;
    controller.attach_view(weak_view);

    // Kick off page 1 right away, like a screen loading its first data
    controller.start();

    // --pages means batch mode, otherwise we wait for the user
    let code = match cli.pages {
        Some(pages) => run_batch(&mut controller, &mut completions, pages).await,
        None => run_interactive(&mut controller, &mut completions, images.as_ref(), cli.json).await?,
    };

    debug!("shutting down with {} rows loaded", controller.entries().len());
    Ok(code)
}

// Loads up to `pages` pages back to back, the way a user holding the scroll
// would. Stops on an empty page (end of results) or the first failure.
async fn run_batch(
    controller: &mut ListController,
    completions: &mut UnboundedReceiver<PageLoaded>,
    pages: u32,
) -> i32 {
    let mut loaded = 0;

    while let Some(page) = completions.recv().await {
        match controller.apply(page) {
            LoadOutcome::Appended(0) => {
                info!("empty page, no more results");
                return 0;
            }
            LoadOutcome::Appended(_) => {
                loaded += 1;
                if loaded >= pages {
                    return 0;
                }
                let last = controller.row_count().saturating_sub(1);
                controller.row_will_display(last);
            }
            LoadOutcome::Failed => return 1,
            LoadOutcome::Ignored => {}
        }
    }

    0
}

// What a line typed at the prompt means
#[derive(Debug, PartialEq, Eq)]
enum Command {
    Scroll,
    ClearCache,
    Quit,
    Unknown(String),
}

impl Command {
    fn parse(line: &str) -> Self {
        match line.trim().to_ascii_lowercase().as_str() {
            "" | "n" | "next" => Command::Scroll,
            "c" | "clear" => Command::ClearCache,
            "q" | "quit" | "exit" => Command::Quit,
            other => Command::Unknown(other.to_string()),
        }
    }
}

async fn run_interactive(
    controller: &mut ListController,
    completions: &mut UnboundedReceiver<PageLoaded>,
    images: &dyn ImageCache,
    json: bool,
) -> Result<i32> {
    // Read stdin line by line without blocking the runtime
    let mut input = BufReader::new(tokio::io::stdin()).lines();

    loop {
        // Whichever comes first: a finished page or a line of input
        tokio::select! {
            Some(page) = completions.recv() => {
                // The only place the list changes; apply() re-renders the view
                controller.apply(page);
            }
            line = input.next_line() => {
                // None means stdin was closed (Ctrl-D or end of a pipe)
                let Some(line) = line? else {
                    debug!("stdin closed");
                    break;
                };
                match Command::parse(&line) {
                    Command::Scroll => {
                        scroll_to_bottom(controller, json);
                    }
                    Command::ClearCache => images.clear(),
                    Command::Quit => break,
                    Command::Unknown(other) => {
                        if !json {
                            println!("❓ Unknown command '{}' (Enter = more, c = clear cache, q = quit)", other);
                        }
                    }
                }
            }
        }
    }

    Ok(0)
}

// Scrolling to the bottom of a terminal list means the last row is about to
// be displayed. Returns whether a fetch was started.
fn scroll_to_bottom(controller: &mut ListController, json: bool) -> bool {
    match controller.row_count().checked_sub(1) {
        Some(last) => {
            let started = controller.row_will_display(last);
            if !started && controller.state() == LoadState::Loading {
                debug!("still loading page {}", controller.page_cursor());
            }
            started
        }
        None => {
            warn!("nothing loaded yet, nothing to scroll");
            // An empty idle list means page 1 failed, and nothing retries it
            if !json && controller.state() == LoadState::Idle {
                println!("⚠️  The first page could not be loaded. Quit with 'q' and run again.");
            }
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::future::BoxFuture;
    use crate::github::{FetchError, PageFetcher};
    use crate::list::ListEntry;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    // Replays canned pages in order; anything past the script is an empty page
    #[derive(Default)]
    struct CannedPages {
        pages: Mutex<VecDeque<Result<Vec<ListEntry>, FetchError>>>,
        requested: Mutex<Vec<u32>>,
    }

    impl CannedPages {
        fn with(pages: Vec<Result<Vec<ListEntry>, FetchError>>) -> Arc<Self> {
            Arc::new(Self {
                pages: Mutex::new(pages.into()),
                requested: Mutex::new(Vec::new()),
            })
        }

        fn requested(&self) -> Vec<u32> {
            self.requested.lock().unwrap().clone()
        }
    }

    impl PageFetcher for CannedPages {
        fn fetch_page(&self, page: u32) -> BoxFuture<'_, Result<Vec<ListEntry>, FetchError>> {
            self.requested.lock().unwrap().push(page);
            let next = self.pages.lock().unwrap().pop_front().unwrap_or(Ok(Vec::new()));
            Box::pin(async move { next })
        }
    }

    fn page(names: &[&str]) -> Result<Vec<ListEntry>, FetchError> {
        Ok(names
            .iter()
            .map(|n| ListEntry::new(*n, "", format!("http://x/{}.png", n)))
            .collect())
    }

    fn decode_failure() -> Result<Vec<ListEntry>, FetchError> {
        Err(serde_json::from_str::<serde_json::Value>("{").unwrap_err().into())
    }

    fn controller_for(
        fetcher: Arc<CannedPages>,
    ) -> (ListController, UnboundedReceiver<PageLoaded>) {
        ListController::new(fetcher, Box::new(TerminalProgress::new()))
    }

    #[tokio::test]
    async fn test_batch_stops_after_requested_pages() {
        let fetcher = CannedPages::with(vec![page(&["a"]), page(&["b"]), page(&["c"])]);
        let (mut controller, mut completions) = controller_for(fetcher.clone());
        controller.start();

        let code = run_batch(&mut controller, &mut completions, 2).await;

        assert_eq!(code, 0);
        assert_eq!(controller.row_count(), 2);
        assert_eq!(controller.page_cursor(), 3);
        assert_eq!(fetcher.requested(), vec![1, 2]);
    }

    #[tokio::test]
    async fn test_batch_failure_exits_with_one() {
        let fetcher = CannedPages::with(vec![page(&["a"]), decode_failure(), page(&["c"])]);
        let (mut controller, mut completions) = controller_for(fetcher.clone());
        controller.start();

        let code = run_batch(&mut controller, &mut completions, 3).await;

        assert_eq!(code, 1);
        assert_eq!(controller.row_count(), 1);
        assert_eq!(controller.page_cursor(), 2);
        assert_eq!(fetcher.requested(), vec![1, 2]);
    }

    #[tokio::test]
    async fn test_batch_empty_page_ends_results() {
        let fetcher = CannedPages::with(vec![page(&["a", "b"]), page(&[])]);
        let (mut controller, mut completions) = controller_for(fetcher.clone());
        controller.start();

        let code = run_batch(&mut controller, &mut completions, 5).await;

        assert_eq!(code, 0);
        assert_eq!(controller.row_count(), 2);
        assert_eq!(fetcher.requested(), vec![1, 2]);
    }

    #[tokio::test]
    async fn test_scroll_on_empty_list_does_not_fetch() {
        let fetcher = CannedPages::with(vec![decode_failure()]);
        let (mut controller, mut completions) = controller_for(fetcher.clone());
        controller.start();
        let loaded = completions.recv().await.unwrap();
        assert_eq!(controller.apply(loaded), LoadOutcome::Failed);

        assert!(!scroll_to_bottom(&mut controller, true));
        assert!(!scroll_to_bottom(&mut controller, false));
        assert_eq!(controller.state(), LoadState::Idle);
        assert_eq!(fetcher.requested(), vec![1]);
    }

    #[tokio::test]
    async fn test_scroll_on_last_row_fetches_next_page() {
        let fetcher = CannedPages::with(vec![page(&["a"]), page(&["b"])]);
        let (mut controller, mut completions) = controller_for(fetcher.clone());
        controller.start();
        let loaded = completions.recv().await.unwrap();
        controller.apply(loaded);

        assert!(scroll_to_bottom(&mut controller, true));
        // A second scroll while page 2 is in flight is coalesced
        assert!(!scroll_to_bottom(&mut controller, true));
        let loaded = completions.recv().await.unwrap();
        assert_eq!(controller.apply(loaded), LoadOutcome::Appended(1));
        assert_eq!(fetcher.requested(), vec![1, 2]);
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse(""), Command::Scroll);
        assert_eq!(Command::parse("  N \n"), Command::Scroll);
        assert_eq!(Command::parse("c"), Command::ClearCache);
        assert_eq!(Command::parse("Quit"), Command::Quit);
        assert_eq!(Command::parse("xyz"), Command::Unknown("xyz".to_string()));
    }
}
