// src/list/controller.rs
// =============================================================================
// This module owns the growing list of repositories and decides when to load
// the next page.
//
// How it works:
// 1. start() loads page 1
// 2. Each fetch runs on its own tokio task and reports back through a channel
// 3. The event loop hands every report to apply(), which appends the entries,
//    re-renders the view and moves the page cursor forward
// 4. When the view is about to show the last row, row_will_display() loads
//    the next page
//
// State machine:
//   Idle --start()/row_will_display(last)--> Loading --apply()--> Idle
//
// Only one fetch is ever in flight. A trigger that arrives while Loading is
// ignored, so a fast scroll can't request the same page twice.
//
// All mutation happens in apply() and the trigger methods, which the event
// loop calls from one task. The spawned fetch tasks never touch the list.
//
// Rust concepts:
// - Rc/Weak: The view is owned elsewhere, we only keep a weak handle
// - mpsc channels: Carry fetch results back to the single owner of the state
// - Traits: ListView and ListViewModel replace the table delegate/data source
// =============================================================================

use std::rc::Weak;
use std::sync::Arc;

use log::{debug, error, info, warn};
use tokio::sync::mpsc;

use super::entry::{ListEntry, RowDisplay};
use crate::github::{FetchError, PageFetcher};
use crate::ui::ProgressIndicator;

/// Whether a fetch is currently in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Idle,
    Loading,
}

/// The result of one fetch, delivered back to the event loop.
#[derive(Debug)]
pub struct PageLoaded {
    pub page: u32,
    pub result: Result<Vec<ListEntry>, FetchError>,
}

/// What apply() did with a completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The page was appended; holds the number of new rows (may be 0)
    Appended(usize),
    /// The fetch failed; nothing changed except the state going back to Idle
    Failed,
    /// No fetch was in flight for this page, so the completion was dropped
    Ignored,
}

/// Read side of the list, as seen by a view.
pub trait ListViewModel {
    fn row_count(&self) -> usize;

    /// The display triple for a row, or None when out of range
    fn row_at(&self, index: usize) -> Option<RowDisplay<'_>>;
}

/// Something that draws the list.
///
/// reload() is a full re-render: the view pulls whatever rows it needs through
/// the model.
pub trait ListView {
    fn reload(&self, model: &dyn ListViewModel);
}

pub struct ListController {
    fetcher: Arc<dyn PageFetcher>,
    progress: Box<dyn ProgressIndicator>,
    view: Option<Weak<dyn ListView>>,
    completions: mpsc::UnboundedSender<PageLoaded>,
    entries: Vec<ListEntry>,
    page: u32,
    state: LoadState,
}

impl ListController {
    /// Creates an idle controller with an empty list and the cursor on page 1
    ///
    /// The returned receiver yields one PageLoaded per started fetch. Feed each
    /// one back into apply().
    pub fn new(
        fetcher: Arc<dyn PageFetcher>,
        progress: Box<dyn ProgressIndicator>,
    ) -> (Self, mpsc::UnboundedReceiver<PageLoaded>) {
        let (completions, receiver) = mpsc::unbounded_channel();
        let controller = Self {
            fetcher,
            progress,
            view: None,
            completions,
            entries: Vec::new(),
            page: 1,
            state: LoadState::Idle,
        };
        (controller, receiver)
    }

    pub fn attach_view(&mut self, view: Weak<dyn ListView>) {
        self.view = Some(view);
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    /// The next page that will be requested
    pub fn page_cursor(&self) -> u32 {
        self.page
    }

    pub fn entries(&self) -> &[ListEntry] {
        &self.entries
    }

    /// Loads the first page. Returns false if a load was already running.
    pub fn start(&mut self) -> bool {
        info!("starting list with page {}", self.page);
        self.begin_load()
    }

    /// Near-end-of-list trigger: the view is about to show `row`
    ///
    /// Loads the next page when `row` is the last loaded row. Returns whether
    /// a fetch was started.
    pub fn row_will_display(&mut self, row: usize) -> bool {
        let Some(last) = self.entries.len().checked_sub(1) else {
            debug!("row {} displayed on an empty list, not paging", row);
            return false;
        };
        if row != last {
            return false;
        }
        if self.state == LoadState::Loading {
            debug!("reached row {} while page {} is loading, ignoring", row, self.page);
            return false;
        }
        info!("reached the last row ({}), fetching page {}", row, self.page);
        self.begin_load()
    }

    fn begin_load(&mut self) -> bool {
        if self.state == LoadState::Loading {
            return false;
        }
        self.state = LoadState::Loading;
        self.progress.show(self.page);

        let page = self.page;
        let fetcher = Arc::clone(&self.fetcher);
        let completions = self.completions.clone();
        tokio::spawn(async move {
            let result = fetcher.fetch_page(page).await;
            if completions.send(PageLoaded { page, result }).is_err() {
                debug!("list was torn down before page {} arrived", page);
            }
        });
        true
    }

    /// Applies a finished fetch to the list
    pub fn apply(&mut self, loaded: PageLoaded) -> LoadOutcome {
        if self.state != LoadState::Loading || loaded.page != self.page {
            warn!(
                "dropping page {} (state {:?}, expected page {})",
                loaded.page, self.state, self.page
            );
            return LoadOutcome::Ignored;
        }

        self.state = LoadState::Idle;
        self.progress.dismiss();

        match loaded.result {
            Ok(entries) => {
                let added = entries.len();
                info!("received {} entries for page {}", added, loaded.page);
                self.entries.extend(entries);
                self.page += 1;
                self.render();
                LoadOutcome::Appended(added)
            }
            Err(e) => {
                error!("failed to fetch page {} ({}): {}", loaded.page, e.kind(), e);
                LoadOutcome::Failed
            }
        }
    }

    fn render(&self) {
        match self.view.as_ref().and_then(Weak::upgrade) {
            Some(view) => view.reload(self),
            None => debug!("no live view, skipping render of {} rows", self.entries.len()),
        }
    }
}

impl ListViewModel for ListController {
    fn row_count(&self) -> usize {
        self.entries.len()
    }

    fn row_at(&self, index: usize) -> Option<RowDisplay<'_>> {
        self.entries.get(index).map(ListEntry::display)
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why a channel instead of awaiting the fetch directly?
//    - The event loop must keep reading user input while a page loads
//    - The fetch runs on its own task and only sends its result back
//    - The controller is the only place that mutates the list
//
// 2. What is Weak?
//    - A non-owning pointer to data inside an Rc
//    - upgrade() returns None once every Rc is gone
//    - A late page can't draw into a view that no longer exists
//
// 3. What is let-else?
//    - let Some(x) = expr else { return ...; };
//    - Binds x or leaves the function early
//    - checked_sub(1) on an empty list gives None instead of underflowing
//
// 4. Why does the cursor only move on success?
//    - A failed page is simply requested again on the next scroll
// -----------------------------------------------------------------------------
