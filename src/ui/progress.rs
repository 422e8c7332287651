// src/ui/progress.rs
// =============================================================================
// A "please wait" indicator shown while a page is loading.
//
// The controller calls show() right before a fetch starts and dismiss() once
// its result has been applied, so every show is followed by exactly one
// dismiss.
// =============================================================================

use log::debug;

/// Shown for the duration of one page load.
pub trait ProgressIndicator {
    fn show(&mut self, page: u32);
    fn dismiss(&mut self);
}

/// Prints a loading line to stderr so it never mixes with --json output.
#[derive(Debug, Default)]
pub struct TerminalProgress {
    loading: Option<u32>,
}

impl TerminalProgress {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_visible(&self) -> bool {
        self.loading.is_some()
    }
}

impl ProgressIndicator for TerminalProgress {
    fn show(&mut self, page: u32) {
        if let Some(previous) = self.loading {
            debug!("page {} still marked as loading", previous);
        }
        eprintln!("⏳ Loading page {}...", page);
        self.loading = Some(page);
    }

    fn dismiss(&mut self) {
        match self.loading.take() {
            Some(page) => debug!("page {} finished loading", page),
            None => debug!("dismiss called with no load in progress"),
        }
    }
}
