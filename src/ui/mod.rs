// src/ui/mod.rs
// =============================================================================
// The collaborators around the list controller.
//
// Submodules:
// - progress: the loading indicator shown while a page is in flight
// - images: the avatar cache
// - terminal: the ListView that prints rows to stdout
//
// Each one sits behind a trait, so the controller never depends on the
// terminal directly.
// =============================================================================

mod images;
mod progress;
mod terminal;

pub use images::{ImageCache, MemoryImageCache};
pub use progress::{ProgressIndicator, TerminalProgress};
pub use terminal::TerminalView;
