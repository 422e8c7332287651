// src/list/mod.rs
// =============================================================================
// The list: its entries, the paging controller, and the interfaces a view
// uses to draw it.
//
// Submodules:
// - entry: ListEntry, the decoded repository record
// - controller: ListController, the Idle/Loading pagination state machine
// =============================================================================

mod controller;
mod entry;

pub use controller::{
    ListController, ListView, ListViewModel, LoadOutcome, LoadState, PageLoaded,
};
pub use entry::{ListEntry, RowDisplay};
