// src/ui/terminal.rs
// =============================================================================
// Draws the list in the terminal.
//
// The terminal can't redraw rows that already scrolled past, so a reload only
// prints the rows that are new since the last one. The list is append-only, so
// that is always a suffix.
//
// Two output styles:
// - table (default): one padded line per repository plus a running total
// - --json: one JSON object per line, nothing else on stdout
//
// Every new row also asks the image cache for its avatar, unless avatars were
// turned off. Avatar failures are logged and never reach the list.
//
// Rust concepts:
// - Cell: Interior mutability for a counter behind &self
// - tokio::spawn: Fire-and-forget avatar downloads
// =============================================================================

use std::cell::Cell;
use std::sync::Arc;

use log::{debug, error, warn};

use super::images::ImageCache;
use crate::list::{ListView, ListViewModel, RowDisplay};

const NAME_WIDTH: usize = 30;
const DESCRIPTION_WIDTH: usize = 70;

pub struct TerminalView {
    json: bool,
    images: Option<Arc<dyn ImageCache>>,
    printed: Cell<usize>,
}

impl TerminalView {
    pub fn new(json: bool, images: Option<Arc<dyn ImageCache>>) -> Self {
        Self {
            json,
            images,
            printed: Cell::new(0),
        }
    }

    /// Number of rows already written to the terminal
    pub fn printed(&self) -> usize {
        self.printed.get()
    }

    /// Builds the output lines for every row not printed yet
    fn render_new_rows(&self, model: &dyn ListViewModel) -> Vec<String> {
        let start = self.printed.get();
        let count = model.row_count();
        let mut lines = Vec::new();

        if !self.json && start == 0 && count > 0 {
            lines.push(format!(
                "{:>5}  {:<width$} {}",
                "#",
                "NAME",
                "DESCRIPTION",
                width = NAME_WIDTH
            ));
            lines.push("=".repeat(5 + 2 + NAME_WIDTH + 1 + DESCRIPTION_WIDTH));
        }

        for index in start..count {
            let Some(row) = model.row_at(index) else {
                warn!("row {} vanished while rendering", index);
                break;
            };
            match self.format_row(index, &row) {
                Some(line) => lines.push(line),
                None => continue,
            }
            self.request_avatar(row.avatar_url);
        }

        if !self.json && count > start {
            lines.push(format!("📊 {} repositories loaded (press Enter for more)", count));
        }

        self.printed.set(count);
        lines
    }

    fn format_row(&self, index: usize, row: &RowDisplay<'_>) -> Option<String> {
        if self.json {
            match serde_json::to_string(row) {
                Ok(line) => Some(line),
                Err(e) => {
                    error!("could not serialize row {}: {}", index, e);
                    None
                }
            }
        } else {
            Some(format!(
                "{:>5}  {:<width$} {}",
                index + 1,
                truncate(row.name, NAME_WIDTH),
                truncate(row.description, DESCRIPTION_WIDTH),
                width = NAME_WIDTH
            ))
        }
    }

    fn request_avatar(&self, url: &str) {
        let Some(images) = &self.images else {
            return;
        };
        let images = Arc::clone(images);
        let url = url.to_string();
        tokio::spawn(async move {
            match images.load(&url).await {
                Ok(image) => debug!("avatar ready for {} ({} bytes)", url, image.len()),
                Err(e) => warn!("error loading avatar {}: {}", url, e),
            }
        });
    }
}

impl ListView for TerminalView {
    fn reload(&self, model: &dyn ListViewModel) {
        for line in self.render_new_rows(model) {
            println!("{}", line);
        }
        debug!("{} rows on screen", self.printed());
    }
}

// Shortens text to `width` characters, marking the cut with "..."
//
// Counts chars, not bytes, so multi-byte descriptions never get split
// in the middle of a character.
fn truncate(text: &str, width: usize) -> String {
    let text = text.trim();
    if text.chars().count() <= width {
        return text.to_string();
    }
    let kept: String = text.chars().take(width.saturating_sub(3)).collect();
    format!("{}...", kept)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::list::ListEntry;

    struct FixedRows(Vec<ListEntry>);

    impl ListViewModel for FixedRows {
        fn row_count(&self) -> usize {
            self.0.len()
        }

        fn row_at(&self, index: usize) -> Option<RowDisplay<'_>> {
            self.0.get(index).map(ListEntry::display)
        }
    }

    fn rows(names: &[&str]) -> FixedRows {
        FixedRows(
            names
                .iter()
                .map(|n| ListEntry::new(*n, format!("about {}", n), "http://x/a.png"))
                .collect(),
        )
    }

    #[test]
    fn test_truncate_short_text() {
        assert_eq!(truncate("short", 10), "short");
    }

    #[test]
    fn test_truncate_long_text() {
        assert_eq!(truncate("abcdefghijkl", 8), "abcde...");
    }

    #[test]
    fn test_truncate_multibyte() {
        let cut = truncate("ääääääääää", 6);
        assert_eq!(cut, "äää...");
    }

    #[test]
    fn test_table_prints_header_once_and_only_new_rows() {
        let view = TerminalView::new(false, None);

        let first = view.render_new_rows(&rows(&["a", "b"]));
        assert!(first[0].contains("NAME"));
        assert!(first[2].contains("a"));
        assert!(first[3].contains("b"));
        assert!(first.last().unwrap().contains("2 repositories"));
        assert_eq!(view.printed(), 2);

        let second = view.render_new_rows(&rows(&["a", "b", "c"]));
        assert_eq!(second.len(), 2);
        assert!(second[0].contains("about c"));
        assert!(second[0].trim_start().starts_with('3'));
        assert_eq!(view.printed(), 3);
    }

    #[test]
    fn test_header_and_rows_share_column_widths() {
        let view = TerminalView::new(false, None);
        let lines = view.render_new_rows(&rows(&["a"]));
        let rule_width = lines[1].chars().count();
        assert_eq!(rule_width, 5 + 2 + NAME_WIDTH + 1 + DESCRIPTION_WIDTH);
        // DESCRIPTION and the row's description start in the same column
        let header_col = lines[0].find("DESCRIPTION").unwrap();
        let row_col = lines[2].find("about a").unwrap();
        assert_eq!(header_col, 5 + 2 + NAME_WIDTH + 1);
        assert_eq!(row_col, header_col);
    }

    #[test]
    fn test_reload_without_new_rows_prints_nothing() {
        let view = TerminalView::new(false, None);
        view.render_new_rows(&rows(&["a"]));
        assert!(view.render_new_rows(&rows(&["a"])).is_empty());
    }

    #[test]
    fn test_json_lines() {
        let view = TerminalView::new(true, None);
        let lines = view.render_new_rows(&rows(&["repo-a"]));
        assert_eq!(lines.len(), 1);
        let value: serde_json::Value = serde_json::from_str(&lines[0]).unwrap();
        assert_eq!(value["name"], "repo-a");
        assert_eq!(value["description"], "about repo-a");
        assert_eq!(value["avatar_url"], "http://x/a.png");
    }
}
