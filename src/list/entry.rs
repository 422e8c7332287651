// src/list/entry.rs
// =============================================================================
// The domain model for one row of the list.
//
// A ListEntry is what the fetch client hands to the controller after decoding
// a search result. It is created once and never changed afterwards.
//
// Rust concepts:
// - Structs: Plain data with named fields
// - Derive macros: Debug, Clone, PartialEq, Serialize come for free
// =============================================================================

use serde::Serialize;

/// One repository, ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListEntry {
    pub name: String,
    /// Never optional: a missing description is stored as an empty string
    pub description: String,
    pub avatar_url: String,
}

/// What a view needs to draw one row.
///
/// Borrowed from the controller's entry list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RowDisplay<'a> {
    pub avatar_url: &'a str,
    pub name: &'a str,
    pub description: &'a str,
}

impl ListEntry {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        avatar_url: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            avatar_url: avatar_url.into(),
        }
    }

    pub fn display(&self) -> RowDisplay<'_> {
        RowDisplay {
            avatar_url: &self.avatar_url,
            name: &self.name,
            description: &self.description,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_borrows_fields() {
        let entry = ListEntry::new("repo-a", "", "http://x/a.png");
        let row = entry.display();
        assert_eq!(row.name, "repo-a");
        assert_eq!(row.description, "");
        assert_eq!(row.avatar_url, "http://x/a.png");
    }

    #[test]
    fn test_entry_serializes_to_json() {
        let entry = ListEntry::new("repo-a", "desc", "http://x/a.png");
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["name"], "repo-a");
        assert_eq!(json["description"], "desc");
        assert_eq!(json["avatar_url"], "http://x/a.png");
    }
}
