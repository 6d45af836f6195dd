//! View selector.
//!
//! A stateless menu that maps a user choice to one of five named views and
//! hands the choice to a caller-supplied callback. It performs no validation
//! and cannot fail; the controller decides what a selection means.

use crate::domain::error::{NotepaneError, Result};
use std::fmt;
use std::str::FromStr;

/// Named views offered by the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewSelection {
    New,
    Search,
    Labels,
    Archived,
    Trash,
}

impl ViewSelection {
    /// Wire name of the selection (`new`, `search`, `labels`, `archived`, `trash`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Search => "search",
            Self::Labels => "labels",
            Self::Archived => "archived",
            Self::Trash => "trash",
        }
    }
}

impl fmt::Display for ViewSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViewSelection {
    type Err = NotepaneError;

    fn from_str(s: &str) -> Result<Self> {
        Menu::items()
            .iter()
            .map(|item| item.selection)
            .find(|selection| selection.as_str() == s)
            .ok_or_else(|| NotepaneError::UnknownView(s.to_string()))
    }
}

/// One menu entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuItem {
    pub selection: ViewSelection,
    pub label: &'static str,
    pub key: char,
}

const ITEMS: [MenuItem; 5] = [
    MenuItem {
        selection: ViewSelection::New,
        label: "Create a New Note",
        key: 'n',
    },
    MenuItem {
        selection: ViewSelection::Search,
        label: "Search Notes",
        key: '/',
    },
    MenuItem {
        selection: ViewSelection::Labels,
        label: "Label View",
        key: 'L',
    },
    MenuItem {
        selection: ViewSelection::Archived,
        label: "Archived Notes",
        key: 'A',
    },
    MenuItem {
        selection: ViewSelection::Trash,
        label: "Trash Notes",
        key: 'T',
    },
];

/// The view selector.
pub struct Menu;

impl Menu {
    /// Entries in display order.
    #[must_use]
    pub const fn items() -> &'static [MenuItem] {
        &ITEMS
    }

    /// Reports `selection` to `on_select`.
    ///
    /// # Examples
    ///
    /// ```
    /// use notepane::app::menu::{Menu, ViewSelection};
    ///
    /// let mut chosen = Vec::new();
    /// Menu::select(ViewSelection::Trash, |s| chosen.push(s));
    /// assert_eq!(chosen, vec![ViewSelection::Trash]);
    /// ```
    pub fn select<F>(selection: ViewSelection, on_select: F)
    where
        F: FnOnce(ViewSelection),
    {
        tracing::debug!(view = %selection, "menu selection");
        on_select(selection);
    }

    /// Selection bound to `key`, if any.
    #[must_use]
    pub fn selection_for_key(key: char) -> Option<ViewSelection> {
        ITEMS
            .iter()
            .find(|item| item.key == key)
            .map(|item| item.selection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_parse_back() {
        for item in Menu::items() {
            let parsed: ViewSelection = item.selection.as_str().parse().unwrap();
            assert_eq!(parsed, item.selection);
        }

        let err = "all".parse::<ViewSelection>().unwrap_err();
        assert!(matches!(&err, NotepaneError::UnknownView(name) if name == "all"));
        assert_eq!(err.to_string(), "Unknown view: 'all'");
    }

    #[test]
    fn labels_match_menu_text() {
        let labels: Vec<&str> = Menu::items().iter().map(|i| i.label).collect();
        assert_eq!(
            labels,
            vec![
                "Create a New Note",
                "Search Notes",
                "Label View",
                "Archived Notes",
                "Trash Notes"
            ]
        );
    }

    #[test]
    fn keys_resolve_to_selections() {
        assert_eq!(Menu::selection_for_key('/'), Some(ViewSelection::Search));
        assert_eq!(Menu::selection_for_key('T'), Some(ViewSelection::Trash));
        assert_eq!(Menu::selection_for_key('x'), None);
    }
}
