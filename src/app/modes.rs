//! View and input focus state types.
//!
//! [`ViewMode`] is the controller's mode variable. Data that only makes sense
//! in one view lives inside that view's variant: the search query exists only
//! in [`ViewMode::Search`], the current label only in [`ViewMode::Labels`] and
//! the draft only in [`ViewMode::NewNote`]. Switching views through the menu
//! always starts the new variant empty.
//!
//! # Example
//!
//! ```rust
//! use notepane::app::modes::ViewMode;
//! use notepane::app::menu::ViewSelection;
//! use notepane::domain::Collection;
//!
//! let view = ViewMode::from_selection(ViewSelection::Archived);
//! assert_eq!(view.collection(), Collection::Archived);
//! ```

use super::menu::ViewSelection;
use crate::domain::{Collection, NoteDraft};

/// Fields of the new-note form, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DraftField {
    #[default]
    Title,
    Content,
    Tags,
    Color,
}

impl DraftField {
    pub const ALL: [Self; 4] = [Self::Title, Self::Content, Self::Tags, Self::Color];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Title => "Title",
            Self::Content => "Content",
            Self::Tags => "Tags",
            Self::Color => "Color",
        }
    }

    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Title => Self::Content,
            Self::Content => Self::Tags,
            Self::Tags => Self::Color,
            Self::Color => Self::Title,
        }
    }

    /// Mutable access to the draft text backing this field.
    pub fn text_mut(self, draft: &mut NoteDraft) -> &mut String {
        match self {
            Self::Title => &mut draft.title,
            Self::Content => &mut draft.content,
            Self::Tags => &mut draft.tags,
            Self::Color => &mut draft.color,
        }
    }

    #[must_use]
    pub fn text(self, draft: &NoteDraft) -> &str {
        match self {
            Self::Title => &draft.title,
            Self::Content => &draft.content,
            Self::Tags => &draft.tags,
            Self::Color => &draft.color,
        }
    }
}

/// Where keystrokes go.
///
/// `Field` edits the current view's input (search query, label or draft
/// field); `List` navigates and acts on the selected note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputFocus {
    #[default]
    List,
    Field,
}

/// Current UI section.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ViewMode {
    /// Every active note. Header displays "Your Notes".
    #[default]
    AllNotes,

    /// Composing a note; the list below shows active notes.
    NewNote(NoteDraft),

    /// Active notes filtered by a case-insensitive substring of title or content.
    Search { query: String },

    /// Active notes carrying exactly `label`.
    Labels { label: String },

    /// Archived notes. Only unarchive is offered.
    Archived,

    /// Trashed notes. No actions are offered.
    Trash,
}

impl ViewMode {
    /// Fresh view for a menu choice, with empty query, label or draft.
    #[must_use]
    pub fn from_selection(selection: ViewSelection) -> Self {
        match selection {
            ViewSelection::New => Self::NewNote(NoteDraft::default()),
            ViewSelection::Search => Self::Search {
                query: String::new(),
            },
            ViewSelection::Labels => Self::Labels {
                label: String::new(),
            },
            ViewSelection::Archived => Self::Archived,
            ViewSelection::Trash => Self::Trash,
        }
    }

    /// Remote collection whose snapshot this view displays.
    #[must_use]
    pub const fn collection(&self) -> Collection {
        match self {
            Self::Archived => Collection::Archived,
            Self::Trash => Collection::Trashed,
            Self::AllNotes | Self::NewNote(_) | Self::Search { .. } | Self::Labels { .. } => {
                Collection::Active
            }
        }
    }

    /// Whether entering this view always discards the snapshot and refetches.
    ///
    /// Search, labels and new re-filter a cached active snapshot instead.
    #[must_use]
    pub const fn always_refetches(&self) -> bool {
        matches!(self, Self::AllNotes | Self::Archived | Self::Trash)
    }

    /// Whether the view has a text input that takes focus on entry.
    #[must_use]
    pub const fn has_field(&self) -> bool {
        matches!(
            self,
            Self::NewNote(_) | Self::Search { .. } | Self::Labels { .. }
        )
    }

    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self {
            Self::Archived => "Archived Notes",
            Self::Trash => "Trashed Notes",
            _ => "Your Notes",
        }
    }

    /// Short lowercase name used in logs and the menu bar.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::AllNotes => "all",
            Self::NewNote(_) => "new",
            Self::Search { .. } => "search",
            Self::Labels { .. } => "labels",
            Self::Archived => "archived",
            Self::Trash => "trash",
        }
    }

    #[must_use]
    pub const fn allows_archive_and_delete(&self) -> bool {
        !matches!(self, Self::Archived | Self::Trash)
    }

    #[must_use]
    pub const fn allows_unarchive(&self) -> bool {
        matches!(self, Self::Archived)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn views_map_to_collections() {
        assert_eq!(ViewMode::AllNotes.collection(), Collection::Active);
        assert_eq!(ViewMode::Trash.collection(), Collection::Trashed);
        assert_eq!(
            ViewMode::Labels { label: "work".into() }.collection(),
            Collection::Active
        );
    }

    #[test]
    fn selection_starts_with_empty_inputs() {
        assert_eq!(
            ViewMode::from_selection(ViewSelection::Search),
            ViewMode::Search { query: String::new() }
        );
        assert_eq!(
            ViewMode::from_selection(ViewSelection::New),
            ViewMode::NewNote(NoteDraft::default())
        );
    }

    #[test]
    fn per_view_actions() {
        assert!(ViewMode::AllNotes.allows_archive_and_delete());
        assert!(!ViewMode::AllNotes.allows_unarchive());
        assert!(ViewMode::Archived.allows_unarchive());
        assert!(!ViewMode::Archived.allows_archive_and_delete());
        assert!(!ViewMode::Trash.allows_unarchive());
        assert!(!ViewMode::Trash.allows_archive_and_delete());
    }

    #[test]
    fn draft_fields_cycle() {
        let mut field = DraftField::Title;
        for _ in 0..DraftField::ALL.len() {
            field = field.next();
        }
        assert_eq!(field, DraftField::Title);
    }
}
