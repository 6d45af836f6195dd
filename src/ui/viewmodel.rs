//! View model types representing renderable UI state.
//!
//! View models are created via `AppState::compute_viewmodel()` and consumed by
//! the renderer. They carry display-ready data only: truncated text, resolved
//! action hints and highlight ranges.

/// Complete UI view model for one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UIViewModel {
    pub header: HeaderInfo,

    /// View selector entries, in display order.
    pub menu: Vec<MenuEntry>,

    /// Single-line input for the search and labels views.
    pub input_bar: Option<InputBarInfo>,

    /// New-note form, present only in the new view.
    pub form: Option<FormInfo>,

    /// Visible window of note rows.
    pub display_items: Vec<NoteRow>,

    /// Index of the selected row within `display_items`.
    pub selected_index: usize,

    pub footer: FooterInfo,

    /// Shown in place of the rows when there is nothing to list.
    pub empty_state: Option<EmptyState>,

    /// Last status message (mutation results, failures).
    pub status: Option<String>,
}

/// One row of the note list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteRow {
    pub title: String,

    /// First line of the content, truncated to the available width.
    pub excerpt: String,

    /// Tags joined as `#home #work`.
    pub tags: String,

    pub reminder: Option<String>,

    /// Note color used for the row swatch.
    pub color: Option<String>,

    /// Per-view action hint, e.g. `a: archive  d: delete`.
    pub action_hint: String,

    pub is_selected: bool,

    /// Character ranges of the title matching the search query.
    ///
    /// Each tuple is `(start, end)` in character indices, end exclusive.
    pub highlight_ranges: Vec<(usize, usize)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuEntry {
    pub key: char,
    pub label: String,
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    pub keybindings: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    pub message: String,
    pub subtitle: String,
}

/// Search or label input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputBarInfo {
    /// Prompt shown before the text (`Search` or `Label`).
    pub prompt: String,
    pub text: String,
    pub is_focused: bool,
}

/// New-note form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormInfo {
    pub fields: Vec<FormField>,
    pub is_focused: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    pub label: String,
    pub value: String,
    pub is_active: bool,
}
