//! Note list controller state and view model computation.
//!
//! [`AppState`] owns the cached note collection, the active view and the
//! injected [`Session`]. It is the single source of truth for transient UI
//! state; the event handler mutates it and the renderer reads view models
//! computed from it.
//!
//! # State Components
//!
//! - **Notes**: Most recent snapshot of one remote collection
//! - **Filtered Notes**: Subset after applying the view's label or text filter
//! - **Snapshot**: Which collection `notes` came from, if any
//! - **Fetch Generation**: Counter identifying the latest fetch
//! - **Session**: Token context with a single logout capability
//!
//! # Example
//!
//! ```rust
//! use notepane::app::AppState;
//! use notepane::domain::Session;
//! use notepane::ui::Theme;
//!
//! let state = AppState::new(Session::new(Some("token".into())), Theme::default());
//! let viewmodel = state.compute_viewmodel(24, 80);
//! assert_eq!(viewmodel.header.title, " Your Notes (0) ");
//! ```

use super::menu::Menu;
use super::modes::{DraftField, InputFocus, ViewMode};
use crate::api::ApiRequest;
use crate::domain::{Collection, Note, NoteId, Session};
use crate::ui::helpers::substring_ranges;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    EmptyState, FooterInfo, FormField, FormInfo, HeaderInfo, InputBarInfo, MenuEntry, NoteRow,
    UIViewModel,
};

/// Rows taken by header, menu, borders, status and footer.
const CHROME_ROWS: usize = 7;

/// Extra rows taken by the search/label input box.
const INPUT_BAR_ROWS: usize = 3;

const TITLE_WIDTH: usize = 28;

const TRASH_NOTICE: &str = "Will be deleted after 30 days";

/// Central controller state.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Notes from the most recent fetch, in service order.
    pub notes: Vec<Note>,

    /// Notes passing the current view's filter. Recomputed by `apply_filter()`.
    pub filtered_notes: Vec<Note>,

    pub view: ViewMode,

    pub focus: InputFocus,

    /// Active field of the new-note form.
    pub draft_field: DraftField,

    /// Zero-based index into `filtered_notes`, wrapping during navigation.
    pub selected_index: usize,

    /// Collection the cached `notes` were fetched from.
    pub snapshot: Option<Collection>,

    /// Generation of the latest issued fetch. Older results are discarded.
    pub fetch_generation: u64,

    pub session: Session,

    pub status: Option<String>,

    pub theme: Theme,
}

impl AppState {
    /// Creates the controller in the all-notes view with nothing cached.
    #[must_use]
    pub fn new(session: Session, theme: Theme) -> Self {
        Self {
            notes: Vec::new(),
            filtered_notes: Vec::new(),
            view: ViewMode::AllNotes,
            focus: InputFocus::List,
            draft_field: DraftField::Title,
            selected_index: 0,
            snapshot: None,
            fetch_generation: 0,
            session,
            status: None,
            theme,
        }
    }

    /// Switches to `view`, focusing its input field if it has one.
    pub fn set_view(&mut self, view: ViewMode) {
        tracing::debug!(from = self.view.name(), to = view.name(), "view changed");
        self.focus = if view.has_field() {
            InputFocus::Field
        } else {
            InputFocus::List
        };
        self.view = view;
        self.draft_field = DraftField::Title;
        self.selected_index = 0;
        self.apply_filter();
    }

    /// Whether the current view needs a fresh snapshot.
    #[must_use]
    pub fn needs_fetch(&self) -> bool {
        self.view.always_refetches() || self.snapshot != Some(self.view.collection())
    }

    /// Starts a fetch of the current view's collection.
    ///
    /// Returns `None` without touching the generation when the session has no
    /// token. A fetch of a different collection than the cached one discards
    /// the cached notes first.
    pub fn begin_fetch(&mut self) -> Option<ApiRequest> {
        if !self.session.is_active() {
            tracing::debug!("no active session, skipping fetch");
            return None;
        }

        let collection = self.view.collection();
        if self.snapshot != Some(collection) {
            self.notes.clear();
            self.snapshot = None;
            self.apply_filter();
        }

        self.fetch_generation += 1;
        tracing::debug!(
            ?collection,
            generation = self.fetch_generation,
            "fetching notes"
        );
        Some(ApiRequest::fetch_notes(collection, self.fetch_generation))
    }

    /// Installs a fetch result if it belongs to the latest fetch.
    ///
    /// Returns `false` and leaves state untouched for superseded generations.
    pub fn accept_fetch(&mut self, collection: Collection, generation: u64, notes: &[Note]) -> bool {
        if generation != self.fetch_generation {
            tracing::debug!(
                generation,
                latest = self.fetch_generation,
                "discarding stale fetch result"
            );
            return false;
        }

        self.notes = notes.to_vec();
        self.snapshot = Some(collection);
        self.apply_filter();
        true
    }

    /// Ends the session. Returns `true` only if it was active.
    ///
    /// Bumps the fetch generation so in-flight fetches cannot repopulate the list.
    pub fn end_session(&mut self) -> bool {
        if !self.session.end_session() {
            return false;
        }
        self.fetch_generation += 1;
        self.status = Some("Signed out".to_string());
        true
    }

    /// Removes the note with `id`. Returns whether anything was removed.
    pub fn remove_note(&mut self, id: &NoteId) -> bool {
        let before = self.notes.len();
        self.notes.retain(|note| &note.id != id);
        let removed = self.notes.len() != before;
        if removed {
            self.apply_filter();
        }
        removed
    }

    /// Replaces the note with `id` by `note`, keeping its position.
    pub fn replace_note(&mut self, id: &NoteId, note: &Note) -> bool {
        let Some(slot) = self.notes.iter_mut().find(|n| &n.id == id) else {
            return false;
        };
        *slot = note.clone();
        self.apply_filter();
        true
    }

    /// Replaces the note with the same id, or appends it.
    pub fn merge_note(&mut self, note: &Note) {
        if !self.replace_note(&note.id, note) {
            self.notes.push(note.clone());
            self.apply_filter();
        }
    }

    pub fn move_selection_down(&mut self) {
        if self.filtered_notes.is_empty() {
            return;
        }
        self.selected_index = (self.selected_index + 1) % self.filtered_notes.len();
    }

    pub fn move_selection_up(&mut self) {
        if self.filtered_notes.is_empty() {
            return;
        }
        if self.selected_index == 0 {
            self.selected_index = self.filtered_notes.len() - 1;
        } else {
            self.selected_index -= 1;
        }
    }

    #[must_use]
    pub fn selected_note(&self) -> Option<&Note> {
        self.filtered_notes.get(self.selected_index)
    }

    /// Recomputes `filtered_notes` and clamps the selection.
    pub fn apply_filter(&mut self) {
        let _span = tracing::debug_span!(
            "apply_filter",
            total_notes = self.notes.len(),
            view = self.view.name()
        )
        .entered();

        self.filtered_notes = filter_notes(&self.notes, &self.view);

        if self.filtered_notes.is_empty() {
            self.selected_index = 0;
        } else {
            self.selected_index = self.selected_index.min(self.filtered_notes.len() - 1);
        }

        tracing::trace!(filtered_count = self.filtered_notes.len(), "filter applied");
    }

    /// Computes a renderable view model for a pane of `rows` x `cols` cells.
    ///
    /// Rows are windowed around the selection so the selected note stays visible.
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        let input_bar = self.compute_input_bar();
        let form = self.compute_form();

        let mut chrome = CHROME_ROWS;
        if input_bar.is_some() {
            chrome += INPUT_BAR_ROWS;
        }
        if let Some(form) = &form {
            chrome += form.fields.len() + 1;
        }
        let available_rows = rows.saturating_sub(chrome).max(1);

        let mut visible_start = self.selected_index.saturating_sub(available_rows / 2);
        let visible_end = (visible_start + available_rows).min(self.filtered_notes.len());
        if visible_end - visible_start < available_rows && self.filtered_notes.len() >= available_rows {
            visible_start = visible_end.saturating_sub(available_rows);
        }

        let query = match &self.view {
            ViewMode::Search { query } if !query.is_empty() => Some(query.as_str()),
            _ => None,
        };

        let display_items = self.filtered_notes[visible_start..visible_end]
            .iter()
            .enumerate()
            .map(|(relative, note)| {
                self.compute_note_row(note, visible_start + relative, cols, query)
            })
            .collect();

        UIViewModel {
            header: HeaderInfo {
                title: format!(" {} ({}) ", self.view.title(), self.filtered_notes.len()),
            },
            menu: self.compute_menu(),
            input_bar,
            form,
            display_items,
            selected_index: self.selected_index.saturating_sub(visible_start),
            footer: self.compute_footer(),
            empty_state: self.compute_empty_state(),
            status: self.status.clone(),
        }
    }

    fn compute_note_row(
        &self,
        note: &Note,
        absolute_idx: usize,
        cols: usize,
        query: Option<&str>,
    ) -> NoteRow {
        let action_hint = match &self.view {
            ViewMode::Trash => TRASH_NOTICE.to_string(),
            ViewMode::Archived => "u: unarchive".to_string(),
            _ => "a: archive  d: delete".to_string(),
        };

        let title = truncate(&note.title, TITLE_WIDTH);
        let tags: String = note
            .tags
            .iter()
            .map(|tag| format!("#{tag}"))
            .collect::<Vec<_>>()
            .join(" ");

        let excerpt_width =
            cols.saturating_sub(TITLE_WIDTH + 4 + tags.chars().count() + action_hint.len());
        let first_line = note.content.lines().next().unwrap_or_default();

        NoteRow {
            highlight_ranges: query.map_or_else(Vec::new, |q| substring_ranges(&title, q)),
            title,
            excerpt: truncate(first_line, excerpt_width),
            tags,
            reminder: note.reminder_label(),
            color: note.color.clone(),
            action_hint,
            is_selected: absolute_idx == self.selected_index,
        }
    }

    fn compute_menu(&self) -> Vec<MenuEntry> {
        Menu::items()
            .iter()
            .map(|item| MenuEntry {
                key: item.key,
                label: item.label.to_string(),
                is_active: item.selection.as_str() == self.view.name(),
            })
            .collect()
    }

    fn compute_input_bar(&self) -> Option<InputBarInfo> {
        let (prompt, text) = match &self.view {
            ViewMode::Search { query } => ("Search", query),
            ViewMode::Labels { label } => ("Label", label),
            _ => return None,
        };
        Some(InputBarInfo {
            prompt: prompt.to_string(),
            text: text.clone(),
            is_focused: self.focus == InputFocus::Field,
        })
    }

    fn compute_form(&self) -> Option<FormInfo> {
        let ViewMode::NewNote(draft) = &self.view else {
            return None;
        };
        let is_focused = self.focus == InputFocus::Field;
        Some(FormInfo {
            fields: DraftField::ALL
                .iter()
                .map(|field| FormField {
                    label: field.label().to_string(),
                    value: field.text(draft).to_string(),
                    is_active: is_focused && *field == self.draft_field,
                })
                .collect(),
            is_focused,
        })
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = match (self.focus, &self.view) {
            (InputFocus::Field, ViewMode::NewNote(_)) => {
                "Tab: next field  Enter: save  Esc: list  Type to edit"
            }
            (InputFocus::Field, _) => "Tab/Esc: list  Type to filter",
            (InputFocus::List, ViewMode::Archived) => {
                "j/k: navigate  u: unarchive  r: refresh  h: home  O: logout  q: quit"
            }
            (InputFocus::List, ViewMode::Trash) => {
                "j/k: navigate  r: refresh  h: home  O: logout  q: quit"
            }
            (InputFocus::List, _) => {
                "j/k: navigate  a: archive  d: delete  l: label  r: refresh  h: home  O: logout  q: quit"
            }
        };
        FooterInfo {
            keybindings: keybindings.to_string(),
        }
    }

    fn compute_empty_state(&self) -> Option<EmptyState> {
        if !self.session.is_active() {
            return Some(EmptyState {
                message: "Signed out".to_string(),
                subtitle: "Set a token in the plugin configuration to load notes".to_string(),
            });
        }
        if !self.filtered_notes.is_empty() {
            return None;
        }
        let subtitle = if self.snapshot.is_none() {
            "Loading..."
        } else if self.notes.is_empty() {
            "Nothing in this collection yet"
        } else {
            "No notes match the current filter"
        };
        Some(EmptyState {
            message: "No notes".to_string(),
            subtitle: subtitle.to_string(),
        })
    }
}

/// Notes passing the filter of `view`.
///
/// Labels with a non-empty label keep notes tagged exactly with it; search
/// with a non-empty query keeps notes whose title or content contains it,
/// ignoring case. Every other view keeps all notes.
///
/// # Examples
///
/// ```
/// use notepane::app::{filter_notes, ViewMode};
/// use notepane::domain::Note;
///
/// let notes = vec![
///     Note::new("1", "Groceries", "milk eggs").with_tags(&["home"]),
///     Note::new("2", "Work plan", "Q3 review").with_tags(&["work"]),
/// ];
///
/// let found = filter_notes(&notes, &ViewMode::Search { query: "MILK".into() });
/// assert_eq!(found.len(), 1);
/// assert_eq!(found[0].title, "Groceries");
/// ```
#[must_use]
pub fn filter_notes(notes: &[Note], view: &ViewMode) -> Vec<Note> {
    match view {
        ViewMode::Labels { label } if !label.is_empty() => notes
            .iter()
            .filter(|note| note.has_tag(label))
            .cloned()
            .collect(),
        ViewMode::Search { query } if !query.is_empty() => {
            let needle = query.to_lowercase();
            notes
                .iter()
                .filter(|note| note.matches_text(&needle))
                .cloned()
                .collect()
        }
        _ => notes.to_vec(),
    }
}

/// Truncates to `max` characters, marking the cut with `...`.
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    if max <= 3 {
        return text.chars().take(max).collect();
    }
    let mut out: String = text.chars().take(max - 3).collect();
    out.push_str("...");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_notes() -> Vec<Note> {
        vec![
            Note::new("1", "Groceries", "milk eggs").with_tags(&["home"]),
            Note::new("2", "Work plan", "Q3 review").with_tags(&["work"]),
        ]
    }

    fn signed_in() -> AppState {
        AppState::new(Session::new(Some("tok".into())), Theme::default())
    }

    #[test]
    fn label_filter_is_exact_and_case_sensitive() {
        let notes = sample_notes();

        let work = filter_notes(&notes, &ViewMode::Labels { label: "work".into() });
        assert_eq!(work.len(), 1);
        assert_eq!(work[0].id.as_str(), "2");

        assert!(filter_notes(&notes, &ViewMode::Labels { label: "Work".into() }).is_empty());
        assert!(filter_notes(&notes, &ViewMode::Labels { label: "wor".into() }).is_empty());
    }

    #[test]
    fn empty_inputs_keep_everything() {
        let notes = sample_notes();
        assert_eq!(filter_notes(&notes, &ViewMode::Labels { label: String::new() }).len(), 2);
        assert_eq!(filter_notes(&notes, &ViewMode::Search { query: String::new() }).len(), 2);
        assert_eq!(filter_notes(&notes, &ViewMode::Archived).len(), 2);
    }

    #[test]
    fn filter_excludes_exactly_the_non_matching_notes() {
        let notes = sample_notes();
        for query in ["e", "plan", "Q3", "zzz"] {
            let view = ViewMode::Search { query: query.into() };
            let kept = filter_notes(&notes, &view);
            for note in &notes {
                assert_eq!(
                    kept.contains(note),
                    note.matches_text(&query.to_lowercase()),
                    "query {query}"
                );
            }
        }
    }

    #[test]
    fn fetch_requires_session() {
        let mut state = AppState::new(Session::default(), Theme::default());
        assert!(state.begin_fetch().is_none());
        assert_eq!(state.fetch_generation, 0);
    }

    #[test]
    fn stale_generation_is_discarded() {
        let mut state = signed_in();
        state.begin_fetch();
        state.begin_fetch();

        assert!(!state.accept_fetch(Collection::Active, 1, &sample_notes()));
        assert!(state.notes.is_empty());

        assert!(state.accept_fetch(Collection::Active, 2, &sample_notes()));
        assert_eq!(state.notes.len(), 2);
        assert_eq!(state.snapshot, Some(Collection::Active));
    }

    #[test]
    fn fetching_another_collection_drops_cached_notes() {
        let mut state = signed_in();
        state.begin_fetch();
        state.accept_fetch(Collection::Active, 1, &sample_notes());

        state.set_view(ViewMode::Trash);
        state.begin_fetch();

        assert!(state.notes.is_empty());
        assert_eq!(state.snapshot, None);
    }

    #[test]
    fn replace_keeps_position_and_length() {
        let mut state = signed_in();
        state.notes = sample_notes();
        let updated = Note::new("1", "Groceries", "milk eggs bread");

        assert!(state.replace_note(&NoteId::from("1"), &updated));
        assert_eq!(state.notes.len(), 2);
        assert_eq!(state.notes[0].content, "milk eggs bread");
        assert!(!state.replace_note(&NoteId::from("9"), &updated));
    }

    #[test]
    fn merge_appends_unknown_notes() {
        let mut state = signed_in();
        state.notes = sample_notes();
        state.merge_note(&Note::new("3", "Trip", ""));
        assert_eq!(state.notes.len(), 3);
    }

    #[test]
    fn selection_wraps() {
        let mut state = signed_in();
        state.notes = sample_notes();
        state.apply_filter();

        state.move_selection_up();
        assert_eq!(state.selected_index, 1);
        state.move_selection_down();
        assert_eq!(state.selected_index, 0);
    }

    #[test]
    fn viewmodel_shows_trash_notice_and_header() {
        let mut state = signed_in();
        state.view = ViewMode::Trash;
        state.notes = sample_notes();
        state.snapshot = Some(Collection::Trashed);
        state.apply_filter();

        let vm = state.compute_viewmodel(24, 120);

        assert_eq!(vm.header.title, " Trashed Notes (2) ");
        assert!(vm.display_items.iter().all(|row| row.action_hint == TRASH_NOTICE));
        assert!(vm.empty_state.is_none());
    }

    #[test]
    fn viewmodel_highlights_search_matches_in_titles() {
        let mut state = signed_in();
        state.notes = sample_notes();
        state.set_view(ViewMode::Search { query: "plan".into() });

        let vm = state.compute_viewmodel(24, 120);

        assert_eq!(vm.display_items.len(), 1);
        assert_eq!(vm.display_items[0].highlight_ranges, vec![(5, 9)]);
        assert_eq!(vm.input_bar.map(|bar| bar.text), Some("plan".to_string()));
    }

    #[test]
    fn signed_out_state_is_reported() {
        let state = AppState::new(Session::default(), Theme::default());
        let vm = state.compute_viewmodel(24, 80);
        assert_eq!(vm.empty_state.map(|e| e.message), Some("Signed out".to_string()));
    }

    #[test]
    fn truncate_marks_cut() {
        assert_eq!(truncate("Groceries", 20), "Groceries");
        assert_eq!(truncate("Groceries", 6), "Gro...");
    }
}
