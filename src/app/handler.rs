//! Event handling and state transition logic.
//!
//! [`handle_event`] is the controller's only entry point. It pattern-matches
//! an [`Event`], mutates [`AppState`] and returns whether the pane needs a
//! re-render together with the actions the runtime must execute.
//!
//! # Event Types
//!
//! - **Navigation**: `KeyDown`, `KeyUp`
//! - **Input**: `Char`, `Backspace`, `ToggleFocus`, `Escape`
//! - **View Selection**: `MenuSelect`, `SelectLabel`, `ShowAll`
//! - **Note Actions**: `DeleteSelected`, `ArchiveSelected`, `UnarchiveSelected`, `SubmitDraft`
//! - **Session**: `Start`, `Refresh`, `Logout`
//! - **Service**: `ApiResponse` with decoded results of earlier requests
//!
//! # Example
//!
//! ```rust
//! use notepane::app::{handle_event, Action, AppState, Event};
//! use notepane::domain::Session;
//! use notepane::ui::Theme;
//!
//! let mut state = AppState::new(Session::new(Some("tok".into())), Theme::default());
//! let (_render, actions) = handle_event(&mut state, &Event::Start)?;
//! assert!(matches!(actions.as_slice(), [Action::SendRequest(_)]));
//! # Ok::<(), notepane::NotepaneError>(())
//! ```

use super::menu::ViewSelection;
use super::modes::{DraftField, InputFocus, ViewMode};
use crate::api::{ApiRequest, ApiResponse};
use crate::app::{Action, AppState};
use crate::domain::error::Result;
use crate::domain::{Collection, NoteDraft, NoteId};

/// Events triggered by user input or by service responses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Permissions were granted; load the initial view.
    Start,

    /// Moves selection cursor down by one position (wraps to top).
    KeyDown,
    /// Moves selection cursor up by one position (wraps to bottom).
    KeyUp,

    /// Types a character into the focused field.
    Char(char),
    /// Removes the last character of the focused field.
    Backspace,
    /// Moves between the list and the view's input field.
    ToggleFocus,
    /// Leaves the input field.
    Escape,

    /// A view was chosen from the menu.
    MenuSelect(ViewSelection),
    /// Returns to the all-notes view.
    ShowAll,
    /// Shows active notes tagged with the label.
    SelectLabel(String),

    DeleteSelected,
    ArchiveSelected,
    UnarchiveSelected,
    /// Saves the draft in the new-note view.
    SubmitDraft,

    /// Re-fetches the current view's collection.
    Refresh,
    /// User-initiated logout.
    Logout,
    /// Closes the floating pane.
    CloseFocus,

    /// Decoded result of a request sent earlier.
    ApiResponse(ApiResponse),
}

/// Processes an event, mutates state and returns `(needs_render, actions)`.
///
/// # Errors
///
/// Currently infallible; the `Result` keeps the runtime contract uniform with
/// request serialization errors surfaced by the shim.
#[allow(clippy::too_many_lines)]
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    match event {
        Event::Start => Ok((true, fetch_actions(state))),
        Event::KeyDown => {
            state.move_selection_down();
            Ok((true, vec![]))
        }
        Event::KeyUp => {
            state.move_selection_up();
            Ok((true, vec![]))
        }
        Event::Char(c) => {
            if state.focus != InputFocus::Field {
                return Ok((false, vec![]));
            }
            let field = state.draft_field;
            match &mut state.view {
                ViewMode::Search { query } => query.push(*c),
                ViewMode::Labels { label } => label.push(*c),
                ViewMode::NewNote(draft) => field.text_mut(draft).push(*c),
                _ => return Ok((false, vec![])),
            }
            state.apply_filter();
            Ok((true, vec![]))
        }
        Event::Backspace => {
            if state.focus != InputFocus::Field {
                return Ok((false, vec![]));
            }
            let field = state.draft_field;
            let removed = match &mut state.view {
                ViewMode::Search { query } => query.pop(),
                ViewMode::Labels { label } => label.pop(),
                ViewMode::NewNote(draft) => field.text_mut(draft).pop(),
                _ => None,
            };
            if removed.is_none() {
                return Ok((false, vec![]));
            }
            state.apply_filter();
            Ok((true, vec![]))
        }
        Event::ToggleFocus => {
            if !state.view.has_field() {
                return Ok((false, vec![]));
            }
            state.focus = match (state.focus, &state.view) {
                (InputFocus::List, _) => {
                    state.draft_field = DraftField::Title;
                    InputFocus::Field
                }
                (InputFocus::Field, ViewMode::NewNote(_))
                    if state.draft_field != DraftField::Color =>
                {
                    state.draft_field = state.draft_field.next();
                    InputFocus::Field
                }
                (InputFocus::Field, _) => InputFocus::List,
            };
            Ok((true, vec![]))
        }
        Event::Escape => {
            if state.focus == InputFocus::List {
                return Ok((false, vec![]));
            }
            state.focus = InputFocus::List;
            Ok((true, vec![]))
        }
        Event::MenuSelect(selection) => {
            state.set_view(ViewMode::from_selection(*selection));
            Ok((true, fetch_actions(state)))
        }
        Event::ShowAll => {
            state.set_view(ViewMode::AllNotes);
            Ok((true, fetch_actions(state)))
        }
        Event::SelectLabel(label) => {
            tracing::debug!(label = %label, "label selected");
            state.set_view(ViewMode::Labels {
                label: label.clone(),
            });
            state.focus = InputFocus::List;
            Ok((true, fetch_actions(state)))
        }
        Event::DeleteSelected => {
            if !state.view.allows_archive_and_delete() {
                return Ok((false, vec![]));
            }
            Ok((false, selected_request(state, ApiRequest::delete_note)))
        }
        Event::ArchiveSelected => {
            if !state.view.allows_archive_and_delete() {
                return Ok((false, vec![]));
            }
            Ok((false, selected_request(state, ApiRequest::archive_note)))
        }
        Event::UnarchiveSelected => {
            if !state.view.allows_unarchive() {
                return Ok((false, vec![]));
            }
            Ok((false, selected_request(state, ApiRequest::unarchive_note)))
        }
        Event::SubmitDraft => {
            let ViewMode::NewNote(draft) = &state.view else {
                return Ok((false, vec![]));
            };
            if !state.session.is_active() {
                return Ok((false, vec![]));
            }
            if !draft.is_submittable() {
                state.status = Some("A note needs a title or content".to_string());
                return Ok((true, vec![]));
            }
            tracing::debug!(title = %draft.title, "submitting draft");
            Ok((
                false,
                vec![Action::SendRequest(ApiRequest::create_note(draft.clone()))],
            ))
        }
        Event::Refresh => Ok((true, force_fetch(state))),
        Event::Logout => {
            if state.end_session() {
                tracing::info!("user logged out");
                Ok((true, vec![Action::EndSession]))
            } else {
                Ok((false, vec![]))
            }
        }
        Event::CloseFocus => Ok((false, vec![Action::CloseFocus])),
        Event::ApiResponse(response) => Ok(handle_response(state, response)),
    }
}

/// Fetch actions for the current view, if it needs a snapshot.
fn fetch_actions(state: &mut AppState) -> Vec<Action> {
    if state.needs_fetch() {
        force_fetch(state)
    } else {
        tracing::debug!(view = state.view.name(), "re-filtering cached snapshot");
        vec![]
    }
}

fn force_fetch(state: &mut AppState) -> Vec<Action> {
    state
        .begin_fetch()
        .map(Action::SendRequest)
        .into_iter()
        .collect()
}

/// Builds a mutation request for the selected note.
fn selected_request<F>(state: &AppState, build: F) -> Vec<Action>
where
    F: FnOnce(NoteId) -> ApiRequest,
{
    if !state.session.is_active() {
        tracing::debug!("no active session, ignoring note action");
        return vec![];
    }
    state.selected_note().map_or_else(
        || {
            tracing::debug!("no note selected");
            vec![]
        },
        |note| vec![Action::SendRequest(build(note.id.clone()))],
    )
}

fn handle_response(state: &mut AppState, response: &ApiResponse) -> (bool, Vec<Action>) {
    match response {
        ApiResponse::NotesFetched {
            collection,
            generation,
            notes,
        } => {
            let accepted = state.accept_fetch(*collection, *generation, notes);
            if accepted {
                tracing::debug!(count = notes.len(), ?collection, "notes loaded");
            }
            (accepted, vec![])
        }
        ApiResponse::NoteCreated { note } => {
            if state.snapshot == Some(Collection::Active) {
                state.merge_note(note);
            } else {
                tracing::debug!(id = %note.id, "active notes not cached, skipping merge");
            }
            if let ViewMode::NewNote(draft) = &mut state.view {
                *draft = NoteDraft::default();
                state.draft_field = DraftField::Title;
            }
            state.status = Some(format!("Created \"{}\"", note.title));
            (true, vec![])
        }
        ApiResponse::NoteDeleted { id } => {
            state.remove_note(id);
            state.status = Some("Note deleted".to_string());
            (true, vec![])
        }
        ApiResponse::NoteArchived { id, note } => {
            state.replace_note(id, note);
            state.status = Some("Note archived".to_string());
            (true, vec![])
        }
        ApiResponse::NoteUnarchived { id } => {
            state.remove_note(id);
            state.status = Some("Note restored".to_string());
            (true, vec![])
        }
        ApiResponse::Failed {
            request,
            status,
            message,
        } => handle_failure(state, request, *status, message),
    }
}

fn handle_failure(
    state: &mut AppState,
    request: &ApiRequest,
    status: u16,
    message: &str,
) -> (bool, Vec<Action>) {
    if let ApiRequest::FetchNotes { generation, .. } = request {
        if *generation != state.fetch_generation {
            tracing::debug!(generation, "discarding stale fetch failure");
            return (false, vec![]);
        }

        tracing::error!(status, error = %message, "failed to fetch notes, ending session");
        return if state.end_session() {
            (true, vec![Action::EndSession])
        } else {
            (false, vec![])
        };
    }

    tracing::error!(
        operation = request.operation(),
        status,
        error = %message,
        "note request failed"
    );
    state.status = Some(format!("Could not {}: {message}", request.operation()));
    (true, vec![])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Note, Session};
    use crate::ui::theme::Theme;

    fn sample_notes() -> Vec<Note> {
        vec![
            Note::new("1", "Groceries", "milk eggs").with_tags(&["home"]),
            Note::new("2", "Work plan", "Q3 review").with_tags(&["work"]),
        ]
    }

    fn loaded_state() -> AppState {
        let mut state = AppState::new(Session::new(Some("tok".into())), Theme::default());
        handle_event(&mut state, &Event::Start).unwrap();
        let generation = state.fetch_generation;
        handle_event(
            &mut state,
            &Event::ApiResponse(ApiResponse::NotesFetched {
                collection: Collection::Active,
                generation,
                notes: sample_notes(),
            }),
        )
        .unwrap();
        state
    }

    fn only_request(actions: &[Action]) -> &ApiRequest {
        match actions {
            [Action::SendRequest(request)] => request,
            other => panic!("expected a single request, got {other:?}"),
        }
    }

    #[test]
    fn start_fetches_active_notes() {
        let mut state = AppState::new(Session::new(Some("tok".into())), Theme::default());
        let (_, actions) = handle_event(&mut state, &Event::Start).unwrap();

        assert!(matches!(
            only_request(&actions),
            ApiRequest::FetchNotes { collection: Collection::Active, generation: 1, .. }
        ));
    }

    #[test]
    fn search_refilters_cached_snapshot_without_fetch() {
        let mut state = loaded_state();

        let (_, actions) = handle_event(&mut state, &Event::MenuSelect(ViewSelection::Search)).unwrap();
        assert!(actions.is_empty());
        assert_eq!(state.focus, InputFocus::Field);

        for c in "milk".chars() {
            handle_event(&mut state, &Event::Char(c)).unwrap();
        }

        assert_eq!(state.filtered_notes.len(), 1);
        assert_eq!(state.filtered_notes[0].title, "Groceries");
    }

    #[test]
    fn selecting_a_view_resets_query() {
        let mut state = loaded_state();
        handle_event(&mut state, &Event::MenuSelect(ViewSelection::Search)).unwrap();
        handle_event(&mut state, &Event::Char('x')).unwrap();

        handle_event(&mut state, &Event::MenuSelect(ViewSelection::Labels)).unwrap();
        assert_eq!(state.view, ViewMode::Labels { label: String::new() });

        handle_event(&mut state, &Event::MenuSelect(ViewSelection::Search)).unwrap();
        assert_eq!(state.view, ViewMode::Search { query: String::new() });
    }

    #[test]
    fn select_label_filters_without_fetch() {
        let mut state = loaded_state();
        let (_, actions) = handle_event(&mut state, &Event::SelectLabel("work".into())).unwrap();

        assert!(actions.is_empty());
        assert_eq!(state.filtered_notes.len(), 1);
        assert_eq!(state.filtered_notes[0].id.as_str(), "2");
    }

    #[test]
    fn archived_view_always_fetches() {
        let mut state = loaded_state();
        let (_, actions) = handle_event(&mut state, &Event::MenuSelect(ViewSelection::Archived)).unwrap();

        assert!(matches!(
            only_request(&actions),
            ApiRequest::FetchNotes { collection: Collection::Archived, .. }
        ));
    }

    #[test]
    fn label_view_after_trash_fetches_active_first() {
        let mut state = loaded_state();
        handle_event(&mut state, &Event::MenuSelect(ViewSelection::Trash)).unwrap();

        let (_, actions) = handle_event(&mut state, &Event::SelectLabel("home".into())).unwrap();

        assert!(matches!(
            only_request(&actions),
            ApiRequest::FetchNotes { collection: Collection::Active, .. }
        ));
    }

    #[test]
    fn delete_success_removes_note() {
        let mut state = loaded_state();
        let (_, actions) = handle_event(&mut state, &Event::DeleteSelected).unwrap();
        let ApiRequest::DeleteNote { id, .. } = only_request(&actions) else {
            panic!("expected delete");
        };
        assert_eq!(id.as_str(), "1");

        handle_event(
            &mut state,
            &Event::ApiResponse(ApiResponse::NoteDeleted { id: id.clone() }),
        )
        .unwrap();

        assert_eq!(state.notes.len(), 1);
        assert!(state.notes.iter().all(|n| n.id.as_str() != "1"));
    }

    #[test]
    fn archive_success_replaces_in_place() {
        let mut state = loaded_state();
        let mut updated = Note::new("2", "Work plan", "Q3 review");
        updated.color = Some("#fff475".into());

        handle_event(
            &mut state,
            &Event::ApiResponse(ApiResponse::NoteArchived {
                id: NoteId::from("2"),
                note: updated.clone(),
            }),
        )
        .unwrap();

        assert_eq!(state.notes.len(), 2);
        assert_eq!(state.notes[1], updated);
    }

    #[test]
    fn mutation_failure_keeps_state_and_session() {
        let mut state = loaded_state();
        let before = state.notes.clone();

        handle_event(
            &mut state,
            &Event::ApiResponse(ApiResponse::Failed {
                request: ApiRequest::delete_note(NoteId::from("1")),
                status: 500,
                message: "boom".into(),
            }),
        )
        .unwrap();

        assert_eq!(state.notes, before);
        assert!(state.session.is_active());
        assert!(state.status.as_deref().is_some_and(|s| s.contains("delete note")));
    }

    #[test]
    fn trash_and_archived_restrict_actions() {
        let mut state = loaded_state();
        state.view = ViewMode::Trash;
        assert!(handle_event(&mut state, &Event::DeleteSelected).unwrap().1.is_empty());
        assert!(handle_event(&mut state, &Event::UnarchiveSelected).unwrap().1.is_empty());

        state.view = ViewMode::Archived;
        assert!(handle_event(&mut state, &Event::ArchiveSelected).unwrap().1.is_empty());
        assert!(matches!(
            only_request(&handle_event(&mut state, &Event::UnarchiveSelected).unwrap().1),
            ApiRequest::UnarchiveNote { .. }
        ));
    }

    #[test]
    fn fetch_failure_logs_out_exactly_once() {
        let mut state = loaded_state();
        let before = state.notes.clone();
        let (_, actions) = handle_event(&mut state, &Event::Refresh).unwrap();
        let request = only_request(&actions).clone();

        let failure = Event::ApiResponse(ApiResponse::Failed {
            request,
            status: 401,
            message: "Token is not valid".into(),
        });

        let (_, first) = handle_event(&mut state, &failure).unwrap();
        let (_, second) = handle_event(&mut state, &failure).unwrap();

        assert_eq!(first, vec![Action::EndSession]);
        assert!(second.is_empty());
        assert_eq!(state.notes, before);
        assert!(!state.session.is_active());
    }

    #[test]
    fn stale_fetch_does_not_overwrite_newer_view() {
        let mut state = AppState::new(Session::new(Some("tok".into())), Theme::default());
        handle_event(&mut state, &Event::Start).unwrap();
        handle_event(&mut state, &Event::MenuSelect(ViewSelection::Trash)).unwrap();

        let (render, _) = handle_event(
            &mut state,
            &Event::ApiResponse(ApiResponse::NotesFetched {
                collection: Collection::Active,
                generation: 1,
                notes: sample_notes(),
            }),
        )
        .unwrap();

        assert!(!render);
        assert!(state.notes.is_empty());
        assert_eq!(state.snapshot, None);
    }

    #[test]
    fn logout_ends_session_once_and_stops_fetching() {
        let mut state = loaded_state();

        assert_eq!(handle_event(&mut state, &Event::Logout).unwrap().1, vec![Action::EndSession]);
        assert!(handle_event(&mut state, &Event::Logout).unwrap().1.is_empty());
        assert!(handle_event(&mut state, &Event::Refresh).unwrap().1.is_empty());
    }

    #[test]
    fn draft_is_typed_across_fields_and_submitted() {
        let mut state = loaded_state();
        handle_event(&mut state, &Event::MenuSelect(ViewSelection::New)).unwrap();

        for c in "Trip".chars() {
            handle_event(&mut state, &Event::Char(c)).unwrap();
        }
        handle_event(&mut state, &Event::ToggleFocus).unwrap();
        handle_event(&mut state, &Event::ToggleFocus).unwrap();
        for c in "travel".chars() {
            handle_event(&mut state, &Event::Char(c)).unwrap();
        }

        let (_, actions) = handle_event(&mut state, &Event::SubmitDraft).unwrap();
        let ApiRequest::CreateNote { draft, .. } = only_request(&actions) else {
            panic!("expected create");
        };
        assert_eq!(draft.title, "Trip");
        assert_eq!(draft.tag_list(), vec!["travel"]);

        let created = Note::new("3", "Trip", "").with_tags(&["travel"]);
        handle_event(
            &mut state,
            &Event::ApiResponse(ApiResponse::NoteCreated { note: created }),
        )
        .unwrap();

        assert_eq!(state.notes.len(), 3);
        assert_eq!(state.view, ViewMode::NewNote(NoteDraft::default()));
    }

    #[test]
    fn created_note_is_not_merged_into_trash() {
        let mut state = loaded_state();
        handle_event(&mut state, &Event::MenuSelect(ViewSelection::New)).unwrap();
        for c in "Trip".chars() {
            handle_event(&mut state, &Event::Char(c)).unwrap();
        }
        handle_event(&mut state, &Event::SubmitDraft).unwrap();

        handle_event(&mut state, &Event::MenuSelect(ViewSelection::Trash)).unwrap();
        let generation = state.fetch_generation;
        handle_event(
            &mut state,
            &Event::ApiResponse(ApiResponse::NotesFetched {
                collection: Collection::Trashed,
                generation,
                notes: vec![Note::new("9", "Old", "")],
            }),
        )
        .unwrap();

        let (render, actions) = handle_event(
            &mut state,
            &Event::ApiResponse(ApiResponse::NoteCreated {
                note: Note::new("3", "Trip", ""),
            }),
        )
        .unwrap();

        assert!(render);
        assert!(actions.is_empty());
        assert_eq!(state.snapshot, Some(Collection::Trashed));
        let ids: Vec<&str> = state.notes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, ["9"]);
        assert_eq!(state.status.as_deref(), Some("Created \"Trip\""));
    }

    #[test]
    fn empty_draft_is_not_sent() {
        let mut state = loaded_state();
        handle_event(&mut state, &Event::MenuSelect(ViewSelection::New)).unwrap();

        let (render, actions) = handle_event(&mut state, &Event::SubmitDraft).unwrap();

        assert!(render);
        assert!(actions.is_empty());
    }

    #[test]
    fn chars_are_ignored_in_list_focus() {
        let mut state = loaded_state();
        let (render, _) = handle_event(&mut state, &Event::Char('x')).unwrap();
        assert!(!render);
        assert_eq!(state.view, ViewMode::AllNotes);
    }
}
