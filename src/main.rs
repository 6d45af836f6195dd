//! Zellij plugin wrapper and entry point.
//!
//! Thin integration layer between the notepane library and Zellij: it maps
//! Zellij events to library events, executes the returned actions and turns
//! API requests into Zellij web requests.
//!
//! # Plugin Lifecycle
//!
//! 1. **Load**: Parse config, initialize tracing, create `AppState`
//! 2. **Permissions**: Request `WebAccess`; once granted, send `Event::Start`
//! 3. **Update**: Map keys and web request results to events
//! 4. **Render**: Call the library render function
//!
//! # Request Round Trip
//!
//! ```text
//! Action::SendRequest ──► web_request(url, verb, headers, body, context{request})
//!                                                   │
//! Event::ApiResponse ◄── decode_response ◄── WebRequestResult(status, body, context)
//! ```
//!
//! # Keybindings
//!
//! Global:
//! - `Ctrl+n`/`Down`: Move down
//! - `Ctrl+p`/`Up`: Move up
//!
//! List focus:
//! - `j`/`k`: Move down/up
//! - `n`, `/`, `L`, `A`, `T`: New, search, labels, archived, trash views
//! - `h`: All notes
//! - `a`/`d`/`u`: Archive, delete, unarchive the selected note
//! - `l`: Show notes sharing the selected note's first label
//! - `r`: Refresh, `O`: Log out, `q`: Close
//! - `Tab`: Focus the view's input field
//!
//! Field focus:
//! - Characters and `Backspace` edit the field
//! - `Tab`: Next form field, then back to the list
//! - `Enter`: Save the draft (new view) or return to the list
//! - `Esc`: Return to the list

#![allow(clippy::multiple_crate_versions)]

#[cfg(target_family = "wasm")]
use plugin::State;
#[cfg(target_family = "wasm")]
use zellij_tile::prelude::*;

#[cfg(target_family = "wasm")]
register_plugin!(State);

#[cfg(target_family = "wasm")]
mod plugin {
    use std::collections::BTreeMap;
    use zellij_tile::prelude::*;

    use notepane::api::{
        decode_response, request_context, request_from_context, ApiRequest, HttpMethod,
        TraceContext,
    };
    use notepane::app::{InputFocus, Menu, ViewMode};
    use notepane::{handle_event, Action, Config};

    /// Plugin state wrapper: the library state plus the service base URL.
    pub struct State {
        app: notepane::AppState,
        api_url: String,
    }

    impl Default for State {
        fn default() -> Self {
            let config = Config::default();
            Self {
                app: notepane::initialize(&config),
                api_url: config.api_url,
            }
        }
    }

    impl ZellijPlugin for State {
        /// Parses configuration, builds the controller state and asks for
        /// `WebAccess`. Nothing is fetched until the permission is granted.
        fn load(&mut self, configuration: BTreeMap<String, String>) {
            let config = Config::from_zellij(&configuration);
            notepane::observability::init_tracing(&config);

            let span = tracing::debug_span!("plugin_load");
            let _guard = span.entered();

            self.app = notepane::initialize(&config);
            self.api_url.clone_from(&config.api_url);

            tracing::debug!("requesting permissions");
            request_permission(&[PermissionType::WebAccess]);

            subscribe(&[
                EventType::Key,
                EventType::WebRequestResult,
                EventType::PermissionRequestResult,
            ]);

            tracing::debug!(api_url = %self.api_url, "plugin load complete - waiting for permissions");
        }

        fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
            let event_name = Self::get_event_name(&event);
            let span_name = format!("plugin_update::{event_name}");
            let span = tracing::debug_span!("plugin_update_event", otel.name = %span_name, event_type = %event_name);
            let _guard = span.entered();

            match event {
                zellij_tile::prelude::Event::Key(ref key) => match self.map_key_event(key) {
                    Some(our_event) => self.dispatch(&our_event),
                    None => false,
                },
                zellij_tile::prelude::Event::WebRequestResult(status, _headers, body, context) => {
                    self.handle_web_result(status, &body, &context)
                }
                zellij_tile::prelude::Event::PermissionRequestResult(permissions) => {
                    self.handle_permission_result(permissions)
                }
                _ => false,
            }
        }

        fn render(&mut self, rows: usize, cols: usize) {
            notepane::ui::render(&self.app, rows, cols);
        }
    }

    impl State {
        fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
            match event {
                zellij_tile::prelude::Event::Key(_) => "Key".to_string(),
                zellij_tile::prelude::Event::WebRequestResult(status, ..) => {
                    format!("WebRequestResult({status})")
                }
                zellij_tile::prelude::Event::PermissionRequestResult(_) => {
                    "PermissionRequestResult".to_string()
                }
                _ => "Other".to_string(),
            }
        }

        /// Runs a library event through the controller and executes its actions.
        fn dispatch(&mut self, event: &notepane::Event) -> bool {
            match handle_event(&mut self.app, event) {
                Ok((should_render, actions)) => {
                    tracing::debug!(
                        action_count = actions.len(),
                        should_render = should_render,
                        "event handled successfully"
                    );
                    for a in actions {
                        self.execute_action(&a);
                    }
                    should_render
                }
                Err(e) => {
                    tracing::error!(error = %e, "error handling event");
                    false
                }
            }
        }

        fn map_key_event(&self, key: &KeyWithModifier) -> Option<notepane::Event> {
            use notepane::Event;

            if key.bare_key == BareKey::Char('n') && key.has_modifiers(&[KeyModifier::Ctrl]) {
                return Some(Event::KeyDown);
            }
            if key.bare_key == BareKey::Char('p') && key.has_modifiers(&[KeyModifier::Ctrl]) {
                return Some(Event::KeyUp);
            }

            if self.app.focus == InputFocus::Field {
                return Some(match key.bare_key {
                    BareKey::Down => Event::KeyDown,
                    BareKey::Up => Event::KeyUp,
                    BareKey::Esc => Event::Escape,
                    BareKey::Tab => Event::ToggleFocus,
                    BareKey::Enter => match self.app.view {
                        ViewMode::NewNote(_) => Event::SubmitDraft,
                        _ => Event::ToggleFocus,
                    },
                    BareKey::Backspace => Event::Backspace,
                    BareKey::Char(c) => Event::Char(c),
                    _ => return None,
                });
            }

            Some(match key.bare_key {
                BareKey::Down | BareKey::Char('j') => Event::KeyDown,
                BareKey::Up | BareKey::Char('k') => Event::KeyUp,
                BareKey::Tab => Event::ToggleFocus,
                BareKey::Esc => Event::Escape,
                BareKey::Enter if matches!(self.app.view, ViewMode::NewNote(_)) => {
                    Event::SubmitDraft
                }
                BareKey::Char('h') => Event::ShowAll,
                BareKey::Char('l') => {
                    let label = self.app.selected_note()?.tags.first()?.clone();
                    Event::SelectLabel(label)
                }
                BareKey::Char('a') => Event::ArchiveSelected,
                BareKey::Char('u') => Event::UnarchiveSelected,
                BareKey::Char('d') => Event::DeleteSelected,
                BareKey::Char('r') => Event::Refresh,
                BareKey::Char('O') => Event::Logout,
                BareKey::Char('q') => Event::CloseFocus,
                BareKey::Char(c) => Event::MenuSelect(Menu::selection_for_key(c)?),
                _ => return None,
            })
        }

        fn handle_permission_result(&mut self, permissions: PermissionStatus) -> bool {
            match permissions {
                PermissionStatus::Granted => {
                    tracing::debug!("permissions granted - loading notes");
                    self.dispatch(&notepane::Event::Start)
                }
                PermissionStatus::Denied => {
                    tracing::warn!("web access denied - notes cannot be loaded");
                    self.app.status = Some("Web access permission denied".to_string());
                    true
                }
            }
        }

        /// Decodes a web request result and feeds it back as an API response.
        ///
        /// The request's trace context stays attached while the response is
        /// handled so the handling span joins the originating trace.
        fn handle_web_result(
            &mut self,
            status: u16,
            body: &[u8],
            context: &BTreeMap<String, String>,
        ) -> bool {
            let request = match request_from_context(context) {
                Ok(Some(request)) => request,
                Ok(None) => {
                    tracing::debug!("ignoring web request result without request context");
                    return false;
                }
                Err(e) => {
                    tracing::error!(error = %e, "failed to restore request from context");
                    return false;
                }
            };

            let _trace_guard = request.trace_context().and_then(TraceContext::attach);
            tracing::debug!(status, operation = request.operation(), body_len = body.len(), "web request result");

            let response = decode_response(request, status, body);
            self.dispatch(&notepane::Event::ApiResponse(response))
        }

        fn send_request(&self, request: &ApiRequest) {
            let Some(token) = self.app.session.token() else {
                tracing::warn!(operation = request.operation(), "no session token - request dropped");
                return;
            };

            let context = match request_context(request) {
                Ok(context) => context,
                Err(e) => {
                    tracing::error!(error = %e, "failed to encode request context");
                    return;
                }
            };

            let http = request.to_http(&self.api_url, token);
            let verb = match http.method {
                HttpMethod::Get => HttpVerb::Get,
                HttpMethod::Post => HttpVerb::Post,
                HttpMethod::Put => HttpVerb::Put,
                HttpMethod::Delete => HttpVerb::Delete,
            };

            tracing::debug!(url = %http.url, method = ?http.method, "sending web request");
            web_request(http.url, verb, http.headers, http.body, context);
        }

        /// Translates library actions to Zellij API calls.
        #[tracing::instrument(level = "debug", skip(self))]
        fn execute_action(&self, action: &Action) {
            match action {
                Action::CloseFocus => hide_self(),
                Action::SendRequest(request) => self.send_request(request),
                Action::EndSession => {
                    tracing::info!("session ended - further requests are suppressed");
                }
            }
        }
    }
}

#[cfg(not(target_family = "wasm"))]
fn main() {
    eprintln!("notepane is a Zellij plugin: build it for wasm32-wasip1 and load the .wasm from Zellij");
}
