//! Side effects requested by the event handler.
//!
//! The handler never talks to Zellij directly. It returns a `Vec<Action>` and
//! the plugin runtime executes them in order.

use crate::api::ApiRequest;

/// Commands executed by the plugin runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Closes the focused floating pane, hiding the plugin UI.
    CloseFocus,

    /// Sends a request to the notes service as a Zellij web request.
    ///
    /// The result comes back later as an `Event::ApiResponse`.
    SendRequest(ApiRequest),

    /// The session ended (explicit logout or a failed fetch).
    ///
    /// Emitted at most once per session.
    EndSession,
}
