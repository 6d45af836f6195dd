//! Session context shared with the note list controller.
//!
//! The session is passed into [`AppState`](crate::app::AppState) explicitly. It
//! exposes the auth token read-only and a single [`Session::end_session`]
//! capability; the controller never reaches for ambient auth state.

/// Token-based session for the notes service.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Session {
    token: Option<String>,
}

impl Session {
    /// Starts a session from a configured token. Blank tokens yield an inactive session.
    ///
    /// # Examples
    ///
    /// ```
    /// use notepane::domain::Session;
    ///
    /// let mut session = Session::new(Some("secret".to_string()));
    /// assert!(session.is_active());
    /// assert!(session.end_session());
    /// assert!(!session.end_session());
    /// assert!(session.token().is_none());
    /// ```
    #[must_use]
    pub fn new(token: Option<String>) -> Self {
        Self {
            token: token.filter(|t| !t.trim().is_empty()),
        }
    }

    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.token.is_some()
    }

    /// Ends the session by dropping the token.
    ///
    /// Returns `true` only for the call that actually ended an active session,
    /// which lets callers emit exactly one logout per session.
    pub fn end_session(&mut self) -> bool {
        self.token.take().is_some()
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("active", &self.is_active())
            .finish_non_exhaustive()
    }
}
