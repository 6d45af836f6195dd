//! Notepane: a Zellij plugin for browsing and editing notes kept by a REST notes service.
//!
//! Notepane renders a note list in a terminal pane and offers:
//! - Views for all notes, search, labels, archived and trashed notes
//! - Creating notes and archiving, unarchiving or deleting them
//! - A token session; any failed fetch signs the user out
//! - Non-blocking service access through Zellij web requests
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← Controller
//! │  - View selector menu                               │
//! │  - Event handling and actions                       │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                                    │
//! ┌───────────────┐                   ┌─────────────────┐
//! │ UI Layer      │                   │ API Layer       │
//! │ (ui/)         │                   │ (api/)          │
//! │ - Rendering   │                   │ - Requests      │
//! │ - Theming     │                   │ - HTTP mapping  │
//! │ - Components  │                   │ - Decoding      │
//! └───────────────┘                   └─────────────────┘
//!         │                                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Infrastructure & Domain Layers                     │
//! │  - Sandbox paths (infrastructure/)                  │
//! │  - Notes, session, errors (domain/)                 │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │  ← Optional
//! │  - OpenTelemetry tracing                            │
//! │  - File-based OTLP export                           │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Configuration
//!
//! ```kdl
//! pane {
//!     plugin location="file:/path/to/notepane.wasm" {
//!         api_url "http://localhost:5000/api"
//!         token "eyJhbGciOi..."
//!         theme "catppuccin-mocha"
//!         trace_level "info"
//!     }
//! }
//! ```
//!
//! # Flow
//!
//! 1. **Load**: parse configuration, start tracing, build `AppState` with the
//!    session, request `WebAccess` permission.
//! 2. **Start**: once permission is granted, fetch the active notes.
//! 3. **Interact**: keys become [`Event`]s; [`handle_event`] returns
//!    [`Action`]s such as sending a request.
//! 4. **Respond**: web request results are decoded into [`api::ApiResponse`]s
//!    and fed back as events.
//!
//! # Example
//!
//! ```rust
//! use notepane::{handle_event, initialize, Config, Event};
//! use notepane::app::ViewSelection;
//!
//! let config = Config {
//!     token: Some("secret".to_string()),
//!     ..Default::default()
//! };
//! let mut state = initialize(&config);
//!
//! for event in [Event::Start, Event::MenuSelect(ViewSelection::Archived)] {
//!     let (_render, actions) = handle_event(&mut state, &event)?;
//!     assert_eq!(actions.len(), 1);
//! }
//! # Ok::<(), notepane::NotepaneError>(())
//! ```

#![allow(clippy::multiple_crate_versions)]

pub mod api;
pub mod app;
pub mod domain;
pub mod infrastructure;

pub mod ui;

pub mod observability;

pub use app::{handle_event, Action, AppState, Event, ViewMode};
pub use domain::{Note, NotepaneError, Result, Session};
pub use ui::Theme;

use std::collections::BTreeMap;

/// Default base URL of the notes service.
pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";

/// Plugin configuration parsed from the plugin's KDL block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Base URL of the notes service, without a trailing slash.
    pub api_url: String,

    /// Session token sent as a bearer token. Absent or blank means signed out.
    pub token: Option<String>,

    /// Built-in theme name. Ignored if `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme; `~` resolves to the `/host` mount.
    pub theme_file: Option<String>,

    /// `EnvFilter` directive for tracing. Default: `"info"`.
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            token: None,
            theme_name: None,
            theme_file: None,
            trace_level: None,
        }
    }
}

impl Config {
    /// Parses the map Zellij passes to `load`.
    ///
    /// Blank values count as unset.
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use notepane::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("api_url".to_string(), "https://notes.example.com/api/".to_string());
    /// map.insert("token".to_string(), "abc".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.api_url, "https://notes.example.com/api");
    /// assert_eq!(config.token.as_deref(), Some("abc"));
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let value = |key: &str| {
            config
                .get(key)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map(String::from)
        };

        let api_url = value("api_url").map_or_else(
            || DEFAULT_API_URL.to_string(),
            |url| url.trim_end_matches('/').to_string(),
        );

        Self {
            api_url,
            token: value("token"),
            theme_name: value("theme"),
            theme_file: value("theme_file"),
            trace_level: value("trace_level"),
        }
    }

    /// Resolves the configured theme, falling back to the default on any failure.
    #[must_use]
    pub fn load_theme(&self) -> Theme {
        if let Some(theme_file) = &self.theme_file {
            let path = infrastructure::expand_tilde(theme_file);
            return Theme::from_file(&path).unwrap_or_else(|e| {
                tracing::warn!(theme_file = %path, error = %e, "failed to load theme file, using default");
                Theme::default()
            });
        }

        self.theme_name.as_ref().map_or_else(Theme::default, |name| {
            Theme::from_name(name).unwrap_or_else(|| {
                tracing::warn!(theme_name = %name, "unknown theme, using default");
                Theme::default()
            })
        })
    }
}

/// Builds the initial controller state from configuration.
///
/// The session is created from the configured token; nothing is fetched
/// until the runtime sends [`Event::Start`].
#[must_use]
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!(api_url = %config.api_url, "initializing notepane plugin");

    let session = Session::new(config.token.clone());
    if !session.is_active() {
        tracing::info!("no token configured, starting signed out");
    }

    AppState::new(session, config.load_theme())
}
