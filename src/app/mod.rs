//! Application layer coordinating state, events, and actions.
//!
//! Sits between the plugin runtime (main.rs) and the domain/api layers.
//!
//! # Architecture
//!
//! ```text
//! User Input → Events → Event Handler → State Mutations → Actions → Side Effects
//!                           ↑                                  ↓
//!                           └──────── Service Responses ───────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`handler`]: Event processing and state transitions
//! - [`menu`]: Stateless view selector
//! - [`modes`]: View and focus state types
//! - [`state`]: Controller state, filtering and view model computation

pub mod actions;
pub mod handler;
pub mod menu;
pub mod modes;
pub mod state;

pub use actions::Action;
pub use handler::{handle_event, Event};
pub use menu::{Menu, ViewSelection};
pub use modes::{DraftField, InputFocus, ViewMode};
pub use state::{filter_notes, AppState};
