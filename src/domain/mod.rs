//! Domain layer for the notepane plugin.
//!
//! Core types independent of Zellij APIs and of the HTTP plumbing:
//!
//! - [`error`]: Error types and result aliases
//! - [`note`]: Note model, note collections and the new-note draft
//! - [`session`]: Token session context injected into the controller
//!
//! # Examples
//!
//! ```
//! use notepane::domain::{Collection, Note};
//!
//! let note = Note::new("n1", "Groceries", "milk eggs");
//! assert_eq!(Collection::Archived.path(), "/notes/archived");
//! assert!(note.matches_text("milk"));
//! ```

pub mod error;
pub mod note;
pub mod session;

pub use error::{NotepaneError, Result};
pub use note::{Collection, Note, NoteDraft, NoteId};
pub use session::Session;
