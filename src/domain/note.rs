//! Note domain model.
//!
//! A [`Note`] is owned by the remote notes service; the plugin only keeps a
//! transient copy of whatever the service last returned. Whether a note is
//! archived or trashed is not stored on the note itself, it is implied by the
//! [`Collection`] it was fetched from.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque note identifier assigned by the service.
///
/// Serialized as the service's `_id` field. Stable for the note's lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(pub String);

impl NoteId {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NoteId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// A note as returned by the notes service.
///
/// Missing text fields decode to empty strings and missing tags to an empty
/// list, so partially populated documents still render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    #[serde(rename = "_id")]
    pub id: NoteId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    /// Display hint, usually a hex color such as `#fff475`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reminder: Option<DateTime<Utc>>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Note {
    /// Creates a note with the given id, title and content and no metadata.
    ///
    /// # Examples
    ///
    /// ```
    /// use notepane::domain::Note;
    ///
    /// let note = Note::new("n1", "Groceries", "milk eggs").with_tags(&["home"]);
    /// assert!(note.has_tag("home"));
    /// assert!(!note.has_tag("Home"));
    /// ```
    #[must_use]
    pub fn new(id: &str, title: &str, content: &str) -> Self {
        Self {
            id: NoteId::from(id),
            title: title.to_string(),
            content: content.to_string(),
            color: None,
            reminder: None,
            tags: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_tags(mut self, tags: &[&str]) -> Self {
        self.tags = tags.iter().map(ToString::to_string).collect();
        self
    }

    /// Exact, case-sensitive tag membership.
    #[must_use]
    pub fn has_tag(&self, label: &str) -> bool {
        self.tags.iter().any(|tag| tag == label)
    }

    /// Case-insensitive substring match against title or content.
    ///
    /// `needle_lower` must already be lowercased; callers filtering a whole list
    /// lowercase the query once.
    #[must_use]
    pub fn matches_text(&self, needle_lower: &str) -> bool {
        self.title.to_lowercase().contains(needle_lower)
            || self.content.to_lowercase().contains(needle_lower)
    }

    /// Reminder formatted for display in local list rows.
    #[must_use]
    pub fn reminder_label(&self) -> Option<String> {
        self.reminder
            .map(|at| at.format("%Y-%m-%d %H:%M UTC").to_string())
    }
}

/// The three disjoint remote collections a note can be fetched from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Collection {
    /// Notes that are neither archived nor trashed.
    Active,
    Archived,
    Trashed,
}

impl Collection {
    /// Service path of the collection, relative to the API base URL.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Active => "/notes",
            Self::Archived => "/notes/archived",
            Self::Trashed => "/notes/trash",
        }
    }
}

/// A note being composed in the "new note" view.
///
/// Tags are typed as a comma-separated list and split on submit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteDraft {
    pub title: String,
    pub content: String,
    pub tags: String,
    pub color: String,
}

impl NoteDraft {
    /// A draft is submittable once it has a title or some content.
    #[must_use]
    pub fn is_submittable(&self) -> bool {
        !self.title.trim().is_empty() || !self.content.trim().is_empty()
    }

    /// Splits the tag input into trimmed, non-empty labels, keeping their order.
    #[must_use]
    pub fn tag_list(&self) -> Vec<String> {
        self.tags
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(String::from)
            .collect()
    }

    /// JSON payload sent to `POST /notes`.
    #[must_use]
    pub fn to_payload(&self) -> serde_json::Value {
        let mut payload = serde_json::json!({
            "title": self.title.trim(),
            "content": self.content,
            "tags": self.tag_list(),
        });
        let color = self.color.trim();
        if !color.is_empty() {
            payload["color"] = serde_json::Value::String(color.to_string());
        }
        payload
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_service_document_with_mongo_id() {
        let json = r##"{
            "_id": "65f1c0ffee",
            "title": "Groceries",
            "content": "milk eggs",
            "color": "#fff475",
            "reminder": "2024-03-01T09:30:00.000Z",
            "tags": ["home", "errands"],
            "user": "abc",
            "__v": 0
        }"##;

        let note: Note = serde_json::from_str(json).unwrap();

        assert_eq!(note.id.as_str(), "65f1c0ffee");
        assert_eq!(note.color.as_deref(), Some("#fff475"));
        assert_eq!(note.tags, vec!["home", "errands"]);
        assert_eq!(note.reminder_label().as_deref(), Some("2024-03-01 09:30 UTC"));
    }

    #[test]
    fn missing_optional_fields_decode_to_defaults() {
        let note: Note = serde_json::from_str(r#"{"_id": "x"}"#).unwrap();

        assert!(note.title.is_empty());
        assert!(note.tags.is_empty());
        assert!(note.reminder.is_none());
    }

    #[test]
    fn text_match_ignores_case_in_title_and_content() {
        let note = Note::new("1", "Work Plan", "Q3 Review");

        assert!(note.matches_text("plan"));
        assert!(note.matches_text("q3 rev"));
        assert!(!note.matches_text("groceries"));
    }

    #[test]
    fn draft_payload_splits_tags_and_omits_blank_color() {
        let draft = NoteDraft {
            title: " Trip ".to_string(),
            content: "pack".to_string(),
            tags: "travel, ,summer".to_string(),
            color: String::new(),
        };

        let payload = draft.to_payload();

        assert_eq!(payload["title"], "Trip");
        assert_eq!(payload["tags"], serde_json::json!(["travel", "summer"]));
        assert!(payload.get("color").is_none());
    }

    #[test]
    fn empty_draft_is_not_submittable() {
        assert!(!NoteDraft::default().is_submittable());
        assert!(NoteDraft { content: "x".into(), ..NoteDraft::default() }.is_submittable());
    }
}
