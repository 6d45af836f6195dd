//! HTTP mapping for notes service requests.
//!
//! Translates [`ApiRequest`] values into method/URL/header/body tuples for
//! Zellij's `web_request`, stores requests in the web request context, and
//! decodes `WebRequestResult` payloads back into [`ApiResponse`] values.
//! Nothing here performs I/O, which keeps the whole round trip testable
//! outside the plugin runtime.

use super::messages::{ApiRequest, ApiResponse};
use crate::domain::error::{NotepaneError, Result};
use crate::domain::{Note, NoteId};
use std::collections::BTreeMap;

/// Context key holding the serialized request.
const CONTEXT_REQUEST_KEY: &str = "notepane_request";

/// Upper bound for failure messages taken from response bodies.
const MAX_ERROR_MESSAGE_CHARS: usize = 200;

/// HTTP methods used by the notes service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

/// A fully built HTTP request, ready to hand to the runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: BTreeMap<String, String>,
    pub body: Vec<u8>,
}

impl ApiRequest {
    /// Builds the HTTP request for this API call.
    ///
    /// `base_url` may carry a trailing slash; it is normalized away.
    ///
    /// # Examples
    ///
    /// ```
    /// use notepane::api::{ApiRequest, HttpMethod};
    /// use notepane::domain::NoteId;
    ///
    /// let request = ApiRequest::archive_note(NoteId::from("abc"));
    /// let http = request.to_http("http://localhost:5000/api/", "tok");
    ///
    /// assert_eq!(http.method, HttpMethod::Put);
    /// assert_eq!(http.url, "http://localhost:5000/api/notes/abc/archive");
    /// assert_eq!(http.headers["Authorization"], "Bearer tok");
    /// ```
    #[must_use]
    pub fn to_http(&self, base_url: &str, token: &str) -> HttpRequest {
        let base = base_url.trim_end_matches('/');

        let (method, path, body) = match self {
            Self::FetchNotes { collection, .. } => {
                (HttpMethod::Get, collection.path().to_string(), Vec::new())
            }
            Self::CreateNote { draft, .. } => (
                HttpMethod::Post,
                "/notes".to_string(),
                draft.to_payload().to_string().into_bytes(),
            ),
            Self::DeleteNote { id, .. } => (HttpMethod::Delete, note_path(id, None), Vec::new()),
            Self::ArchiveNote { id, .. } => {
                (HttpMethod::Put, note_path(id, Some("archive")), Vec::new())
            }
            Self::UnarchiveNote { id, .. } => {
                (HttpMethod::Put, note_path(id, Some("unarchive")), Vec::new())
            }
        };

        let mut headers = BTreeMap::new();
        headers.insert("Authorization".to_string(), format!("Bearer {token}"));
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        headers.insert("Accept".to_string(), "application/json".to_string());

        HttpRequest {
            method,
            url: format!("{base}{path}"),
            headers,
            body,
        }
    }
}

/// `/notes/{id}` or `/notes/{id}/{action}` with the id percent-encoded.
fn note_path(id: &NoteId, action: Option<&str>) -> String {
    let segment = urlencoding::encode(id.as_str());
    action.map_or_else(
        || format!("/notes/{segment}"),
        |action| format!("/notes/{segment}/{action}"),
    )
}

/// Serializes a request into a web request context map.
///
/// # Errors
///
/// Returns [`NotepaneError::Decode`] if the request cannot be serialized.
pub fn request_context(request: &ApiRequest) -> Result<BTreeMap<String, String>> {
    let mut context = BTreeMap::new();
    context.insert(CONTEXT_REQUEST_KEY.to_string(), serde_json::to_string(request)?);
    Ok(context)
}

/// Recovers the request stored by [`request_context`].
///
/// Returns `Ok(None)` for contexts that were not produced by this plugin.
///
/// # Errors
///
/// Returns [`NotepaneError::Decode`] if the stored request is malformed.
pub fn request_from_context(context: &BTreeMap<String, String>) -> Result<Option<ApiRequest>> {
    context
        .get(CONTEXT_REQUEST_KEY)
        .map(|raw| serde_json::from_str(raw).map_err(NotepaneError::from))
        .transpose()
}

/// Decodes a web request result for `request`.
///
/// Statuses outside 200-299 and undecodable bodies both become
/// [`ApiResponse::Failed`]; callers do not distinguish error subtypes.
#[must_use]
pub fn decode_response(request: ApiRequest, status: u16, body: &[u8]) -> ApiResponse {
    match decode_success(&request, status, body) {
        Ok(response) => response,
        Err(e) => {
            let status = match &e {
                NotepaneError::Request { status, .. } => *status,
                _ => status,
            };
            ApiResponse::Failed {
                request,
                status,
                message: e.to_string(),
            }
        }
    }
}

fn decode_success(request: &ApiRequest, status: u16, body: &[u8]) -> Result<ApiResponse> {
    if !(200..300).contains(&status) {
        return Err(NotepaneError::Request {
            status,
            message: failure_message(body),
        });
    }

    Ok(match request {
        ApiRequest::FetchNotes {
            collection,
            generation,
            ..
        } => ApiResponse::NotesFetched {
            collection: *collection,
            generation: *generation,
            notes: serde_json::from_slice::<Vec<Note>>(body)?,
        },
        ApiRequest::CreateNote { .. } => ApiResponse::NoteCreated {
            note: serde_json::from_slice(body)?,
        },
        ApiRequest::DeleteNote { id, .. } => ApiResponse::NoteDeleted { id: id.clone() },
        ApiRequest::ArchiveNote { id, .. } => ApiResponse::NoteArchived {
            id: id.clone(),
            note: serde_json::from_slice(body)?,
        },
        ApiRequest::UnarchiveNote { id, .. } => ApiResponse::NoteUnarchived { id: id.clone() },
    })
}

/// Extracts a readable message from an error body, preferring a JSON `message`/`msg` field.
fn failure_message(body: &[u8]) -> String {
    if let Ok(value) = serde_json::from_slice::<serde_json::Value>(body) {
        if let Some(msg) = ["message", "msg", "error"]
            .iter()
            .find_map(|key| value.get(*key).and_then(serde_json::Value::as_str))
        {
            return msg.to_string();
        }
    }

    let text = String::from_utf8_lossy(body);
    let text = text.trim();
    if text.is_empty() {
        "empty response".to_string()
    } else {
        text.chars().take(MAX_ERROR_MESSAGE_CHARS).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Collection, NoteDraft};

    fn fetch(collection: Collection) -> ApiRequest {
        ApiRequest::FetchNotes {
            collection,
            generation: 3,
            trace_context: None,
        }
    }

    #[test]
    fn collections_map_to_their_endpoints() {
        let urls: Vec<String> = [Collection::Active, Collection::Archived, Collection::Trashed]
            .into_iter()
            .map(|c| fetch(c).to_http("http://api", "t").url)
            .collect();

        assert_eq!(
            urls,
            vec!["http://api/notes", "http://api/notes/archived", "http://api/notes/trash"]
        );
    }

    #[test]
    fn mutations_use_expected_methods() {
        let id = NoteId::from("n1");
        let delete = ApiRequest::delete_note(id.clone()).to_http("http://api", "t");
        let unarchive = ApiRequest::unarchive_note(id).to_http("http://api", "t");

        assert_eq!(delete.method, HttpMethod::Delete);
        assert_eq!(delete.url, "http://api/notes/n1");
        assert_eq!(unarchive.method, HttpMethod::Put);
        assert_eq!(unarchive.url, "http://api/notes/n1/unarchive");
    }

    #[test]
    fn create_sends_draft_as_json_body() {
        let draft = NoteDraft {
            title: "Trip".into(),
            tags: "travel".into(),
            ..NoteDraft::default()
        };
        let http = ApiRequest::create_note(draft).to_http("http://api", "t");
        let body: serde_json::Value = serde_json::from_slice(&http.body).unwrap();

        assert_eq!(http.method, HttpMethod::Post);
        assert_eq!(body["title"], "Trip");
        assert_eq!(body["tags"], serde_json::json!(["travel"]));
    }

    #[test]
    fn note_ids_are_percent_encoded() {
        let http = ApiRequest::delete_note(NoteId::from("a/b c")).to_http("http://api", "t");
        assert_eq!(http.url, "http://api/notes/a%2Fb%20c");

        let http = ApiRequest::archive_note(NoteId::from("café")).to_http("http://api", "t");
        assert_eq!(http.url, "http://api/notes/caf%C3%A9/archive");
    }

    #[test]
    fn context_round_trips_request() {
        let request = fetch(Collection::Trashed);
        let context = request_context(&request).unwrap();

        assert_eq!(request_from_context(&context).unwrap(), Some(request));
        assert_eq!(request_from_context(&BTreeMap::new()).unwrap(), None);
    }

    #[test]
    fn fetch_success_decodes_notes_and_keeps_generation() {
        let body = br#"[{"_id":"1","title":"Groceries","content":"milk eggs","tags":["home"]}]"#;

        match decode_response(fetch(Collection::Active), 200, body) {
            ApiResponse::NotesFetched { collection, generation, notes } => {
                assert_eq!(collection, Collection::Active);
                assert_eq!(generation, 3);
                assert_eq!(notes.len(), 1);
                assert_eq!(notes[0].title, "Groceries");
            }
            other => panic!("unexpected response: {other:?}"),
        }
    }

    #[test]
    fn non_success_status_becomes_failure_with_service_message() {
        let response = decode_response(fetch(Collection::Active), 401, br#"{"msg":"Token is not valid"}"#);

        assert_eq!(
            response,
            ApiResponse::Failed {
                request: fetch(Collection::Active),
                status: 401,
                message: "Request failed with status 401: Token is not valid".to_string(),
            }
        );
    }

    #[test]
    fn malformed_body_on_success_status_is_a_failure() {
        let response = decode_response(
            ApiRequest::archive_note(NoteId::from("1")),
            200,
            b"<html>",
        );
        assert!(matches!(response, ApiResponse::Failed { status: 200, .. }));
    }

    #[test]
    fn delete_and_unarchive_ignore_response_body() {
        let id = NoteId::from("9");
        assert_eq!(
            decode_response(ApiRequest::delete_note(id.clone()), 204, b""),
            ApiResponse::NoteDeleted { id: id.clone() }
        );
        assert_eq!(
            decode_response(ApiRequest::unarchive_note(id.clone()), 200, b"not json"),
            ApiResponse::NoteUnarchived { id }
        );
    }
}
