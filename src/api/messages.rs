//! Request and response types exchanged with the notes service.
//!
//! Requests leave the plugin as Zellij web requests and come back as
//! `WebRequestResult` events. Each [`ApiRequest`] rides along in the web request
//! context so the response can be matched to the request that produced it,
//! including the trace context of the span that issued it.

use crate::domain::{Collection, Note, NoteDraft, NoteId};
use serde::{Deserialize, Serialize};

/// Distributed tracing context carried from request to response.
///
/// Captures the current trace and span IDs from OpenTelemetry so the span that
/// handles a response is linked to the span that sent the request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceContext {
    /// OpenTelemetry trace ID as a hex string.
    pub trace_id: String,

    /// Parent span ID for linking spans across the request boundary.
    pub parent_span_id: String,
}

impl TraceContext {
    /// Creates a trace context from the current tracing span.
    ///
    /// Returns `None` if the current span context is invalid or not sampled,
    /// which is the case whenever no OpenTelemetry layer is installed.
    pub fn from_current() -> Option<Self> {
        use opentelemetry::trace::TraceContextExt;
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let span = tracing::Span::current();

        let otel_context = span.context();
        let span_ref = otel_context.span();
        let span_context = span_ref.span_context();

        if !span_context.is_valid() {
            return None;
        }

        Some(Self {
            trace_id: format!("{:032x}", span_context.trace_id()),
            parent_span_id: format!("{:016x}", span_context.span_id()),
        })
    }

    /// Attaches this context as the remote parent for spans on the current thread.
    ///
    /// The returned guard must be held while the response is handled.
    #[must_use]
    pub fn attach(&self) -> Option<opentelemetry::ContextGuard> {
        use opentelemetry::trace::{
            SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState,
        };

        let trace_id = TraceId::from_hex(&self.trace_id).ok()?;
        let span_id = SpanId::from_hex(&self.parent_span_id).ok()?;

        let span_context = SpanContext::new(
            trace_id,
            span_id,
            TraceFlags::SAMPLED,
            true,
            TraceState::default(),
        );

        Some(
            opentelemetry::Context::current()
                .with_remote_span_context(span_context)
                .attach(),
        )
    }
}

/// Generates constructors for `ApiRequest` variants that attach the current trace context.
macro_rules! api_request_builders {
    (
        $(
            $builder_name:ident($variant:ident { $($field:ident: $ty:ty),* $(,)? })
        ),* $(,)?
    ) => {
        impl ApiRequest {
            $(
                #[doc = concat!("Create a ", stringify!($variant), " request with current trace context")]
                #[must_use]
                pub fn $builder_name($($field: $ty),*) -> Self {
                    Self::$variant {
                        $($field,)*
                        trace_context: TraceContext::from_current(),
                    }
                }
            )*
        }
    };
}

api_request_builders! {
    fetch_notes(FetchNotes { collection: Collection, generation: u64 }),
    create_note(CreateNote { draft: NoteDraft }),
    delete_note(DeleteNote { id: NoteId }),
    archive_note(ArchiveNote { id: NoteId }),
    unarchive_note(UnarchiveNote { id: NoteId }),
}

/// Requests sent to the notes service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApiRequest {
    /// Fetch one of the three note collections.
    FetchNotes {
        collection: Collection,

        /// Fetch generation; responses from older generations are dropped.
        generation: u64,

        #[serde(default, skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Create a note from the composed draft.
    CreateNote {
        draft: NoteDraft,

        #[serde(default, skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    DeleteNote {
        id: NoteId,

        #[serde(default, skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    ArchiveNote {
        id: NoteId,

        #[serde(default, skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    UnarchiveNote {
        id: NoteId,

        #[serde(default, skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },
}

impl ApiRequest {
    /// Trace context captured when the request was built.
    #[must_use]
    pub const fn trace_context(&self) -> Option<&TraceContext> {
        match self {
            Self::FetchNotes { trace_context, .. }
            | Self::CreateNote { trace_context, .. }
            | Self::DeleteNote { trace_context, .. }
            | Self::ArchiveNote { trace_context, .. }
            | Self::UnarchiveNote { trace_context, .. } => trace_context.as_ref(),
        }
    }

    /// Short operation name used in logs and status messages.
    #[must_use]
    pub const fn operation(&self) -> &'static str {
        match self {
            Self::FetchNotes { .. } => "fetch notes",
            Self::CreateNote { .. } => "create note",
            Self::DeleteNote { .. } => "delete note",
            Self::ArchiveNote { .. } => "archive note",
            Self::UnarchiveNote { .. } => "unarchive note",
        }
    }
}

/// Decoded outcome of an [`ApiRequest`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApiResponse {
    /// A collection was fetched.
    NotesFetched {
        collection: Collection,
        generation: u64,
        notes: Vec<Note>,
    },

    /// The service created a note from a draft.
    NoteCreated { note: Note },

    /// The note with `id` was deleted.
    NoteDeleted { id: NoteId },

    /// The note with `id` was archived; `note` is the service's updated copy.
    NoteArchived { id: NoteId, note: Note },

    /// The note with `id` was moved back to the active collection.
    NoteUnarchived { id: NoteId },

    /// The request failed, either at the transport or with a non-success status.
    Failed {
        request: ApiRequest,
        status: u16,
        message: String,
    },
}
