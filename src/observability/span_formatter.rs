//! OTLP JSON span formatter.
//!
//! Each exported batch becomes one OTLP/JSON `resourceSpans` document, the
//! same shape an OTLP collector's file exporter produces.

use opentelemetry::trace::{Event, Link, SpanId, SpanKind, Status};
use opentelemetry::{KeyValue, Value};
use opentelemetry_sdk::export::trace::SpanData;
use opentelemetry_sdk::resource::Resource;
use serde_json::{json, Value as JsonValue};
use std::time::{Duration, SystemTime};

pub struct SpanFormatter {
    resource: Resource,
    scope: &'static str,
}

impl SpanFormatter {
    pub const fn new(resource: Resource, scope: &'static str) -> Self {
        Self { resource, scope }
    }

    /// Formats `batch` as a single OTLP JSON document.
    ///
    /// ```json
    /// {"resourceSpans": [{
    ///   "resource": {"attributes": [...]},
    ///   "scopeSpans": [{"scope": {"name": "notepane"}, "spans": [...]}]
    /// }]}
    /// ```
    pub fn format_batch(&self, batch: &[SpanData]) -> JsonValue {
        let resource_attrs: Vec<JsonValue> = self
            .resource
            .iter()
            .map(|(k, v)| json!({ "key": k.to_string(), "value": Self::format_value(v) }))
            .collect();

        let spans: Vec<JsonValue> = batch.iter().map(Self::format_span).collect();

        json!({
            "resourceSpans": [{
                "resource": { "attributes": resource_attrs },
                "scopeSpans": [{
                    "scope": { "name": self.scope },
                    "spans": spans
                }]
            }]
        })
    }

    fn format_span(span: &SpanData) -> JsonValue {
        let (status_code, status_message) = Self::format_status(&span.status);
        let parent = if span.parent_span_id == SpanId::INVALID {
            String::new()
        } else {
            format!("{:016x}", span.parent_span_id)
        };

        json!({
            "traceId": format!("{:032x}", span.span_context.trace_id()),
            "spanId": format!("{:016x}", span.span_context.span_id()),
            "parentSpanId": parent,
            "name": span.name,
            "kind": Self::kind_code(&span.span_kind),
            "startTimeUnixNano": unix_nanos(span.start_time),
            "endTimeUnixNano": unix_nanos(span.end_time),
            "attributes": Self::format_attributes(&span.attributes),
            "events": Self::format_events(&span.events),
            "links": Self::format_links(&span.links),
            "status": { "code": status_code, "message": status_message },
        })
    }

    const fn kind_code(kind: &SpanKind) -> u8 {
        match kind {
            SpanKind::Internal => 1,
            SpanKind::Server => 2,
            SpanKind::Client => 3,
            SpanKind::Producer => 4,
            SpanKind::Consumer => 5,
        }
    }

    fn format_attributes(attributes: &[KeyValue]) -> Vec<JsonValue> {
        attributes
            .iter()
            .map(|kv| json!({ "key": kv.key.to_string(), "value": Self::format_value(&kv.value) }))
            .collect()
    }

    /// OTLP encodes 64-bit integers as strings; arrays fall back to their debug form.
    fn format_value(value: &Value) -> JsonValue {
        match value {
            Value::Bool(b) => json!({ "boolValue": b }),
            Value::I64(i) => json!({ "intValue": i.to_string() }),
            Value::F64(f) => json!({ "doubleValue": f }),
            Value::String(s) => json!({ "stringValue": s.to_string() }),
            Value::Array(_) => json!({ "stringValue": format!("{value:?}") }),
        }
    }

    fn format_events(events: &[Event]) -> Vec<JsonValue> {
        events
            .iter()
            .map(|event| {
                json!({
                    "timeUnixNano": unix_nanos(event.timestamp),
                    "name": event.name,
                    "attributes": Self::format_attributes(&event.attributes),
                })
            })
            .collect()
    }

    fn format_links(links: &[Link]) -> Vec<JsonValue> {
        links
            .iter()
            .map(|link| {
                json!({
                    "traceId": format!("{:032x}", link.span_context.trace_id()),
                    "spanId": format!("{:016x}", link.span_context.span_id()),
                    "attributes": Self::format_attributes(&link.attributes),
                })
            })
            .collect()
    }

    fn format_status(status: &Status) -> (u8, String) {
        match status {
            Status::Unset => (0, String::new()),
            Status::Ok => (1, String::new()),
            Status::Error { description } => (2, description.to_string()),
        }
    }
}

fn unix_nanos(at: SystemTime) -> String {
    at.duration_since(SystemTime::UNIX_EPOCH)
        .unwrap_or(Duration::ZERO)
        .as_nanos()
        .to_string()
}

impl std::fmt::Debug for SpanFormatter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpanFormatter")
            .field("scope", &self.scope)
            .finish_non_exhaustive()
    }
}
