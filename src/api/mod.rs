//! Notes service API plumbing.
//!
//! The plugin never blocks on the network. The controller emits
//! [`ApiRequest`]s as actions, the plugin shim turns them into Zellij web
//! requests, and results come back as [`ApiResponse`]s wrapped in events.
//!
//! # Architecture
//!
//! - `messages`: Request/response types with trace context propagation
//! - `http`: Endpoint mapping, request context encoding and response decoding

pub mod http;
pub mod messages;

pub use http::{decode_response, request_context, request_from_context, HttpMethod, HttpRequest};
pub use messages::{ApiRequest, ApiResponse, TraceContext};
