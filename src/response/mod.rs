//! Response envelope construction and serialization.
//!
//! # Responsibilities
//! - Wrap payloads under a single top-level key (`data` or `error`)
//! - Serialize an envelope to a JSON body with status and headers
//!
//! # Design Decisions
//! - Exactly one top-level key per body, so key ordering never matters
//! - `Content-Type` is set after caller headers and cannot be overridden
//! - Serialization is best-effort: the envelope only admits payload types
//!   that serialize infallibly, and a failure degrades to an empty object
//!   rather than surfacing to the handler (the client connection may
//!   already be gone by the time the body is written)

use std::collections::HashMap;

use axum::body::Body;
use axum::http::header::{HeaderMap, CONTENT_TYPE};
use axum::http::{HeaderValue, StatusCode};
use axum::response::Response;
use serde::Serialize;
use serde_json::Value;

/// Wire payload wrapper distinguishing success from error bodies.
///
/// Serializes to a JSON object with exactly one top-level key:
/// `{"data": …}` or `{"error": …}`.
#[derive(Debug, Clone, Serialize)]
pub enum Envelope {
    #[serde(rename = "data")]
    Data(Value),
    #[serde(rename = "error")]
    Error(ErrorPayload),
}

impl Envelope {
    /// Wrap a success payload.
    pub fn data(value: Value) -> Self {
        Envelope::Data(value)
    }

    /// Wrap an error payload.
    pub fn error(payload: impl Into<ErrorPayload>) -> Self {
        Envelope::Error(payload.into())
    }
}

/// Payload carried under the `error` key.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ErrorPayload {
    /// Human-readable message.
    Message(String),
    /// Field name → failure message, from a [`crate::validator::Validator`].
    Fields(HashMap<String, String>),
    /// Arbitrary structured payload.
    Value(Value),
}

impl From<&str> for ErrorPayload {
    fn from(message: &str) -> Self {
        ErrorPayload::Message(message.to_string())
    }
}

impl From<String> for ErrorPayload {
    fn from(message: String) -> Self {
        ErrorPayload::Message(message)
    }
}

impl From<HashMap<String, String>> for ErrorPayload {
    fn from(fields: HashMap<String, String>) -> Self {
        ErrorPayload::Fields(fields)
    }
}

impl From<Value> for ErrorPayload {
    fn from(value: Value) -> Self {
        ErrorPayload::Value(value)
    }
}

/// Serialize `envelope` into a JSON response.
///
/// The body is the compact JSON encoding of the envelope followed by a
/// single newline. Caller-supplied headers are applied first;
/// `Content-Type: application/json` is always set afterwards.
pub fn write_json(status: StatusCode, envelope: &Envelope, headers: HeaderMap) -> Response {
    let mut body = serde_json::to_vec(envelope).unwrap_or_else(|_| b"{}".to_vec());
    body.push(b'\n');

    let mut response = Response::new(Body::from(body));
    *response.status_mut() = status;
    for (key, value) in headers.iter() {
        response.headers_mut().append(key, value.clone());
    }
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    response
}
