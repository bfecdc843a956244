//! Strict JSON request body decoding.
//!
//! # Responsibilities
//! - Collect a request body under a byte cap
//! - Decode exactly one JSON value into a typed destination
//! - Classify every decode failure into a fixed, client-safe message
//!
//! # Design Decisions
//! - Closed decoding: destination types are expected to carry
//!   `#[serde(deny_unknown_fields)]` so extra keys are rejected, not
//!   silently dropped
//! - Trailing content after the first value is an error; `{"a":1}{"b":2}`
//!   and `{"a":1} garbage` both fail the same way
//! - Messages expose only byte offsets and field names, which are safe to
//!   return to untrusted callers; everything else passes through the
//!   decoder's own wording
//! - A destination that cannot be deserialized at all is a programmer
//!   error in the original design and aborted the process; here the
//!   `T: DeserializeOwned` bound makes that state unrepresentable

use axum::body::Body;
use http_body_util::{BodyExt, LengthLimitError, Limited};
use serde::de::DeserializeOwned;
use serde_json::error::Category;
use thiserror::Error;

/// Default cap on request body size: 1 MiB.
pub const DEFAULT_MAX_BODY_BYTES: usize = 1_048_576;

/// A request body that could not be decoded.
///
/// The `Display` form of each variant is the exact message returned to
/// the HTTP client.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BodyError {
    /// Malformed JSON with a known position.
    #[error("body contains badly-formed JSON (at character {offset})")]
    Syntax { offset: usize },

    /// Input ended mid-value.
    #[error("body contains badly-formed JSON")]
    Truncated,

    /// A value's JSON type does not match the destination field.
    #[error("body contains incorrect JSON type for field \"{field}\"")]
    FieldType { field: String },

    /// A value's JSON type does not match, with no field attribution.
    #[error("body contains incorrect JSON type (at character {offset})")]
    ValueType { offset: usize },

    /// Zero-byte (or whitespace-only) input.
    #[error("body must not be empty")]
    Empty,

    /// A key with no counterpart in the destination schema.
    #[error("body contains unknown key \"{key}\"")]
    UnknownKey { key: String },

    /// The body exceeded the byte cap.
    #[error("body must not be larger than {limit} bytes")]
    TooLarge { limit: usize },

    /// More than one JSON value in the body.
    #[error("body must only contain a single JSON value")]
    MultipleValues,

    /// Anything the taxonomy does not cover; the decoder's message, verbatim.
    #[error("{0}")]
    Other(String),
}

/// Read and strictly decode a JSON body under the default 1 MiB cap.
pub async fn read_json<T: DeserializeOwned>(body: Body) -> Result<T, BodyError> {
    read_json_with_limit(body, DEFAULT_MAX_BODY_BYTES).await
}

/// Read and strictly decode a JSON body, failing once more than `limit`
/// bytes have been pulled from the stream.
pub async fn read_json_with_limit<T: DeserializeOwned>(
    body: Body,
    limit: usize,
) -> Result<T, BodyError> {
    match Limited::new(body, limit).collect().await {
        Ok(collected) => decode_json(&collected.to_bytes()),
        Err(err) if err.downcast_ref::<LengthLimitError>().is_some() => {
            Err(BodyError::TooLarge { limit })
        }
        Err(err) => Err(BodyError::Other(err.to_string())),
    }
}

/// Decode exactly one JSON value from `bytes` into `T`.
///
/// Anything beyond trailing whitespace after the first value fails with
/// [`BodyError::MultipleValues`].
pub fn decode_json<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, BodyError> {
    let mut de = serde_json::Deserializer::from_slice(bytes);
    let mut track = serde_path_to_error::Track::new();

    let result = T::deserialize(serde_path_to_error::Deserializer::new(&mut de, &mut track));
    let value = match result {
        Ok(value) => value,
        Err(err) => return Err(classify(err, &track.path().to_string(), bytes)),
    };

    if de.end().is_err() {
        return Err(BodyError::MultipleValues);
    }
    Ok(value)
}

/// Map a raw decode failure onto the fixed taxonomy.
fn classify(err: serde_json::Error, path: &str, bytes: &[u8]) -> BodyError {
    match err.classify() {
        Category::Syntax => BodyError::Syntax {
            offset: char_offset(bytes, err.line(), err.column()),
        },
        Category::Eof => {
            if bytes.iter().all(u8::is_ascii_whitespace) {
                BodyError::Empty
            } else {
                BodyError::Truncated
            }
        }
        Category::Data => classify_data(err, path, bytes),
        Category::Io => BodyError::Other(err.to_string()),
    }
}

fn classify_data(err: serde_json::Error, path: &str, bytes: &[u8]) -> BodyError {
    let message = err.to_string();

    if let Some(rest) = message.strip_prefix("unknown field `") {
        if let Some(end) = rest.find('`') {
            return BodyError::UnknownKey {
                key: rest[..end].to_string(),
            };
        }
    }

    if message.starts_with("invalid type") || message.starts_with("invalid value") {
        // The tracked path is "." when the failure is not attributable to
        // a named field (e.g. the top-level value has the wrong shape).
        return match path {
            "" | "." => BodyError::ValueType {
                offset: char_offset(bytes, err.line(), err.column()),
            },
            field => BodyError::FieldType {
                field: field.to_string(),
            },
        };
    }

    BodyError::Other(message)
}

/// One-based character offset of a line/column position within `bytes`.
fn char_offset(bytes: &[u8], line: usize, column: usize) -> usize {
    if line <= 1 {
        return column;
    }
    let mut newlines = 0;
    for (index, byte) in bytes.iter().enumerate() {
        if *byte == b'\n' {
            newlines += 1;
            if newlines == line - 1 {
                return index + 1 + column;
            }
        }
    }
    column
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    #[serde(deny_unknown_fields)]
    struct Input {
        data: String,
    }

    #[derive(Debug, Deserialize)]
    #[serde(deny_unknown_fields)]
    struct Paged {
        #[serde(default)]
        count: i64,
        #[serde(default)]
        data: String,
    }

    #[test]
    fn test_decode_well_formed_body() {
        let input: Input = decode_json(br#"{"data": "some value"}"#).unwrap();
        assert_eq!(input.data, "some value");
    }

    #[test]
    fn test_decode_tolerates_surrounding_whitespace() {
        let input: Input = decode_json(b"  {\"data\": \"x\"}\n  ").unwrap();
        assert_eq!(input.data, "x");
    }

    #[test]
    fn test_empty_body() {
        let err = decode_json::<Input>(b"").unwrap_err();
        assert_eq!(err, BodyError::Empty);
        assert_eq!(err.to_string(), "body must not be empty");
    }

    #[test]
    fn test_whitespace_only_body_is_empty() {
        let err = decode_json::<Input>(b"   \n\t ").unwrap_err();
        assert_eq!(err, BodyError::Empty);
    }

    #[test]
    fn test_truncated_body() {
        let err = decode_json::<Input>(br#"{"data": "some value"#).unwrap_err();
        assert_eq!(err, BodyError::Truncated);
        assert_eq!(err.to_string(), "body contains badly-formed JSON");
    }

    #[test]
    fn test_badly_formed_body_reports_offset() {
        let err = decode_json::<Input>(br#"{"data": }"#).unwrap_err();
        assert_eq!(
            err.to_string(),
            "body contains badly-formed JSON (at character 10)"
        );
    }

    #[test]
    fn test_offset_spans_lines() {
        let err = decode_json::<Input>(b"{\n\"data\": }").unwrap_err();
        // Newline plus nine characters on the second line.
        assert_eq!(
            err.to_string(),
            "body contains badly-formed JSON (at character 11)"
        );
    }

    #[test]
    fn test_unknown_key() {
        let err = decode_json::<Input>(br#"{"oddKey": "oddValue"}"#).unwrap_err();
        assert_eq!(
            err,
            BodyError::UnknownKey {
                key: "oddKey".to_string()
            }
        );
        assert_eq!(err.to_string(), "body contains unknown key \"oddKey\"");
    }

    #[test]
    fn test_incorrect_type_names_field() {
        let err = decode_json::<Input>(br#"{"data": 123}"#).unwrap_err();
        assert_eq!(
            err.to_string(),
            "body contains incorrect JSON type for field \"data\""
        );

        let err = decode_json::<Paged>(br#"{"count": "nope"}"#).unwrap_err();
        assert_eq!(
            err.to_string(),
            "body contains incorrect JSON type for field \"count\""
        );
    }

    #[test]
    fn test_incorrect_type_without_field_reports_offset() {
        let err = decode_json::<Input>(br#"["not an object"]"#).unwrap_err();
        assert!(matches!(err, BodyError::ValueType { .. }), "got {err:?}");
        assert!(err
            .to_string()
            .starts_with("body contains incorrect JSON type (at character"));
    }

    #[test]
    fn test_multiple_json_values() {
        let err = decode_json::<Input>(br#"{"data":"a"}{"data":"b"}"#).unwrap_err();
        assert_eq!(err, BodyError::MultipleValues);
        assert_eq!(
            err.to_string(),
            "body must only contain a single JSON value"
        );
    }

    #[test]
    fn test_trailing_garbage_after_value() {
        let err = decode_json::<Input>(br#"{"data":"a"} trailing"#).unwrap_err();
        assert_eq!(err, BodyError::MultipleValues);
    }

    #[tokio::test]
    async fn test_read_json_happy_path() {
        let body = Body::from(r#"{"data": "streamed"}"#);
        let input: Input = read_json(body).await.unwrap();
        assert_eq!(input.data, "streamed");
    }

    #[tokio::test]
    async fn test_read_json_enforces_limit() {
        let body = Body::from(r#"{"data": "a value that is definitely too long"}"#);
        let err = read_json_with_limit::<Input>(body, 16).await.unwrap_err();
        assert_eq!(err, BodyError::TooLarge { limit: 16 });
        assert_eq!(
            err.to_string(),
            "body must not be larger than 16 bytes"
        );
    }

    #[tokio::test]
    async fn test_read_json_default_limit_message() {
        let oversized = format!(r#"{{"data": "{}"}}"#, "x".repeat(DEFAULT_MAX_BODY_BYTES));
        let err = read_json::<Input>(Body::from(oversized)).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "body must not be larger than 1048576 bytes"
        );
    }
}
