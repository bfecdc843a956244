//! Error-response catalog.
//!
//! # Responsibilities
//! - Translate domain and caller-input failures into terminal JSON
//!   responses with a fixed status and message
//! - Keep internal diagnostics out of client-visible bodies (decode
//!   offsets and field names are the deliberate exception)
//!
//! # Design Decisions
//! - Every entry is a pure function delegating to `response::write_json`
//!   with an `error` envelope; none retries or recovers
//! - Only the server-error entry logs; everything else is expected
//!   traffic and is left to request-level tracing
//! - Whether the 500 body names its cause is a configuration bit
//!   (`ErrorOptions`), defaulting to naming it

use std::collections::HashMap;
use std::fmt::Display;

use axum::http::header::{HeaderMap, HeaderValue, WWW_AUTHENTICATE};
use axum::http::{Method, StatusCode};
use axum::response::Response;
use tracing::error;

use crate::response::{write_json, Envelope, ErrorPayload};

/// Behavior knobs for the catalog.
#[derive(Debug, Clone, Copy)]
pub struct ErrorOptions {
    /// Append the underlying cause to the 500 response body.
    pub include_cause_in_message: bool,
}

impl Default for ErrorOptions {
    fn default() -> Self {
        Self {
            include_cause_in_message: true,
        }
    }
}

/// Generic error response: caller-supplied status and payload.
pub fn error_response(status: StatusCode, payload: impl Into<ErrorPayload>) -> Response {
    write_json(status, &Envelope::error(payload), HeaderMap::new())
}

/// 500 Internal Server Error. Logs the cause; the body names it only when
/// `opts.include_cause_in_message` is set.
pub fn server_error_response(opts: &ErrorOptions, cause: impl Display) -> Response {
    error!(cause = %cause, "request failed with an internal error");

    let message = if opts.include_cause_in_message {
        format!(
            "The server encountered a problem and could not process your request: {cause}"
        )
    } else {
        "The server encountered a problem and could not process your request".to_string()
    };
    error_response(StatusCode::INTERNAL_SERVER_ERROR, message)
}

/// 404 Not Found.
pub fn not_found_response() -> Response {
    error_response(
        StatusCode::NOT_FOUND,
        "The requested resource could not be found",
    )
}

/// 405 Method Not Allowed, naming the rejected method.
pub fn method_not_allowed_response(method: &Method) -> Response {
    error_response(
        StatusCode::METHOD_NOT_ALLOWED,
        format!("The {method} method is not supported for this resource"),
    )
}

/// 400 Bad Request with the underlying error's message, verbatim.
pub fn bad_request_response(err: impl Display) -> Response {
    error_response(StatusCode::BAD_REQUEST, err.to_string())
}

/// 422 Unprocessable Entity carrying the validator's field→message map.
pub fn failed_validation_response(errors: HashMap<String, String>) -> Response {
    error_response(StatusCode::UNPROCESSABLE_ENTITY, errors)
}

/// 409 Conflict for lost-update races.
pub fn edit_conflict_response() -> Response {
    error_response(
        StatusCode::CONFLICT,
        "Unable to update the record, please try again",
    )
}

/// 429 Too Many Requests.
pub fn rate_limit_exceeded_response() -> Response {
    error_response(StatusCode::TOO_MANY_REQUESTS, "Rate limit exceeded")
}

/// 401 Unauthorized for bad credentials.
pub fn invalid_credentials_response() -> Response {
    error_response(
        StatusCode::UNAUTHORIZED,
        "Invalid authentication credentials",
    )
}

/// 401 Unauthorized for a bad or absent bearer token. Advertises the
/// expected scheme via `WWW-Authenticate`.
pub fn invalid_authentication_token_response() -> Response {
    let mut headers = HeaderMap::new();
    headers.insert(WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
    write_json(
        StatusCode::UNAUTHORIZED,
        &Envelope::error("Invalid or missing authentication token"),
        headers,
    )
}

/// 401 Unauthorized for anonymous access to a protected resource.
pub fn authentication_required_response() -> Response {
    error_response(
        StatusCode::UNAUTHORIZED,
        "You must be authenticated to access this resource",
    )
}

/// 403 Forbidden for unactivated accounts.
pub fn inactive_account_response() -> Response {
    error_response(
        StatusCode::FORBIDDEN,
        "Your user account must be activated to access this resource",
    )
}
