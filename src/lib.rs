//! HTTP helper toolkit for JSON APIs built on axum.
//!
//! Building blocks shared by JSON API services: a strict request-body
//! reader with a fixed failure taxonomy, a single-key response envelope,
//! a catalog of standard error responses, a field validator, query
//! parameter readers, random identifiers, and background-task tracking.

// Request/response helpers
pub mod errors;
pub mod request;
pub mod response;
pub mod validator;

// Supporting utilities
pub mod id;
pub mod task;

// Cross-cutting concerns
pub mod config;
pub mod observability;

pub use config::ApiConfig;
pub use errors::ErrorOptions;
pub use request::{read_json, read_json_with_limit, BodyError, DEFAULT_MAX_BODY_BYTES};
pub use response::{write_json, Envelope, ErrorPayload};
pub use validator::Validator;
