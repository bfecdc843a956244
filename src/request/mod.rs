//! Request-side helpers.
//!
//! # Data Flow
//! ```text
//! Incoming request
//!     → body.rs (size-capped strict JSON decode, failure taxonomy)
//!     → params.rs (query-string and path-parameter readers)
//!     → handler logic (validator, response envelope)
//! ```

pub mod body;
pub mod params;

pub use body::{decode_json, read_json, read_json_with_limit, BodyError, DEFAULT_MAX_BODY_BYTES};
pub use params::{parse_id_param, read_csv, read_int, read_string, InvalidIdParam};
