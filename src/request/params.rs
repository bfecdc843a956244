//! Query-string and path-parameter readers.
//!
//! # Responsibilities
//! - Read optional query parameters with defaults
//! - Record malformed numeric parameters on the caller's validator
//! - Parse positive integer path identifiers
//!
//! # Design Decisions
//! - Readers never fail; a missing or malformed value yields the default
//!   (malformed integers additionally mark the validator)
//! - Operates on the flat map produced by axum's `Query` extractor

use std::collections::HashMap;

use thiserror::Error;

use crate::validator::Validator;

/// Returned when a path identifier is missing, non-numeric, or below 1.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid ID parameter")]
pub struct InvalidIdParam;

/// Read a string parameter, falling back to `default` when absent or empty.
pub fn read_string(qs: &HashMap<String, String>, key: &str, default: &str) -> String {
    match qs.get(key) {
        Some(value) if !value.is_empty() => value.clone(),
        _ => default.to_string(),
    }
}

/// Read a comma-separated parameter as a list, falling back to `default`.
pub fn read_csv(qs: &HashMap<String, String>, key: &str, default: Vec<String>) -> Vec<String> {
    match qs.get(key) {
        Some(value) if !value.is_empty() => value.split(',').map(str::to_string).collect(),
        _ => default,
    }
}

/// Read an integer parameter, falling back to `default` when absent.
///
/// A present but non-numeric value records `must be an integer value`
/// under `key` on the validator and yields the default.
pub fn read_int(qs: &HashMap<String, String>, key: &str, default: i64, v: &mut Validator) -> i64 {
    match qs.get(key) {
        Some(value) if !value.is_empty() => match value.parse() {
            Ok(parsed) => parsed,
            Err(_) => {
                v.add_error(key, "must be an integer value");
                default
            }
        },
        _ => default,
    }
}

/// Parse a path identifier: a base-10 integer no smaller than 1.
pub fn parse_id_param(raw: &str) -> Result<i64, InvalidIdParam> {
    match raw.parse::<i64>() {
        Ok(id) if id >= 1 => Ok(id),
        _ => Err(InvalidIdParam),
    }
}
