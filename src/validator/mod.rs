//! Request field validation.
//!
//! # Responsibilities
//! - Accumulate named validation failures during one validation pass
//! - Report whether all checks passed
//! - Provide common check helpers (membership, regex, uniqueness)
//!
//! # Design Decisions
//! - First failure per field wins; later failures for the same key are ignored
//! - One `Validator` per request; instances are never shared across tasks
//! - The collected map is handed to `errors::failed_validation_response` as-is

use std::collections::{HashMap, HashSet};
use std::hash::Hash;
use std::sync::LazyLock;

use regex::Regex;

/// HTML5 email address pattern.
pub static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        "^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
    )
    .expect("email pattern is a valid regex")
});

/// Accumulates named validation failures for a single request.
#[derive(Debug, Default)]
pub struct Validator {
    /// Field name → first recorded failure message.
    pub errors: HashMap<String, String>,
}

impl Validator {
    /// Create an empty validator.
    pub fn new() -> Self {
        Self::default()
    }

    /// True iff no failures have been recorded.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Record `message` under `key` unless the key already has a message.
    pub fn add_error(&mut self, key: impl Into<String>, message: impl Into<String>) {
        self.errors.entry(key.into()).or_insert_with(|| message.into());
    }

    /// Record a failure under `key` when `ok` is false.
    pub fn check(&mut self, ok: bool, key: impl Into<String>, message: impl Into<String>) {
        if !ok {
            self.add_error(key, message);
        }
    }

    /// Consume the validator, yielding the collected failure map.
    pub fn into_errors(self) -> HashMap<String, String> {
        self.errors
    }
}

/// True iff `value` appears in `permitted`.
pub fn permitted_value<T: PartialEq>(value: &T, permitted: &[T]) -> bool {
    permitted.contains(value)
}

/// True iff `value` matches the pattern.
pub fn matches(value: &str, pattern: &Regex) -> bool {
    pattern.is_match(value)
}

/// True iff every element of `values` is distinct.
pub fn unique<T: Eq + Hash>(values: &[T]) -> bool {
    let mut seen = HashSet::with_capacity(values.len());
    values.iter().all(|value| seen.insert(value))
}
