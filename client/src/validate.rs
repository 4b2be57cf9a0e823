//! Aggregated request validation.
//!
//! # Design
//! Validation never stops at the first problem: every violated field is
//! collected into a [`Violations`] value keyed by the field's wire name.
//! The backing `BTreeMap` keeps fields in lexicographic order, so the same
//! invalid input always produces the same combined message. Per field, the
//! first violated rule wins (a missing value is not additionally reported
//! as too short). Nested structures validate on their own and are folded
//! into the parent under the nested field's name.

use std::collections::BTreeMap;

use crate::error::Error;

/// Collected field violations for one request value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Violations {
    fields: BTreeMap<String, String>,
}

impl Violations {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Record a violation for `field`. An earlier violation for the same
    /// field wins.
    pub(crate) fn note(&mut self, field: &str, message: impl Into<String>) {
        self.fields
            .entry(field.to_string())
            .or_insert_with(|| message.into());
    }

    /// Fold a nested structure's violations into this one under `field`.
    pub(crate) fn fold(&mut self, field: &str, nested: Violations) {
        if !nested.is_empty() {
            self.note(field, nested.message());
        }
    }

    /// The combined human-readable message, one entry per field in field
    /// name order.
    pub(crate) fn message(&self) -> String {
        self.fields
            .values()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join("; ")
    }

    pub(crate) fn into_result(self) -> Result<(), Error> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(Error::Validation(self.message()))
        }
    }
}

/// `value` must be non-empty.
pub(crate) fn required(v: &mut Violations, field: &str, what: &str, value: &str) {
    if value.is_empty() {
        v.note(field, format!("{what} must not be empty"));
    }
}

/// Character count of `value` must lie in `min..=max`.
pub(crate) fn length(v: &mut Violations, field: &str, what: &str, value: &str, min: usize, max: usize) {
    let count = value.chars().count();
    if count < min || count > max {
        v.note(field, format!("{what} length must be between {min} and {max}"));
    }
}

/// Length rule applied only when the optional field is present. A present
/// empty string counts as present and fails the minimum bound.
pub(crate) fn length_if_present(
    v: &mut Violations,
    field: &str,
    what: &str,
    value: Option<&str>,
    min: usize,
    max: usize,
) {
    if let Some(value) = value {
        length(v, field, what, value, min, max);
    }
}

/// `value` must be non-zero and lie in `min..=max`.
pub(crate) fn bounded_f64(v: &mut Violations, field: &str, what: &str, value: f64, min: f64, max: f64) {
    if value == 0.0 {
        v.note(field, format!("{what} must not be empty"));
    } else if value < min {
        v.note(field, format!("{what} must not be less than {min}"));
    } else if value > max {
        v.note(field, format!("{what} must not be greater than {max}"));
    }
}

/// `value` must be non-zero and lie in `min..=max`.
pub(crate) fn bounded_i64(v: &mut Violations, field: &str, what: &str, value: i64, min: i64, max: i64) {
    if value == 0 {
        v.note(field, format!("{what} must not be empty"));
    } else if value < min {
        v.note(field, format!("{what} must not be less than {min}"));
    } else if value > max {
        v.note(field, format!("{what} must not be greater than {max}"));
    }
}
