//! Constraint strategies
//!
//! Each strategy is a read-only predicate over one field value that returns
//! the constraint's message when the check fails. [`check`] dispatches a
//! [`Constraint`] to its strategy by exhaustive match.

use regex::Regex;
use tracing::debug;

use crate::app::models::{FieldType, FieldValue};
use crate::app::schema::{Constraint, FieldBinding};

/// NotNull: fails iff the value is absent
///
/// Present-but-empty values (an empty string, zero) pass.
pub fn not_null(value: Option<&FieldValue>, message: &str) -> Option<String> {
    match value {
        Some(_) => None,
        None => Some(message.to_string()),
    }
}

/// Range: fails iff a numeric value lies outside `[min, max]`
///
/// Non-numeric fields and absent values pass. NaN is outside every interval.
pub fn range(
    value: Option<&FieldValue>,
    field_type: &FieldType,
    min: f64,
    max: f64,
    message: &str,
) -> Option<String> {
    if !field_type.is_numeric() {
        return None;
    }

    let number = value.and_then(FieldValue::as_f64)?;
    if number >= min && number <= max {
        None
    } else {
        Some(message.to_string())
    }
}

/// Regex: fails iff a present value does not fully match `matcher`
///
/// `matcher` must already be anchored; absent values pass.
pub fn regex(value: Option<&FieldValue>, matcher: &Regex, message: &str) -> Option<String> {
    let text = value?.to_string();
    if matcher.is_match(&text) {
        None
    } else {
        Some(message.to_string())
    }
}

/// Evaluate one constraint against a field value
pub fn check<T>(
    field: &FieldBinding<T>,
    constraint: &Constraint,
    value: Option<&FieldValue>,
) -> Option<String> {
    let failure = match constraint {
        Constraint::NotNull { message } => not_null(value, message),
        Constraint::Range { min, max, message } => {
            range(value, field.field_type(), *min, *max, message)
        }
        Constraint::Regex {
            matcher, message, ..
        } => regex(value, matcher, message),
    };

    if let Some(message) = &failure {
        debug!(
            "Field '{}' failed {} check: {}",
            field.name(),
            constraint.kind(),
            message
        );
    }

    failure
}

/// Outcome of a constraint whose field could not be read
///
/// NotNull treats the unreadable field as missing and reports a fallback
/// message; Range and Regex skip the check.
pub fn unreadable(field: &str, constraint: &Constraint) -> Option<String> {
    match constraint {
        Constraint::NotNull { .. } => Some(format!("field '{}' could not be read", field)),
        Constraint::Range { .. } | Constraint::Regex { .. } => None,
    }
}
