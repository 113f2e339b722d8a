//! Declarative per-field constraints
//!
//! Constraints form a closed set: adding a kind means adding a variant here
//! and an arm in the validation dispatch, which the compiler enforces.

use crate::constants::RANGE_DEFAULT_MAX;
use regex::Regex;
use std::fmt;

/// Discriminant of a [`Constraint`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ConstraintKind {
    NotNull,
    Range,
    Regex,
}

impl fmt::Display for ConstraintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstraintKind::NotNull => f.write_str("not_null"),
            ConstraintKind::Range => f.write_str("range"),
            ConstraintKind::Regex => f.write_str("regex"),
        }
    }
}

/// A validation rule attached to one field, carrying its failure message
#[derive(Debug, Clone)]
pub enum Constraint {
    /// Field must hold a value
    NotNull { message: String },
    /// Numeric field must lie within the inclusive interval
    Range { min: f64, max: f64, message: String },
    /// Field rendered as text must fully match the pattern
    Regex {
        pattern: String,
        matcher: Regex,
        message: String,
    },
}

impl Constraint {
    pub fn not_null(message: impl Into<String>) -> Self {
        Constraint::NotNull {
            message: message.into(),
        }
    }

    pub fn range(min: f64, max: f64, message: impl Into<String>) -> Self {
        Constraint::Range {
            min,
            max,
            message: message.into(),
        }
    }

    /// Range with no explicit upper bound
    pub fn min(min: f64, message: impl Into<String>) -> Self {
        Self::range(min, RANGE_DEFAULT_MAX, message)
    }

    /// Compile a full-match pattern constraint
    pub fn regex(
        pattern: impl Into<String>,
        message: impl Into<String>,
    ) -> std::result::Result<Self, regex::Error> {
        let pattern = pattern.into();
        let matcher = Regex::new(&format!("^(?:{})$", pattern))?;
        Ok(Constraint::Regex {
            pattern,
            matcher,
            message: message.into(),
        })
    }

    pub fn kind(&self) -> ConstraintKind {
        match self {
            Constraint::NotNull { .. } => ConstraintKind::NotNull,
            Constraint::Range { .. } => ConstraintKind::Range,
            Constraint::Regex { .. } => ConstraintKind::Regex,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Constraint::NotNull { message }
            | Constraint::Range { message, .. }
            | Constraint::Regex { message, .. } => message,
        }
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Constraint::NotNull { .. } => write!(f, "not_null"),
            Constraint::Range { min, max, .. } => write!(f, "range [{}, {}]", min, max),
            Constraint::Regex { pattern, .. } => write!(f, "regex /{}/", pattern),
        }
    }
}
