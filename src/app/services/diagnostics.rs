//! Diagnostics collaborator for parse and validation events
//!
//! The mapper and validator report every rejected line, fatal condition and
//! unreadable field through a [`Diagnostics`] implementation injected at
//! construction. [`TracingDiagnostics`] forwards events to `tracing`;
//! [`CollectingDiagnostics`] keeps them in memory for inspection.

use crate::Error;
use crate::app::schema::ConstraintKind;
use crate::config::ParsingMode;
use std::collections::BTreeSet;
use std::sync::{Mutex, PoisonError};
use tracing::{error, warn};

/// Sink for failure events raised while binding and validating records
///
/// Events are reported before the caller acts on them (abort or skip).
pub trait Diagnostics: Send + Sync {
    /// A line failed to bind
    fn line_rejected(&self, line_number: usize, line: &str, error: &Error, mode: ParsingMode);

    /// A condition that aborts the whole operation regardless of mode
    fn fatal(&self, error: &Error);

    /// A constraint could not read the field it applies to
    fn field_unreadable(&self, field: &str, kind: ConstraintKind, reason: &str);

    /// A record failed one or more constraints
    fn record_invalid(&self, index: usize, messages: &BTreeSet<String>);
}

/// Forwards events to the `tracing` subscriber
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn line_rejected(&self, line_number: usize, line: &str, error: &Error, mode: ParsingMode) {
        match mode {
            ParsingMode::Strict => {
                error!("Parsing failed at line {}: {} ({})", line_number, line, error)
            }
            ParsingMode::Lenient => {
                warn!("Skipping line {}: {} ({})", line_number, line, error)
            }
        }
    }

    fn fatal(&self, error: &Error) {
        error!("{}", error);
    }

    fn field_unreadable(&self, field: &str, kind: ConstraintKind, reason: &str) {
        warn!("Field '{}' is not accessible for {} check: {}", field, kind, reason);
    }

    fn record_invalid(&self, index: usize, messages: &BTreeSet<String>) {
        warn!(
            "Record {} failed validation with {} error(s)",
            index,
            messages.len()
        );
    }
}

/// A captured diagnostics event
#[derive(Debug, Clone, PartialEq)]
pub enum DiagnosticEvent {
    LineRejected {
        line_number: usize,
        line: String,
        message: String,
        mode: ParsingMode,
    },
    Fatal {
        message: String,
    },
    FieldUnreadable {
        field: String,
        kind: ConstraintKind,
        reason: String,
    },
    RecordInvalid {
        index: usize,
        messages: BTreeSet<String>,
    },
}

/// Keeps every event in memory, in arrival order
#[derive(Debug, Default)]
pub struct CollectingDiagnostics {
    events: Mutex<Vec<DiagnosticEvent>>,
}

impl CollectingDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the events captured so far
    pub fn events(&self) -> Vec<DiagnosticEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn len(&self) -> usize {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn push(&self, event: DiagnosticEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }
}

impl Diagnostics for CollectingDiagnostics {
    fn line_rejected(&self, line_number: usize, line: &str, error: &Error, mode: ParsingMode) {
        self.push(DiagnosticEvent::LineRejected {
            line_number,
            line: line.to_string(),
            message: error.to_string(),
            mode,
        });
    }

    fn fatal(&self, error: &Error) {
        self.push(DiagnosticEvent::Fatal {
            message: error.to_string(),
        });
    }

    fn field_unreadable(&self, field: &str, kind: ConstraintKind, reason: &str) {
        self.push(DiagnosticEvent::FieldUnreadable {
            field: field.to_string(),
            kind,
            reason: reason.to_string(),
        });
    }

    fn record_invalid(&self, index: usize, messages: &BTreeSet<String>) {
        self.push(DiagnosticEvent::RecordInvalid {
            index,
            messages: messages.clone(),
        });
    }
}
