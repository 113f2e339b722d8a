//! Test utilities for validation testing

use std::sync::Arc;

pub use crate::app::schema::tests::{EMAIL_PATTERN, MockRecord, Transaction};
use crate::app::models::{FieldType, FieldValue};
use crate::app::schema::{FieldSet, Record};
use crate::app::services::diagnostics::CollectingDiagnostics;
use crate::app::services::validation::Validator;

mod validator_tests;

/// Validator wired to an in-memory diagnostics sink
pub fn create_observed_validator() -> (Validator, Arc<CollectingDiagnostics>) {
    let diagnostics = Arc::new(CollectingDiagnostics::new());
    let validator = Validator::new().with_diagnostics(diagnostics.clone());
    (validator, diagnostics)
}

/// Person record from its field values
pub fn person(name: Option<&str>, email: Option<&str>, age: i32) -> MockRecord {
    MockRecord {
        name: name.map(str::to_string),
        email: email.map(str::to_string),
        age,
    }
}

/// Record whose `secret` field can only be read while unlocked
#[derive(Debug, Default)]
pub struct Sealed {
    pub locked: bool,
    pub secret: Option<String>,
    pub level: i64,
}

impl Record for Sealed {
    fn describe(fields: &mut FieldSet<Self>) {
        fields
            .computed("secret", FieldType::Text, |s: &Sealed| {
                if s.locked {
                    Err("field is sealed".to_string())
                } else {
                    Ok(s.secret.clone().map(FieldValue::Text))
                }
            })
            .not_null("secret is required")
            .regex("[a-z]+", "secret must be lower-case letters");
        fields
            .computed("level", FieldType::Integer, |s: &Sealed| {
                if s.locked {
                    Err("field is sealed".to_string())
                } else {
                    Ok(Some(FieldValue::Integer(s.level)))
                }
            })
            .range(1.0, 5.0, "level out of range");
    }
}

/// Two constraints that share one message
#[derive(Debug, Default)]
pub struct SameMessage {
    pub code: Option<String>,
    pub score: f64,
}

impl Record for SameMessage {
    fn describe(fields: &mut FieldSet<Self>) {
        fields
            .field("code", |r| &r.code)
            .not_null("record is incomplete");
        fields
            .field("score", |r| &r.score)
            .range(0.0, 1.0, "record is incomplete");
    }
}
