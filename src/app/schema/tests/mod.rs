//! Shared record fixtures for schema, mapper and validation tests
//!
//! The fixtures mirror the record layouts used throughout the test suite:
//! a comma-separated person record with one constraint of each kind, a
//! pipe-separated transaction record and a semicolon-separated audit record.

use chrono::NaiveDate;
use std::io::Write;
use tempfile::NamedTempFile;

use crate::app::schema::{FieldSet, FileSource, Record};


pub const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

/// Person record with NotNull, Regex and Range constraints
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MockRecord {
    pub name: Option<String>,
    pub email: Option<String>,
    pub age: i32,
}

impl Record for MockRecord {
    fn file_source() -> Option<FileSource> {
        Some(FileSource::new(","))
    }

    fn describe(fields: &mut FieldSet<Self>) {
        fields
            .column(0, "name", |r| &r.name, |r| &mut r.name)
            .not_null("name is required");
        fields
            .column(1, "email", |r| &r.email, |r| &mut r.email)
            .regex(EMAIL_PATTERN, "invalid email");
        fields
            .column(2, "age", |r| &r.age, |r| &mut r.age)
            .range(18.0, 50.0, "Out of range....");
    }
}

/// Pipe-separated transaction with a lower-bounded amount and a date
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Transaction {
    pub transaction_id: Option<String>,
    pub amount: f64,
    pub timestamp: Option<NaiveDate>,
}

impl Record for Transaction {
    fn file_source() -> Option<FileSource> {
        Some(FileSource::new("|").with_comment_prefixes(["#", "//"]))
    }

    fn describe(fields: &mut FieldSet<Self>) {
        fields
            .column(0, "transaction_id", |t| &t.transaction_id, |t| &mut t.transaction_id)
            .not_null("transaction id is required");
        fields
            .column(1, "amount", |t| &t.amount, |t| &mut t.amount)
            .min(0.0, "amount must not be negative");
        fields
            .column(2, "timestamp", |t| &t.timestamp, |t| &mut t.timestamp)
            .not_null("timestamp is required");
    }
}

/// Semicolon-separated audit entry with an optional boolean column
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Audit {
    pub ip_address: Option<String>,
    pub severity_level: i32,
    pub escalated: Option<bool>,
}

impl Record for Audit {
    fn file_source() -> Option<FileSource> {
        Some(FileSource::new(";"))
    }

    fn describe(fields: &mut FieldSet<Self>) {
        fields
            .column(0, "ip_address", |a| &a.ip_address, |a| &mut a.ip_address)
            .not_null("ip address is required");
        fields.column(1, "severity_level", |a| &a.severity_level, |a| &mut a.severity_level);
        fields.column(2, "escalated", |a| &a.escalated, |a| &mut a.escalated);
    }
}

/// Record type that never declared a file source
#[derive(Debug, Default)]
pub struct NoFileSource {
    pub label: Option<String>,
}

impl Record for NoFileSource {
    fn describe(fields: &mut FieldSet<Self>) {
        fields
            .field("label", |r| &r.label)
            .not_null("label is required");
    }
}

/// Record whose delimiter contains pattern metacharacters
#[derive(Debug, Default, PartialEq)]
pub struct DottedPair {
    pub left: Option<String>,
    pub right: Option<String>,
}

impl Record for DottedPair {
    fn file_source() -> Option<FileSource> {
        Some(FileSource::new(".*"))
    }

    fn describe(fields: &mut FieldSet<Self>) {
        fields.column(0, "left", |r| &r.left, |r| &mut r.left);
        fields.column(1, "right", |r| &r.right, |r| &mut r.right);
    }
}

/// Tab-separated record of optional text columns
#[derive(Debug, Default, PartialEq)]
pub struct TabSeparated {
    pub a: Option<String>,
    pub b: Option<String>,
    pub c: Option<String>,
}

impl Record for TabSeparated {
    fn file_source() -> Option<FileSource> {
        Some(FileSource::new("\t"))
    }

    fn describe(fields: &mut FieldSet<Self>) {
        fields.column(0, "a", |r| &r.a, |r| &mut r.a);
        fields.column(1, "b", |r| &r.b, |r| &mut r.b);
        fields.column(2, "c", |r| &r.c, |r| &mut r.c);
    }
}

/// Helper to create a temporary file with given content
pub fn create_temp_file(content: &str) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    write!(temp_file, "{}", content).unwrap();
    temp_file.flush().unwrap();
    temp_file
}
