//! Tests for record validation and reporting

use super::{
    SameMessage, Sealed, Transaction, create_observed_validator, person,
};
use crate::app::schema::{ConstraintKind, SchemaDocument};
use crate::app::services::diagnostics::DiagnosticEvent;
use crate::app::services::record_mapper::RecordMapper;
use crate::app::services::validation::Validator;
use crate::config::ParsingMode;
use chrono::NaiveDate;
use std::io::Cursor;

#[test]
fn test_valid_record_produces_no_entry() {
    let records = vec![person(Some("Data"), Some("data@mail.com"), 25)];

    let report = Validator::new().validate(&records).unwrap();

    assert_eq!(report.checked, 1);
    assert!(report.is_empty());
    assert!(report.is_valid());
    assert_eq!(report.get(0), None);
}

#[test]
fn test_three_distinct_failures_for_one_record() {
    let records = vec![person(None, Some("Invalidddd"), 11)];

    let report = Validator::new().validate(&records).unwrap();

    let messages = report.get(0).unwrap();
    assert_eq!(messages.len(), 3);
    assert!(messages.contains("name is required"));
    assert!(messages.contains("invalid email"));
    assert!(messages.contains("Out of range...."));
}

#[test]
fn test_report_is_keyed_by_input_position() {
    let records = vec![
        person(Some("A"), Some("a@mail.com"), 30),
        person(Some("B"), Some("broken"), 30),
        person(Some("C"), Some("c@mail.com"), 30),
        person(Some("D"), Some("d@mail.com"), 51),
    ];

    let report = Validator::new().validate(&records).unwrap();

    assert_eq!(report.checked, 4);
    let indices: Vec<usize> = report.iter().map(|(index, _)| index).collect();
    assert_eq!(indices, vec![1, 3]);

    let names: Vec<_> = report
        .with_records(&records)
        .map(|(record, _)| record.name.as_deref().unwrap_or_default())
        .collect();
    assert_eq!(names, vec!["B", "D"]);
    assert_eq!(report.message_count(), 2);
}

#[test]
fn test_identical_records_are_reported_separately() {
    let bad = person(None, None, 30);
    let records = vec![bad.clone(), bad];

    let report = Validator::new().validate(&records).unwrap();

    assert_eq!(report.len(), 2);
}

#[test]
fn test_identical_messages_collapse() {
    let records = vec![SameMessage {
        code: None,
        score: 2.0,
    }];

    let report = Validator::new().validate(&records).unwrap();

    let messages = report.get(0).unwrap();
    assert_eq!(messages.len(), 1);
    assert!(messages.contains("record is incomplete"));
}

#[test]
fn test_validation_does_not_touch_records() {
    let records = vec![person(None, Some("nope"), 5)];
    let before = records.clone();

    let _ = Validator::new().validate(&records).unwrap();

    assert_eq!(records, before);
}

#[test]
fn test_unreadable_fields_do_not_abort_validation() {
    let records = vec![
        Sealed {
            locked: true,
            secret: Some("abc".to_string()),
            level: 99,
        },
        Sealed {
            locked: false,
            secret: Some("ABC".to_string()),
            level: 9,
        },
    ];
    let (validator, diagnostics) = create_observed_validator();

    let report = validator.validate(&records).unwrap();

    // Locked: only the NotNull fallback is reported
    let locked = report.get(0).unwrap();
    assert_eq!(locked.len(), 1);
    assert!(locked.contains("field 'secret' could not be read"));

    // Unlocked: regular checks run
    let unlocked = report.get(1).unwrap();
    assert!(unlocked.contains("secret must be lower-case letters"));
    assert!(unlocked.contains("level out of range"));

    let unreadable: Vec<ConstraintKind> = diagnostics
        .events()
        .into_iter()
        .filter_map(|event| match event {
            DiagnosticEvent::FieldUnreadable { kind, .. } => Some(kind),
            _ => None,
        })
        .collect();
    assert_eq!(
        unreadable,
        vec![ConstraintKind::NotNull, ConstraintKind::Regex, ConstraintKind::Range]
    );
}

#[test]
fn test_record_invalid_is_reported_per_failing_record() {
    let records = vec![
        person(Some("A"), Some("a@mail.com"), 30),
        person(None, Some("a@mail.com"), 30),
    ];
    let (validator, diagnostics) = create_observed_validator();

    validator.validate(&records).unwrap();

    match diagnostics.events().as_slice() {
        [DiagnosticEvent::RecordInvalid { index, messages }] => {
            assert_eq!(*index, 1);
            assert!(messages.contains("name is required"));
        }
        other => panic!("unexpected events: {other:?}"),
    }
}

#[test]
fn test_lower_bound_with_default_maximum() {
    let records = vec![
        Transaction {
            transaction_id: Some("TX-1".to_string()),
            amount: -0.5,
            timestamp: NaiveDate::from_ymd_opt(2024, 1, 1),
        },
        Transaction {
            transaction_id: Some("TX-2".to_string()),
            amount: 750_000.0,
            timestamp: None,
        },
    ];

    let report = Validator::new().validate(&records).unwrap();

    assert_eq!(
        report.get(0).unwrap().iter().collect::<Vec<_>>(),
        vec!["amount must not be negative"]
    );
    assert_eq!(
        report.get(1).unwrap().iter().collect::<Vec<_>>(),
        vec!["timestamp is required"]
    );
}

#[test]
fn test_parse_then_validate_end_to_end() {
    let mapper = RecordMapper::default();
    let validator = Validator::new().with_schema_cache(mapper.schema_cache());

    let result = mapper
        .parse_reader::<super::MockRecord, _>(
            Cursor::new("Data,data@mail.com,25\n,Invalidddd,11\n"),
            ParsingMode::Strict,
        )
        .unwrap();
    assert_eq!(result.records.len(), 2);
    assert_eq!(result.records[0], person(Some("Data"), Some("data@mail.com"), 25));

    let report = validator.validate(&result.records).unwrap();
    assert_eq!(report.get(0), None);
    assert_eq!(report.get(1).unwrap().len(), 3);
}

#[test]
fn test_dynamic_records_validate_against_document_schema() {
    let schema = SchemaDocument::from_toml_str(
        r#"
name = "sensor"
delimiter = ";"

[[field]]
name = "id"
column = 0
type = "text"
constraints = [{ kind = "regex", pattern = "S-[0-9]{3}", message = "bad sensor id" }]

[[field]]
name = "reading"
column = 1
type = "float"
constraints = [{ kind = "not_null" }, { kind = "range", min = -40, max = 85 }]
"#,
    )
    .unwrap()
    .into_descriptor()
    .unwrap();
    let mapper = RecordMapper::default();

    let result = mapper
        .parse_with_schema(
            Cursor::new("S-001;21.5\nS-02;90\nS-003;\n"),
            &schema,
            ParsingMode::Strict,
        )
        .unwrap();
    let report = Validator::new().validate_with_schema(&result.records, &schema);

    assert_eq!(report.get(0), None);
    let second = report.get(1).unwrap();
    assert!(second.contains("bad sensor id"));
    assert!(second.contains("Out of range!"));
    assert!(report.get(2).unwrap().contains("Value is required!"));
}
