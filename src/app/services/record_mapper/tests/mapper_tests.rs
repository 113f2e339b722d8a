//! Tests for file-level record mapping

use super::{
    MockRecord, NoFileSource, TabSeparated, Transaction, create_observed_mapper,
    create_temp_file, create_transaction_file_content,
};
use crate::Error;
use crate::app::schema::SchemaDocument;
use crate::app::services::diagnostics::DiagnosticEvent;
use crate::app::services::record_mapper::RecordMapper;
use crate::config::{MapperConfig, ParsingMode};
use std::io::Cursor;
use std::path::Path;

#[test]
fn test_strict_parse_of_clean_file_returns_records_in_order() {
    let file = create_temp_file("Alice,alice@mail.com,30\nBob,bob@mail.com,41\n");
    let mapper = RecordMapper::default();

    let records: Vec<MockRecord> = mapper.parse(file.path(), ParsingMode::Strict).unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].name.as_deref(), Some("Alice"));
    assert_eq!(records[1].name.as_deref(), Some("Bob"));
    assert_eq!(records[1].age, 41);
}

#[test]
fn test_strict_and_lenient_agree_on_clean_input() {
    let file = create_temp_file("# people\nAlice,alice@mail.com,30\n\nBob,bob@mail.com,41\n");
    let mapper = RecordMapper::default();

    let strict: Vec<MockRecord> = mapper.parse(file.path(), ParsingMode::Strict).unwrap();
    let lenient: Vec<MockRecord> = mapper.parse(file.path(), ParsingMode::Lenient).unwrap();

    assert_eq!(strict, lenient);
}

#[test]
fn test_comment_and_blank_only_file_yields_no_records() {
    let file = create_temp_file("# header\n\n   \n   # indented\n");
    let mapper = RecordMapper::default();

    for mode in [ParsingMode::Strict, ParsingMode::Lenient] {
        let result = mapper.parse_file::<MockRecord>(file.path(), mode).unwrap();
        assert!(result.records.is_empty());
        assert_eq!(result.stats.blank_lines, 2);
        assert_eq!(result.stats.comment_lines, 2);
    }
}

#[test]
fn test_strict_mode_aborts_on_first_bad_line() {
    let file = create_temp_file(
        "Alice,alice@mail.com,30\nJohn,john@mail.com,NOT_A_NUMBER\nBob,bob@mail.com,41\n",
    );
    let (mapper, diagnostics) = create_observed_mapper();

    let err = mapper
        .parse::<MockRecord>(file.path(), ParsingMode::Strict)
        .unwrap_err();

    match err {
        Error::LineRejected {
            line_number,
            line,
            source,
        } => {
            assert_eq!(line_number, 2);
            assert_eq!(line, "John,john@mail.com,NOT_A_NUMBER");
            assert!(matches!(*source, Error::ValueConversion { .. }));
        }
        other => panic!("unexpected error: {other:?}"),
    }

    let events = diagnostics.events();
    assert_eq!(events.len(), 1);
    assert!(matches!(
        &events[0],
        DiagnosticEvent::LineRejected { line_number: 2, mode: ParsingMode::Strict, .. }
    ));
}

#[test]
fn test_lenient_mode_skips_bad_lines() {
    let file = create_temp_file(
        "Alice,alice@mail.com,30\nJohn,john@mail.com,NOT_A_NUMBER\nshort,line\nBob,bob@mail.com,41\n",
    );
    let (mapper, diagnostics) = create_observed_mapper();

    let result = mapper
        .parse_file::<MockRecord>(file.path(), ParsingMode::Lenient)
        .unwrap();

    let names: Vec<_> = result
        .records
        .iter()
        .map(|r| r.name.clone().unwrap_or_default())
        .collect();
    assert_eq!(names, vec!["Alice", "Bob"]);
    assert_eq!(result.stats.lines_skipped, 2);
    assert_eq!(result.stats.errors.len(), 2);
    assert!(result.stats.errors[0].starts_with("Line 2:"));

    let rejected: Vec<usize> = diagnostics
        .events()
        .into_iter()
        .filter_map(|event| match event {
            DiagnosticEvent::LineRejected {
                line_number, mode, ..
            } => {
                assert_eq!(mode, ParsingMode::Lenient);
                Some(line_number)
            }
            _ => None,
        })
        .collect();
    assert_eq!(rejected, vec![2, 3]);
}

#[test]
fn test_lenient_result_is_subset_in_order() {
    let content = create_transaction_file_content();
    let file = create_temp_file(&content);
    let mapper = RecordMapper::default();

    let result = mapper
        .parse_file::<Transaction>(file.path(), ParsingMode::Lenient)
        .unwrap();

    let ids: Vec<_> = result
        .records
        .iter()
        .filter_map(|t| t.transaction_id.as_deref())
        .collect();
    assert_eq!(ids, vec!["TX-1", "TX-3", "TX-5"]);

    assert_eq!(result.stats.lines_read, 9);
    assert_eq!(result.stats.blank_lines, 1);
    assert_eq!(result.stats.comment_lines, 3);
    assert_eq!(result.stats.records_parsed, 3);
    assert_eq!(result.stats.lines_skipped, 2);
}

#[test]
fn test_strict_transaction_file_reports_line_number() {
    let file = create_temp_file(&create_transaction_file_content());
    let mapper = RecordMapper::default();

    let err = mapper
        .parse::<Transaction>(file.path(), ParsingMode::Strict)
        .unwrap_err();

    assert!(matches!(err, Error::LineRejected { line_number: 5, .. }));
}

#[test]
fn test_recorded_errors_respect_configured_cap() {
    let content = "a,b,x\n".repeat(5);
    let file = create_temp_file(&content);
    let config = MapperConfig {
        max_recorded_errors: 2,
        ..MapperConfig::default()
    };
    let mapper = RecordMapper::new(config);

    let result = mapper
        .parse_file::<MockRecord>(file.path(), ParsingMode::Lenient)
        .unwrap();

    assert_eq!(result.stats.lines_skipped, 5);
    assert_eq!(result.stats.errors.len(), 2);
}

#[test]
fn test_missing_file_source_is_reported_before_opening_the_file() {
    let (mapper, diagnostics) = create_observed_mapper();
    let missing = Path::new("/definitely/not/here.txt");

    for mode in [ParsingMode::Strict, ParsingMode::Lenient] {
        let err = mapper.parse::<NoFileSource>(missing, mode).unwrap_err();
        assert!(matches!(err, Error::MissingSchema { ref type_name } if type_name == "NoFileSource"));
    }

    assert!(
        diagnostics
            .events()
            .iter()
            .all(|event| matches!(event, DiagnosticEvent::Fatal { .. }))
    );
}

#[test]
fn test_unreadable_file_is_fatal_in_both_modes() {
    let mapper = RecordMapper::default();
    let missing = Path::new("/definitely/not/here.txt");

    for mode in [ParsingMode::Strict, ParsingMode::Lenient] {
        let err = mapper.parse::<MockRecord>(missing, mode).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }
}

#[test]
fn test_unsupported_type_aborts_even_in_lenient_mode() {
    let schema = SchemaDocument::from_toml_str(
        r#"
name = "ledger"
delimiter = ","

[[field]]
name = "balance"
column = 0
type = "decimal"
"#,
    )
    .unwrap()
    .into_descriptor()
    .unwrap();
    let (mapper, diagnostics) = create_observed_mapper();

    let err = mapper
        .parse_with_schema(Cursor::new("1.5\n2.5\n"), &schema, ParsingMode::Lenient)
        .unwrap_err();

    assert!(matches!(err, Error::UnsupportedFieldType { .. }));
    assert!(matches!(
        diagnostics.events().as_slice(),
        [DiagnosticEvent::Fatal { .. }]
    ));
}

#[test]
fn test_parse_reader_and_parse_line() {
    let mapper = RecordMapper::default();

    let result = mapper
        .parse_reader::<MockRecord, _>(
            Cursor::new("Alice,alice@mail.com,30\n"),
            ParsingMode::Strict,
        )
        .unwrap();
    assert_eq!(result.records.len(), 1);

    let single: MockRecord = mapper.parse_line("Bob;bob@mail.com;41", ";").unwrap();
    assert_eq!(single.age, 41);

    // Types without a file source can still bind single lines
    let label: NoFileSource = mapper.parse_line("ignored", ",").unwrap();
    assert_eq!(label.label, None);
}

#[test]
fn test_tab_delimited_edge_columns_stay_in_place() {
    let (mapper, diagnostics) = create_observed_mapper();

    let result = mapper
        .parse_reader::<TabSeparated, _>(Cursor::new("\tx\ty\nx\ty\t\n"), ParsingMode::Strict)
        .unwrap();

    assert_eq!(
        result.records,
        vec![
            TabSeparated {
                a: None,
                b: Some("x".to_string()),
                c: Some("y".to_string()),
            },
            TabSeparated {
                a: Some("x".to_string()),
                b: Some("y".to_string()),
                c: None,
            },
        ]
    );
    assert!(diagnostics.events().is_empty());

    // Extra columns past the last binding are ignored
    let shifted: TabSeparated = mapper.parse_line("\tx\ty\tz", "\t").unwrap();
    assert_eq!(shifted.a, None);
    assert_eq!(shifted.c.as_deref(), Some("y"));
}

#[test]
fn test_parse_line_reports_fatal_errors() {
    let (mapper, diagnostics) = create_observed_mapper();

    let err = mapper.parse_line::<TabSeparated>("x\ty\tz", "").unwrap_err();

    assert!(matches!(err, Error::InvalidSchema { .. }));
    assert!(matches!(
        diagnostics.events().as_slice(),
        [DiagnosticEvent::Fatal { .. }]
    ));

    // Line-level failures are returned without a diagnostic
    let err = mapper.parse_line::<TabSeparated>("x\ty", "\t").unwrap_err();
    assert!(err.is_line_level());
    assert_eq!(diagnostics.events().len(), 1);
}

#[test]
fn test_schema_is_resolved_once_per_type() {
    let mapper = RecordMapper::default();
    let first = mapper.schema::<MockRecord>().unwrap();
    let second = mapper.schema::<MockRecord>().unwrap();

    assert!(std::sync::Arc::ptr_eq(&first, &second));
    assert_eq!(mapper.schema_cache().len(), 1);
}

#[test]
fn test_concurrent_parses_share_one_mapper() {
    let mapper = RecordMapper::default();
    let good = create_temp_file("Alice,alice@mail.com,30\nBob,bob@mail.com,41\n");
    let mixed = create_temp_file("Carol,carol@mail.com,33\nbroken\n");

    std::thread::scope(|scope| {
        let a = scope.spawn(|| mapper.parse_file::<MockRecord>(good.path(), ParsingMode::Strict));
        let b =
            scope.spawn(|| mapper.parse_file::<MockRecord>(mixed.path(), ParsingMode::Lenient));

        let a = a.join().unwrap().unwrap();
        let b = b.join().unwrap().unwrap();
        assert_eq!(a.records.len(), 2);
        assert_eq!(b.records.len(), 1);
        assert_eq!(b.stats.lines_skipped, 1);
    });
}
