//! Check command implementation
//!
//! Parses every input file against a schema document, validates the bound
//! records and prints a per-file report.

use super::shared::{CommandStats, expand_inputs, load_config, setup_logging};
use crate::app::schema::{DynamicRecord, SchemaDescriptor, SchemaDocument};
use crate::app::services::record_mapper::{ParseStats, RecordMapper};
use crate::app::services::validation::Validator;
use crate::cli::args::{CheckArgs, OutputFormat};
use crate::config::ParsingMode;
use anyhow::Context;
use colored::Colorize;
use serde::Serialize;
use std::path::Path;
use tracing::{debug, info};

/// Outcome of checking one file
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<ParseStats>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub invalid_records: Vec<InvalidRecord>,
}

/// A bound record that failed validation
#[derive(Debug, Clone, Serialize)]
pub struct InvalidRecord {
    /// Position among the file's bound records
    pub index: usize,
    pub record: DynamicRecord,
    pub messages: Vec<String>,
}

impl FileReport {
    fn failed(path: &Path, error: String) -> Self {
        Self {
            path: path.display().to_string(),
            stats: None,
            error: Some(error),
            invalid_records: Vec::new(),
        }
    }
}

/// Check command runner
pub fn run_check(args: CheckArgs) -> anyhow::Result<CommandStats> {
    setup_logging(args.get_log_level(), args.quiet)?;
    debug!("Check arguments: {:?}", args);

    args.validate()?;
    let config = load_config(&args)?;

    let schema = SchemaDocument::load(&args.schema)
        .and_then(SchemaDocument::into_descriptor)
        .with_context(|| format!("Failed to load schema {}", args.schema.display()))?;
    schema
        .require_file_source()
        .with_context(|| format!("Schema {} declares no delimiter", args.schema.display()))?;

    let files = expand_inputs(&args.inputs)?;
    info!(
        "Checking {} file(s) against schema '{}'",
        files.len(),
        schema.type_name()
    );

    let mapper = RecordMapper::new(config);
    let validator = Validator::new().with_schema_cache(mapper.schema_cache());

    let mut stats = CommandStats::default();
    let mut reports = Vec::with_capacity(files.len());

    for file in &files {
        let report = check_file(
            &mapper,
            &validator,
            &schema,
            file,
            args.mode,
            !args.no_validate,
        );

        stats.files_checked += 1;
        match &report.stats {
            Some(parse_stats) => {
                stats.records_parsed += parse_stats.records_parsed;
                stats.lines_skipped += parse_stats.lines_skipped;
            }
            None => stats.files_failed += 1,
        }
        stats.invalid_records += report.invalid_records.len();
        reports.push(report);
    }

    match args.output_format {
        OutputFormat::Human => print_human_report(&reports, &stats, args.mode),
        OutputFormat::Json => print_json_report(&reports, &stats)?,
    }

    Ok(stats)
}

/// Parse and validate one file; failures are captured in the report
pub fn check_file(
    mapper: &RecordMapper,
    validator: &Validator,
    schema: &SchemaDescriptor<DynamicRecord>,
    path: &Path,
    mode: ParsingMode,
    validate: bool,
) -> FileReport {
    let result = match mapper.parse_path_with_schema(path, schema, mode) {
        Ok(result) => result,
        Err(e) => return FileReport::failed(path, format!("{:#}", anyhow::Error::from(e))),
    };

    let invalid_records = if validate {
        validator
            .validate_with_schema(&result.records, schema)
            .into_messages()
            .into_iter()
            .filter_map(|(index, messages)| {
                result.records.get(index).map(|record| InvalidRecord {
                    index,
                    record: record.clone(),
                    messages: messages.into_iter().collect(),
                })
            })
            .collect()
    } else {
        Vec::new()
    };

    FileReport {
        path: path.display().to_string(),
        stats: Some(result.stats),
        error: None,
        invalid_records,
    }
}

fn print_human_report(reports: &[FileReport], stats: &CommandStats, mode: ParsingMode) {
    for report in reports {
        match (&report.stats, &report.error) {
            (Some(parse_stats), _) if report.invalid_records.is_empty() => {
                println!(
                    "{} {} ({} records, {} skipped)",
                    "✓".green(),
                    report.path,
                    parse_stats.records_parsed,
                    parse_stats.lines_skipped
                );
            }
            (Some(parse_stats), _) => {
                println!(
                    "{} {} ({} records, {} invalid)",
                    "✗".red(),
                    report.path,
                    parse_stats.records_parsed,
                    report.invalid_records.len()
                );
            }
            (None, error) => {
                println!(
                    "{} {}: {}",
                    "✗".red(),
                    report.path,
                    error.as_deref().unwrap_or("failed")
                );
            }
        }

        if let Some(parse_stats) = &report.stats {
            for error in &parse_stats.errors {
                println!("    {} {}", "skipped".yellow(), error);
            }
        }
        for invalid in &report.invalid_records {
            println!(
                "    {} record {}: {}",
                "invalid".red(),
                invalid.index,
                invalid.messages.join("; ")
            );
        }
    }

    println!();
    println!("{}", "Summary".bold());
    println!("   • Mode: {}", mode);
    println!("   • Files checked: {}", stats.files_checked);
    println!("   • Records parsed: {}", stats.records_parsed);
    if stats.lines_skipped > 0 {
        println!("   • Lines skipped: {}", stats.lines_skipped.to_string().yellow());
    }
    if stats.files_failed > 0 {
        println!("   • Files failed: {}", stats.files_failed.to_string().red());
    }
    if stats.invalid_records > 0 {
        println!("   • Invalid records: {}", stats.invalid_records.to_string().red());
    }
}

fn print_json_report(reports: &[FileReport], stats: &CommandStats) -> anyhow::Result<()> {
    let json = serde_json::json!({
        "files_checked": stats.files_checked,
        "files_failed": stats.files_failed,
        "records_parsed": stats.records_parsed,
        "lines_skipped": stats.lines_skipped,
        "invalid_records": stats.invalid_records,
        "files": reports,
    });

    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
