//! Schema command implementation
//!
//! Resolves a schema document and lists its file source, field bindings and
//! constraints, so a layout can be checked before any data is parsed.

use super::shared::{CommandStats, setup_logging};
use crate::app::schema::{DynamicRecord, SchemaDescriptor, SchemaDocument};
use crate::cli::args::{OutputFormat, SchemaArgs};
use anyhow::Context;
use colored::Colorize;
use tracing::info;

/// Schema command runner
pub fn run_schema(args: SchemaArgs) -> anyhow::Result<CommandStats> {
    setup_logging(args.get_log_level(), false)?;
    args.validate()?;

    let schema = SchemaDocument::load(&args.schema)
        .and_then(SchemaDocument::into_descriptor)
        .with_context(|| format!("Failed to load schema {}", args.schema.display()))?;
    info!(
        "Resolved schema '{}' with {} field(s)",
        schema.type_name(),
        schema.fields().len()
    );

    match args.output_format {
        OutputFormat::Human => print_human_schema(&schema),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&schema_json(&schema))?),
    }

    Ok(CommandStats::default())
}

/// JSON description of a resolved schema
pub fn schema_json(schema: &SchemaDescriptor<DynamicRecord>) -> serde_json::Value {
    let fields: Vec<_> = schema
        .fields()
        .iter()
        .map(|field| {
            serde_json::json!({
                "name": field.name(),
                "column": field.column(),
                "type": field.field_type(),
                "supported": field.field_type().is_supported(),
                "constraints": field.constraints().iter().map(|constraint| {
                    serde_json::json!({
                        "kind": constraint.kind().to_string(),
                        "rule": constraint.to_string(),
                        "message": constraint.message(),
                    })
                }).collect::<Vec<_>>(),
            })
        })
        .collect();

    serde_json::json!({
        "name": schema.type_name(),
        "file_source": schema.file_source(),
        "min_columns": schema.min_columns(),
        "fields": fields,
    })
}

fn print_human_schema(schema: &SchemaDescriptor<DynamicRecord>) {
    println!("{} {}", "Schema".bold(), schema.type_name());

    match schema.file_source() {
        Some(source) => {
            println!("   • Delimiter: {:?}", source.delimiter);
            println!("   • Comment prefixes: {:?}", source.comment_prefixes);
        }
        None => println!("   • {}", "No delimiter declared (cannot parse files)".yellow()),
    }
    println!("   • Minimum columns: {}", schema.min_columns());
    println!();

    for field in schema.fields() {
        let column = field
            .column()
            .map_or_else(|| "-".to_string(), |column| column.to_string());
        let field_type = if field.field_type().is_supported() {
            field.field_type().to_string().normal()
        } else {
            format!("{} (unsupported)", field.field_type()).red()
        };

        println!("   [{:>2}] {} : {}", column, field.name().bold(), field_type);
        for constraint in field.constraints() {
            println!("          {} -> \"{}\"", constraint, constraint.message());
        }
    }
}
