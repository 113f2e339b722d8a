//! Core record mapper implementation
//!
//! This module provides the file traversal: reading line by line, skipping
//! blank and comment lines, delegating each data line to the line parser and
//! applying the parsing mode to failures.

use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

use super::line_parser;
use super::stats::{ParseResult, ParseStats};
use crate::app::schema::{FileSource, Record, SchemaCache, SchemaDescriptor};
use crate::app::services::diagnostics::{Diagnostics, TracingDiagnostics};
use crate::config::{MapperConfig, ParsingMode};
use crate::{Error, Result};

/// Maps delimited text files onto record types
///
/// The mapper holds no per-call state: each parse works on its own
/// accumulator, so one mapper can serve concurrent calls on disjoint inputs.
/// Schema descriptors are resolved once per record type and cached.
pub struct RecordMapper {
    config: MapperConfig,
    schemas: Arc<SchemaCache>,
    diagnostics: Arc<dyn Diagnostics>,
}

impl Default for RecordMapper {
    fn default() -> Self {
        Self::new(MapperConfig::default())
    }
}

impl fmt::Debug for RecordMapper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordMapper")
            .field("config", &self.config)
            .field("schemas", &self.schemas)
            .finish_non_exhaustive()
    }
}

impl RecordMapper {
    /// Create a mapper that reports through `tracing`
    pub fn new(config: MapperConfig) -> Self {
        Self {
            config,
            schemas: Arc::new(SchemaCache::new()),
            diagnostics: Arc::new(TracingDiagnostics),
        }
    }

    /// Replace the diagnostics collaborator
    pub fn with_diagnostics(mut self, diagnostics: Arc<dyn Diagnostics>) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    /// Share a schema cache with other mappers or validators
    pub fn with_schema_cache(mut self, schemas: Arc<SchemaCache>) -> Self {
        self.schemas = schemas;
        self
    }

    pub fn config(&self) -> &MapperConfig {
        &self.config
    }

    pub fn schema_cache(&self) -> Arc<SchemaCache> {
        Arc::clone(&self.schemas)
    }

    /// Resolved descriptor for `T`
    pub fn schema<T: Record>(&self) -> Result<Arc<SchemaDescriptor<T>>> {
        self.schemas
            .resolve::<T>()
            .inspect_err(|e| self.diagnostics.fatal(e))
    }

    /// Parse a file into records of type `T`
    ///
    /// In strict mode the first bad line aborts the parse and no records are
    /// returned. In lenient mode bad lines are skipped.
    pub fn parse<T: Record>(&self, path: &Path, mode: ParsingMode) -> Result<Vec<T>> {
        Ok(self.parse_file(path, mode)?.records)
    }

    /// Parse a file into records of type `T`, with statistics
    pub fn parse_file<T: Record>(&self, path: &Path, mode: ParsingMode) -> Result<ParseResult<T>> {
        let schema = self.schema::<T>()?;
        self.parse_path_with_schema(path, &schema, mode)
    }

    /// Parse a file against an explicit descriptor
    pub fn parse_path_with_schema<T: Default>(
        &self,
        path: &Path,
        schema: &SchemaDescriptor<T>,
        mode: ParsingMode,
    ) -> Result<ParseResult<T>> {
        self.require_source(schema)?;

        info!(
            "Parsing {} as {} ({} mode)",
            path.display(),
            schema.type_name(),
            mode
        );

        let file = File::open(path)
            .map_err(|e| Error::io(format!("Failed to open {}", path.display()), e))
            .inspect_err(|e| self.diagnostics.fatal(e))?;

        let result = self.parse_with_schema(BufReader::new(file), schema, mode)?;

        info!(
            "Parsed {} records from {} lines of {} ({} skipped)",
            result.stats.records_parsed,
            result.stats.lines_read,
            path.display(),
            result.stats.lines_skipped
        );

        Ok(result)
    }

    /// Parse buffered input into records of type `T`
    pub fn parse_reader<T: Record, R: BufRead>(
        &self,
        reader: R,
        mode: ParsingMode,
    ) -> Result<ParseResult<T>> {
        let schema = self.schema::<T>()?;
        self.parse_with_schema(reader, &schema, mode)
    }

    /// Parse buffered input against an explicit descriptor
    pub fn parse_with_schema<T: Default, R: BufRead>(
        &self,
        reader: R,
        schema: &SchemaDescriptor<T>,
        mode: ParsingMode,
    ) -> Result<ParseResult<T>> {
        let source = self.require_source(schema)?;

        let mut stats = ParseStats::new();
        let mut records = Vec::new();

        for (index, line) in reader.lines().enumerate() {
            let line_number = index + 1;
            let line = line
                .map_err(|e| Error::io(format!("Failed to read line {}", line_number), e))
                .inspect_err(|e| self.diagnostics.fatal(e))?;
            stats.lines_read += 1;

            let trimmed = line.trim();
            if trimmed.is_empty() {
                stats.blank_lines += 1;
                continue;
            }
            if source.is_comment(trimmed) {
                stats.comment_lines += 1;
                continue;
            }

            // Split the raw line; whitespace delimiters keep their empty edge columns
            match line_parser::parse_line(
                &line,
                schema,
                &source.delimiter,
                &self.config.conversion,
            ) {
                Ok(record) => {
                    records.push(record);
                    stats.records_parsed += 1;
                }
                Err(error) if !error.is_line_level() => {
                    self.diagnostics.fatal(&error);
                    return Err(error);
                }
                Err(error) => {
                    self.diagnostics
                        .line_rejected(line_number, &line, &error, mode);
                    match mode {
                        ParsingMode::Strict => {
                            return Err(Error::line_rejected(line_number, line, error));
                        }
                        ParsingMode::Lenient => {
                            debug!("Skipped line {}: {}", line_number, error);
                            stats.record_skip(
                                format!("Line {}: {}", line_number, error),
                                self.config.max_recorded_errors,
                            );
                        }
                    }
                }
            }
        }

        Ok(ParseResult { records, stats })
    }

    /// Parse one line into a record of type `T`
    ///
    /// Only the field bindings of `T` are used; the delimiter is supplied by
    /// the caller, so types without a file source can still be parsed here.
    pub fn parse_line<T: Record>(&self, line: &str, delimiter: &str) -> Result<T> {
        let schema = self.schema::<T>()?;
        line_parser::parse_line(line, &schema, delimiter, &self.config.conversion).inspect_err(
            |e| {
                if !e.is_line_level() {
                    self.diagnostics.fatal(e);
                }
            },
        )
    }

    fn require_source<'s, T>(&self, schema: &'s SchemaDescriptor<T>) -> Result<&'s FileSource> {
        schema
            .require_file_source()
            .inspect_err(|e| self.diagnostics.fatal(e))
    }
}
