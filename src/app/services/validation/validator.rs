//! Validator orchestration and report
//!
//! The validator walks records in input order, evaluates every constraint of
//! every declared field and aggregates distinct failure messages per record.

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

use super::strategies;
use crate::Result;
use crate::app::schema::{Record, SchemaCache, SchemaDescriptor};
use crate::app::services::diagnostics::{Diagnostics, TracingDiagnostics};

/// Failure messages per record, keyed by position in the input
///
/// Records that passed every check have no entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    /// Number of records examined
    pub checked: usize,

    /// Distinct failure messages for each invalid record
    pub invalid: BTreeMap<usize, BTreeSet<String>>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages for the record at `index`, if it failed
    pub fn get(&self, index: usize) -> Option<&BTreeSet<String>> {
        self.invalid.get(&index)
    }

    /// Number of invalid records
    pub fn len(&self) -> usize {
        self.invalid.len()
    }

    pub fn is_empty(&self) -> bool {
        self.invalid.is_empty()
    }

    /// Whether every examined record passed
    pub fn is_valid(&self) -> bool {
        self.invalid.is_empty()
    }

    /// Invalid records in input order
    pub fn iter(&self) -> impl Iterator<Item = (usize, &BTreeSet<String>)> {
        self.invalid.iter().map(|(index, messages)| (*index, messages))
    }

    /// Pair each invalid entry with its record
    pub fn with_records<'a, T>(
        &'a self,
        records: &'a [T],
    ) -> impl Iterator<Item = (&'a T, &'a BTreeSet<String>)> {
        self.invalid
            .iter()
            .filter_map(|(index, messages)| records.get(*index).map(|record| (record, messages)))
    }

    /// Total number of failure messages across all records
    pub fn message_count(&self) -> usize {
        self.invalid.values().map(BTreeSet::len).sum()
    }

    pub fn into_messages(self) -> BTreeMap<usize, BTreeSet<String>> {
        self.invalid
    }
}

/// Checks records against the constraints declared by their schema
pub struct Validator {
    schemas: Arc<SchemaCache>,
    diagnostics: Arc<dyn Diagnostics>,
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Validator")
            .field("schemas", &self.schemas)
            .finish_non_exhaustive()
    }
}

impl Validator {
    /// Create a validator that reports through `tracing`
    pub fn new() -> Self {
        Self {
            schemas: Arc::new(SchemaCache::new()),
            diagnostics: Arc::new(TracingDiagnostics),
        }
    }

    /// Replace the diagnostics collaborator
    pub fn with_diagnostics(mut self, diagnostics: Arc<dyn Diagnostics>) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    /// Share a schema cache with a mapper or other validators
    pub fn with_schema_cache(mut self, schemas: Arc<SchemaCache>) -> Self {
        self.schemas = schemas;
        self
    }

    /// Validate records of type `T`
    ///
    /// Fails only if the schema of `T` cannot be resolved.
    pub fn validate<T: Record>(&self, records: &[T]) -> Result<ValidationReport> {
        let schema = self
            .schemas
            .resolve::<T>()
            .inspect_err(|e| self.diagnostics.fatal(e))?;
        Ok(self.validate_with_schema(records, &schema))
    }

    /// Validate records against an explicit descriptor
    pub fn validate_with_schema<T>(
        &self,
        records: &[T],
        schema: &SchemaDescriptor<T>,
    ) -> ValidationReport {
        let mut report = ValidationReport::new();

        for (index, record) in records.iter().enumerate() {
            report.checked += 1;
            let messages = self.validate_record(record, schema);
            if !messages.is_empty() {
                self.diagnostics.record_invalid(index, &messages);
                report.invalid.insert(index, messages);
            }
        }

        info!(
            "Validated {} {} record(s): {} invalid",
            report.checked,
            schema.type_name(),
            report.len()
        );

        report
    }

    /// Distinct failure messages for one record
    pub fn validate_record<T>(&self, record: &T, schema: &SchemaDescriptor<T>) -> BTreeSet<String> {
        let mut messages = BTreeSet::new();

        for field in schema.fields() {
            if field.constraints().is_empty() {
                continue;
            }

            match field.read(record) {
                Ok(value) => {
                    for constraint in field.constraints() {
                        if let Some(message) = strategies::check(field, constraint, value.as_ref())
                        {
                            messages.insert(message);
                        }
                    }
                }
                Err(reason) => {
                    debug!("Field '{}' could not be read: {}", field.name(), reason);
                    for constraint in field.constraints() {
                        self.diagnostics
                            .field_unreadable(field.name(), constraint.kind(), &reason);
                        if let Some(message) = strategies::unreadable(field.name(), constraint) {
                            messages.insert(message);
                        }
                    }
                }
            }
        }

        messages
    }
}
