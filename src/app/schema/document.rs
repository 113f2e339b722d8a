//! TOML schema documents and run-time records
//!
//! Compile-time record types declare their layout through
//! [`Record`](super::Record). Files whose layout is only known at run time
//! are described by a [`SchemaDocument`] instead, which resolves to a
//! descriptor over [`DynamicRecord`], an ordered name → value map.
//!
//! ```toml
//! name = "customer"
//! delimiter = ","
//! comment_prefixes = ["#", "//"]
//!
//! [[field]]
//! name = "email"
//! column = 1
//! type = "text"
//! constraints = [
//!     { kind = "not_null", message = "email is required" },
//!     { kind = "regex", pattern = '^[^\s@]+@[^\s@]+\.[^\s@]+$', message = "invalid email" },
//! ]
//! ```

use super::{FieldBinding, FieldSet, FileSource, Reader, SchemaDescriptor, Writer};
use crate::app::models::{FieldType, FieldValue};
use crate::constants::{
    DEFAULT_COMMENT_PREFIX, DEFAULT_NOT_NULL_MESSAGE, DEFAULT_RANGE_MESSAGE,
    DEFAULT_REGEX_MESSAGE, RANGE_DEFAULT_MAX,
};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

/// Declarative description of one delimited record layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaDocument {
    /// Name reported in errors and diagnostics
    pub name: String,

    /// Literal delimiter; absent means the layout has no file source
    #[serde(default)]
    pub delimiter: Option<String>,

    #[serde(default = "default_comment_prefixes")]
    pub comment_prefixes: Vec<String>,

    #[serde(default, rename = "field")]
    pub fields: Vec<FieldDocument>,
}

/// One field of a [`SchemaDocument`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDocument {
    pub name: String,

    /// Zero-based column; omitted for validated-only fields
    #[serde(default)]
    pub column: Option<usize>,

    #[serde(rename = "type")]
    pub field_type: FieldType,

    #[serde(default)]
    pub constraints: Vec<ConstraintDocument>,
}

/// Constraint declaration as written in a schema document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ConstraintDocument {
    NotNull {
        #[serde(default)]
        message: Option<String>,
    },
    Range {
        min: f64,
        #[serde(default)]
        max: Option<f64>,
        #[serde(default)]
        message: Option<String>,
    },
    Regex {
        pattern: String,
        #[serde(default)]
        message: Option<String>,
    },
}

fn default_comment_prefixes() -> Vec<String> {
    vec![DEFAULT_COMMENT_PREFIX.to_string()]
}

impl SchemaDocument {
    /// Load a schema document from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::io(format!("Failed to read schema {}", path.display()), e)
        })?;
        let document = Self::from_toml_str(&content)?;
        debug!(
            "Loaded schema '{}' with {} fields from {}",
            document.name,
            document.fields.len(),
            path.display()
        );
        Ok(document)
    }

    /// Parse a schema document from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::invalid_schema("<document>", e.to_string()))
    }

    /// Resolve into a descriptor over [`DynamicRecord`]
    pub fn into_descriptor(self) -> Result<SchemaDescriptor<DynamicRecord>> {
        let comment_prefixes = self.comment_prefixes;
        let source = self
            .delimiter
            .map(|delimiter| FileSource::new(delimiter).with_comment_prefixes(comment_prefixes));

        let mut fields = FieldSet::new();
        for field in self.fields {
            let binding = dynamic_binding(&field.name, field.column, field.field_type);
            let mut decl = fields.bind(binding);
            for constraint in field.constraints {
                decl = match constraint {
                    ConstraintDocument::NotNull { message } => decl.not_null(
                        message.unwrap_or_else(|| DEFAULT_NOT_NULL_MESSAGE.to_string()),
                    ),
                    ConstraintDocument::Range { min, max, message } => decl.range(
                        min,
                        max.unwrap_or(RANGE_DEFAULT_MAX),
                        message.unwrap_or_else(|| DEFAULT_RANGE_MESSAGE.to_string()),
                    ),
                    ConstraintDocument::Regex { pattern, message } => decl.regex(
                        &pattern,
                        message.unwrap_or_else(|| DEFAULT_REGEX_MESSAGE.to_string()),
                    ),
                };
            }
        }

        SchemaDescriptor::from_parts(self.name, source, fields)
    }
}

fn dynamic_binding(
    name: &str,
    column: Option<usize>,
    field_type: FieldType,
) -> FieldBinding<DynamicRecord> {
    let read_name = name.to_string();
    let reader: Reader<DynamicRecord> = Box::new(move |record: &DynamicRecord| {
        Ok::<_, String>(record.get(&read_name).cloned())
    });

    let writer = column.map(|_| {
        let write_name = name.to_string();
        let writer: Writer<DynamicRecord> =
            Box::new(move |record: &mut DynamicRecord, value: Option<FieldValue>| {
                record.set(write_name.clone(), value);
                Ok::<(), String>(())
            });
        writer
    });

    FieldBinding::new(name, column, field_type, reader, writer)
}

/// Record whose fields are only known at run time
///
/// Every field is optional: a blank token is stored as an explicit absence.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct DynamicRecord {
    values: BTreeMap<String, Option<FieldValue>>,
}

impl DynamicRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Present value of a field; `None` when absent or never set
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.values.get(name).and_then(Option::as_ref)
    }

    pub fn set(&mut self, name: impl Into<String>, value: Option<FieldValue>) {
        self.values.insert(name.into(), value);
    }

    /// Whether the field was populated, including explicit absence
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&FieldValue>)> {
        self.values
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_ref()))
    }
}
