//! Error handling for record binding operations.
//!
//! Separates schema-level defects (always fatal) from per-line data defects,
//! which the record mapper either surfaces or skips depending on the
//! parsing mode.

use crate::app::models::FieldType;
use thiserror::Error;

/// Result type alias for record binding
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for schema resolution, parsing and validation
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Record type carries no file-source metadata
    #[error("Missing file source for record type '{type_name}'")]
    MissingSchema { type_name: String },

    /// Schema declaration is inconsistent (duplicate columns, bad pattern, ...)
    #[error("Invalid schema for '{type_name}': {message}")]
    InvalidSchema { type_name: String, message: String },

    /// Line has fewer tokens than a bound column requires
    #[error(
        "Column index {index} out of bounds for field '{field}'. Expected at least {expected} columns but found {found}. Line: {line}"
    )]
    ColumnIndexOutOfBounds {
        field: String,
        index: usize,
        expected: usize,
        found: usize,
        line: String,
    },

    /// Raw token cannot be converted to the declared field type
    #[error(
        "Invalid value '{value}' for field '{field}' of type {target}: {reason}. Line: {line}"
    )]
    ValueConversion {
        field: String,
        value: String,
        target: FieldType,
        reason: String,
        line: String,
    },

    /// Declared field type has no converter
    #[error("Unsupported field type '{target}' for field '{field}'")]
    UnsupportedFieldType { field: String, target: FieldType },

    /// Per-line failure surfaced by a strict parse
    #[error("Parsing failed at line {line_number}: {line}")]
    LineRejected {
        line_number: usize,
        line: String,
        #[source]
        source: Box<Error>,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a missing schema error
    pub fn missing_schema(type_name: impl Into<String>) -> Self {
        Self::MissingSchema {
            type_name: type_name.into(),
        }
    }

    /// Create an invalid schema error
    pub fn invalid_schema(type_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidSchema {
            type_name: type_name.into(),
            message: message.into(),
        }
    }

    /// Create a column index out of bounds error
    pub fn column_out_of_bounds(
        field: impl Into<String>,
        index: usize,
        found: usize,
        line: impl Into<String>,
    ) -> Self {
        Self::ColumnIndexOutOfBounds {
            field: field.into(),
            index,
            expected: index + 1,
            found,
            line: line.into(),
        }
    }

    /// Create a value conversion error
    pub fn value_conversion(
        field: impl Into<String>,
        value: impl Into<String>,
        target: FieldType,
        reason: impl Into<String>,
        line: impl Into<String>,
    ) -> Self {
        Self::ValueConversion {
            field: field.into(),
            value: value.into(),
            target,
            reason: reason.into(),
            line: line.into(),
        }
    }

    /// Create an unsupported field type error
    pub fn unsupported_field_type(field: impl Into<String>, target: FieldType) -> Self {
        Self::UnsupportedFieldType {
            field: field.into(),
            target,
        }
    }

    /// Wrap a per-line failure with its position in the source
    pub fn line_rejected(line_number: usize, line: impl Into<String>, source: Error) -> Self {
        Self::LineRejected {
            line_number,
            line: line.into(),
            source: Box::new(source),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Whether the error is a data defect confined to one line.
    ///
    /// Only these are subject to the strict/lenient policy; everything else
    /// is a schema or environment defect and always aborts.
    pub fn is_line_level(&self) -> bool {
        matches!(
            self,
            Self::ColumnIndexOutOfBounds { .. } | Self::ValueConversion { .. }
        )
    }
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}
