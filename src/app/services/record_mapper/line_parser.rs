//! Individual line parsing for delimited records
//!
//! Splits one line on the schema's literal delimiter and populates a fresh
//! record from the bound columns, in declaration order.

use tracing::trace;

use super::converter::{ConversionError, convert_with};
use crate::app::schema::SchemaDescriptor;
use crate::config::ConversionOptions;
use crate::{Error, Result};

/// Split a line on a literal delimiter
///
/// The delimiter never acts as a pattern, and trailing empty tokens are kept:
/// `"a,b,"` yields three tokens.
pub fn split_line<'a>(line: &'a str, delimiter: &str) -> Vec<&'a str> {
    line.split(delimiter).collect()
}

/// Parse a single line into a new record
///
/// Fails with [`Error::ColumnIndexOutOfBounds`] when a bound column is past
/// the end of the line, [`Error::ValueConversion`] when a token cannot be
/// stored in its field, and [`Error::UnsupportedFieldType`] when a field
/// declares a type without a converter. An empty delimiter is a schema
/// defect ([`Error::InvalidSchema`]).
pub fn parse_line<T: Default>(
    line: &str,
    schema: &SchemaDescriptor<T>,
    delimiter: &str,
    options: &ConversionOptions,
) -> Result<T> {
    if delimiter.is_empty() {
        return Err(Error::invalid_schema(
            schema.type_name(),
            "delimiter must not be empty",
        ));
    }

    let tokens = split_line(line, delimiter);
    let mut record = T::default();

    for field in schema.bound_fields() {
        let Some(index) = field.column() else {
            continue;
        };

        let token = tokens
            .get(index)
            .ok_or_else(|| Error::column_out_of_bounds(field.name(), index, tokens.len(), line))?;
        let raw = token.trim();

        let value = convert_with(raw, field.field_type(), options).map_err(|e| match e {
            ConversionError::Unsupported(target) => {
                Error::unsupported_field_type(field.name(), target)
            }
            ConversionError::Invalid(reason) => Error::value_conversion(
                field.name(),
                raw,
                field.field_type().clone(),
                reason,
                line,
            ),
        })?;

        field.write(&mut record, value).map_err(|reason| {
            Error::value_conversion(field.name(), raw, field.field_type().clone(), reason, line)
        })?;

        trace!("Bound column {} to field '{}'", index, field.name());
    }

    Ok(record)
}
