//! Token conversion for delimited records
//!
//! Converts one raw token into a typed [`FieldValue`]. Tokens are trimmed
//! first; a blank token converts to `None` (absence) for every supported
//! type. Unsupported target types are reported before the blank check so a
//! blank cell never hides a schema defect.

use crate::app::models::{FieldType, FieldValue};
use crate::config::ConversionOptions;
use crate::constants::{FALSE_LITERAL, TRUE_LITERAL};
use chrono::NaiveDate;
use thiserror::Error;

/// Why a token could not be converted
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConversionError {
    /// Token is malformed for the target type
    #[error("{0}")]
    Invalid(String),

    /// Target type has no converter
    #[error("unsupported field type '{0}'")]
    Unsupported(FieldType),
}

/// Convert a token with default options
pub fn convert(raw: &str, field_type: &FieldType) -> Result<Option<FieldValue>, ConversionError> {
    convert_with(raw, field_type, &ConversionOptions::default())
}

/// Convert a token to the given target type
pub fn convert_with(
    raw: &str,
    field_type: &FieldType,
    options: &ConversionOptions,
) -> Result<Option<FieldValue>, ConversionError> {
    if !field_type.is_supported() {
        return Err(ConversionError::Unsupported(field_type.clone()));
    }

    let value = raw.trim();
    if value.is_empty() {
        return Ok(None);
    }

    let converted = match field_type {
        FieldType::Text => FieldValue::Text(value.to_string()),
        FieldType::Integer => FieldValue::Integer(parse_integer(value)?),
        FieldType::Float => FieldValue::Float(parse_float(value)?),
        FieldType::Boolean => FieldValue::Boolean(parse_boolean(value, options)?),
        FieldType::Date => FieldValue::Date(parse_date(value)?),
        FieldType::Other(_) => return Err(ConversionError::Unsupported(field_type.clone())),
    };

    Ok(Some(converted))
}

/// Parse a base-10 integer
pub fn parse_integer(value: &str) -> Result<i64, ConversionError> {
    value.parse::<i64>().map_err(|e| {
        ConversionError::Invalid(format!("invalid integer format ({})", e))
    })
}

/// Parse a decimal floating-point number
pub fn parse_float(value: &str) -> Result<f64, ConversionError> {
    value
        .parse::<f64>()
        .map_err(|e| ConversionError::Invalid(format!("invalid number format ({})", e)))
}

/// Parse a boolean literal, case-insensitively
///
/// Unrecognized tokens fail unless lenient booleans are enabled, in which
/// case they map to `false`.
pub fn parse_boolean(value: &str, options: &ConversionOptions) -> Result<bool, ConversionError> {
    if value.eq_ignore_ascii_case(TRUE_LITERAL) {
        Ok(true)
    } else if value.eq_ignore_ascii_case(FALSE_LITERAL) || options.lenient_booleans {
        Ok(false)
    } else {
        Err(ConversionError::Invalid(format!(
            "expected '{}' or '{}'",
            TRUE_LITERAL, FALSE_LITERAL
        )))
    }
}

/// Parse an ISO-8601 calendar date (YYYY-MM-DD)
pub fn parse_date(value: &str) -> Result<NaiveDate, ConversionError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|e| {
        ConversionError::Invalid(format!("invalid date format, expected YYYY-MM-DD ({})", e))
    })
}
