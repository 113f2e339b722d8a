//! Core value types for record binding
//!
//! This module defines the closed set of target types a column can be bound
//! to, the typed values the converter produces, and the [`BindValue`] trait
//! that moves those values in and out of concrete record fields.
//!
//! Absence (a blank token) is represented as `None` throughout. It is a
//! distinct state from a present-but-empty value such as `Some(Text(""))`
//! or `Some(Integer(0))`.

use crate::constants::BLANK_REQUIRED_REASON;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Target type declared for a bound field
///
/// Schema documents name types as strings; names with no converter are kept
/// as [`FieldType::Other`] so the defect surfaces when a line is parsed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FieldType {
    Text,
    Integer,
    Float,
    Boolean,
    Date,
    Other(String),
}

impl FieldType {
    /// Whether values of this type take part in range checks
    pub fn is_numeric(&self) -> bool {
        matches!(self, FieldType::Integer | FieldType::Float)
    }

    /// Whether the converter can produce values of this type
    pub fn is_supported(&self) -> bool {
        !matches!(self, FieldType::Other(_))
    }

    /// Canonical lower-case name
    pub fn name(&self) -> &str {
        match self {
            FieldType::Text => "text",
            FieldType::Integer => "integer",
            FieldType::Float => "float",
            FieldType::Boolean => "boolean",
            FieldType::Date => "date",
            FieldType::Other(name) => name,
        }
    }
}

impl From<String> for FieldType {
    fn from(name: String) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "text" | "string" => FieldType::Text,
            "integer" | "int" => FieldType::Integer,
            "float" | "double" => FieldType::Float,
            "boolean" | "bool" => FieldType::Boolean,
            "date" => FieldType::Date,
            _ => FieldType::Other(name),
        }
    }
}

impl From<&str> for FieldType {
    fn from(name: &str) -> Self {
        FieldType::from(name.to_string())
    }
}

impl From<FieldType> for String {
    fn from(field_type: FieldType) -> Self {
        field_type.name().to_string()
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A converted, present field value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Date(NaiveDate),
}

impl FieldValue {
    /// Type of this value
    pub fn field_type(&self) -> FieldType {
        match self {
            FieldValue::Text(_) => FieldType::Text,
            FieldValue::Integer(_) => FieldType::Integer,
            FieldValue::Float(_) => FieldType::Float,
            FieldValue::Boolean(_) => FieldType::Boolean,
            FieldValue::Date(_) => FieldType::Date,
        }
    }

    /// Numeric view used by range checks
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Integer(value) => Some(*value as f64),
            FieldValue::Float(value) => Some(*value),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(value) => f.write_str(value),
            FieldValue::Integer(value) => write!(f, "{}", value),
            // Whole floats keep a fractional digit so "25.0" never reads as an integer
            FieldValue::Float(value) if value.fract() == 0.0 && value.abs() < 1e16 => {
                write!(f, "{:.1}", value)
            }
            FieldValue::Float(value) => write!(f, "{}", value),
            FieldValue::Boolean(value) => write!(f, "{}", value),
            FieldValue::Date(value) => write!(f, "{}", value.format("%Y-%m-%d")),
        }
    }
}

/// A record field slot that can receive converted values
///
/// Plain slots reject absence; wrap the slot in `Option` to accept blank
/// tokens as `None`.
pub trait BindValue: Sized {
    /// Target type the converter should produce for this slot
    fn field_type() -> FieldType;

    /// Build the slot value from a converted token
    fn from_value(value: Option<FieldValue>) -> std::result::Result<Self, String>;

    /// Current slot value, `None` when absent
    fn to_value(&self) -> Option<FieldValue>;
}

fn mismatch(expected: FieldType, value: &FieldValue) -> String {
    format!("expected {} value, got {}", expected, value.field_type())
}

fn require(value: Option<FieldValue>) -> std::result::Result<FieldValue, String> {
    value.ok_or_else(|| BLANK_REQUIRED_REASON.to_string())
}

impl BindValue for String {
    fn field_type() -> FieldType {
        FieldType::Text
    }

    fn from_value(value: Option<FieldValue>) -> std::result::Result<Self, String> {
        match require(value)? {
            FieldValue::Text(text) => Ok(text),
            other => Err(mismatch(FieldType::Text, &other)),
        }
    }

    fn to_value(&self) -> Option<FieldValue> {
        Some(FieldValue::Text(self.clone()))
    }
}

impl BindValue for i64 {
    fn field_type() -> FieldType {
        FieldType::Integer
    }

    fn from_value(value: Option<FieldValue>) -> std::result::Result<Self, String> {
        match require(value)? {
            FieldValue::Integer(number) => Ok(number),
            other => Err(mismatch(FieldType::Integer, &other)),
        }
    }

    fn to_value(&self) -> Option<FieldValue> {
        Some(FieldValue::Integer(*self))
    }
}

impl BindValue for i32 {
    fn field_type() -> FieldType {
        FieldType::Integer
    }

    fn from_value(value: Option<FieldValue>) -> std::result::Result<Self, String> {
        let number = i64::from_value(value)?;
        i32::try_from(number).map_err(|_| format!("{} does not fit in a 32-bit integer", number))
    }

    fn to_value(&self) -> Option<FieldValue> {
        Some(FieldValue::Integer(i64::from(*self)))
    }
}

impl BindValue for f64 {
    fn field_type() -> FieldType {
        FieldType::Float
    }

    fn from_value(value: Option<FieldValue>) -> std::result::Result<Self, String> {
        match require(value)? {
            FieldValue::Float(number) => Ok(number),
            // Integer values widen to float
            FieldValue::Integer(number) => Ok(number as f64),
            other => Err(mismatch(FieldType::Float, &other)),
        }
    }

    fn to_value(&self) -> Option<FieldValue> {
        Some(FieldValue::Float(*self))
    }
}

impl BindValue for bool {
    fn field_type() -> FieldType {
        FieldType::Boolean
    }

    fn from_value(value: Option<FieldValue>) -> std::result::Result<Self, String> {
        match require(value)? {
            FieldValue::Boolean(flag) => Ok(flag),
            other => Err(mismatch(FieldType::Boolean, &other)),
        }
    }

    fn to_value(&self) -> Option<FieldValue> {
        Some(FieldValue::Boolean(*self))
    }
}

impl BindValue for NaiveDate {
    fn field_type() -> FieldType {
        FieldType::Date
    }

    fn from_value(value: Option<FieldValue>) -> std::result::Result<Self, String> {
        match require(value)? {
            FieldValue::Date(date) => Ok(date),
            other => Err(mismatch(FieldType::Date, &other)),
        }
    }

    fn to_value(&self) -> Option<FieldValue> {
        Some(FieldValue::Date(*self))
    }
}

impl<V: BindValue> BindValue for Option<V> {
    fn field_type() -> FieldType {
        V::field_type()
    }

    fn from_value(value: Option<FieldValue>) -> std::result::Result<Self, String> {
        match value {
            None => Ok(None),
            Some(value) => V::from_value(Some(value)).map(Some),
        }
    }

    fn to_value(&self) -> Option<FieldValue> {
        self.as_ref().and_then(|value| value.to_value())
    }
}
