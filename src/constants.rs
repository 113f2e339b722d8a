//! Shared constants for schema declaration, conversion and validation.

/// Upper bound used by range constraints declared without an explicit maximum
pub const RANGE_DEFAULT_MAX: f64 = 999_999_999.00;

/// Comment prefix applied when a file source declares none
pub const DEFAULT_COMMENT_PREFIX: &str = "#";

// Default constraint messages
pub const DEFAULT_NOT_NULL_MESSAGE: &str = "Value is required!";
pub const DEFAULT_RANGE_MESSAGE: &str = "Out of range!";
pub const DEFAULT_REGEX_MESSAGE: &str = "Invalid format!";

/// Boolean literals accepted by the converter (case-insensitive)
pub const TRUE_LITERAL: &str = "true";
pub const FALSE_LITERAL: &str = "false";

/// Reason attached to conversion failures for blank tokens in non-optional slots
pub const BLANK_REQUIRED_REASON: &str = "blank value for non-optional field";

/// Default cap on error strings retained in parse statistics
pub const DEFAULT_MAX_RECORDED_ERRORS: usize = 100;

/// Upper limit accepted for `max_recorded_errors`
pub const MAX_RECORDED_ERRORS_LIMIT: usize = 1_000_000;
