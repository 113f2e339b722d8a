//! Record Binder Library
//!
//! A Rust library for binding delimited text records to typed structs and
//! checking the bound values against declarative per-field constraints.
//!
//! This library provides tools for:
//! - Declaring record layouts (delimiter, comment prefixes, column bindings)
//! - Converting raw tokens to text, integer, float, boolean and date values
//! - Parsing whole files in strict or lenient mode with line statistics
//! - Validating records with NotNull, Range and Regex constraints
//! - Describing layouts at run time with TOML schema documents

pub mod config;
pub mod constants;
pub mod error;

// Core application modules
pub mod app {
    pub mod models;
    pub mod schema;
    pub mod services {
        pub mod diagnostics;
        pub mod record_mapper;
        pub mod validation;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{BindValue, FieldType, FieldValue};
pub use app::schema::{
    DynamicRecord, FieldSet, FileSource, Record, SchemaCache, SchemaDescriptor, SchemaDocument,
};
pub use app::services::diagnostics::{CollectingDiagnostics, Diagnostics, TracingDiagnostics};
pub use app::services::record_mapper::{ParseResult, ParseStats, RecordMapper};
pub use app::services::validation::{ValidationReport, Validator};
pub use config::{MapperConfig, ParsingMode};
pub use error::{Error, Result};
