//! Record mapper for delimited text files
//!
//! This module binds the lines of a delimited file to a record type's
//! declared schema. Each surviving line is split on the literal delimiter,
//! its tokens are converted to the declared field types, and the resulting
//! record is appended in input order. A parsing mode decides whether a bad
//! line aborts the file or is skipped.
//!
//! ## Architecture
//!
//! - [`mapper`] - File traversal, comment/blank filtering and failure policy
//! - [`line_parser`] - Tokenizing one line and populating a record
//! - [`converter`] - Token to typed value conversion
//! - [`stats`] - Parsing statistics and result structures
//!
//! ## Usage
//!
//! ```rust,no_run
//! use record_binder::app::services::record_mapper::RecordMapper;
//! use record_binder::app::schema::{FieldSet, FileSource, Record};
//! use record_binder::config::ParsingMode;
//!
//! #[derive(Debug, Default)]
//! struct Reading {
//!     station: Option<String>,
//!     value: f64,
//! }
//!
//! impl Record for Reading {
//!     fn file_source() -> Option<FileSource> {
//!         Some(FileSource::new(";"))
//!     }
//!
//!     fn describe(fields: &mut FieldSet<Self>) {
//!         fields.column(0, "station", |r| &r.station, |r| &mut r.station);
//!         fields.column(1, "value", |r| &r.value, |r| &mut r.value);
//!     }
//! }
//!
//! # fn example() -> record_binder::Result<()> {
//! let mapper = RecordMapper::default();
//! let readings: Vec<Reading> =
//!     mapper.parse(std::path::Path::new("readings.txt"), ParsingMode::Lenient)?;
//! println!("Parsed {} readings", readings.len());
//! # Ok(())
//! # }
//! ```

pub mod converter;
pub mod line_parser;
pub mod mapper;
pub mod stats;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use converter::{ConversionError, convert, convert_with};
pub use line_parser::{parse_line, split_line};
pub use mapper::RecordMapper;
pub use stats::{ParseResult, ParseStats};
