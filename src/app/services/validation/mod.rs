//! Record validation against declared field constraints
//!
//! Validation runs over records that have already been bound. Each field's
//! constraints are dispatched to the matching strategy and every failure
//! message is collected into a per-record set. Validation never aborts early:
//! unreadable fields and failed checks only ever add to the report.
//!
//! # Architecture
//!
//! - [`strategies`] - NotNull, Range and Regex checks and their dispatch
//! - [`validator`] - [`Validator`] and the [`ValidationReport`] it produces
//!
//! # Example Usage
//!
//! ```rust
//! use record_binder::app::schema::{FieldSet, Record};
//! use record_binder::app::services::validation::Validator;
//!
//! #[derive(Default)]
//! struct Reading {
//!     station: Option<String>,
//!     value: f64,
//! }
//!
//! impl Record for Reading {
//!     fn describe(fields: &mut FieldSet<Self>) {
//!         fields.field("station", |r| &r.station).not_null("station is required");
//!         fields.field("value", |r| &r.value).range(-50.0, 60.0, "value out of range");
//!     }
//! }
//!
//! # fn main() -> record_binder::Result<()> {
//! let readings = vec![
//!     Reading { station: Some("KEW".into()), value: 21.5 },
//!     Reading { station: None, value: 99.0 },
//! ];
//!
//! let report = Validator::new().validate(&readings)?;
//! assert_eq!(report.len(), 1);
//! assert_eq!(report.get(1).map(|m| m.len()), Some(2));
//! # Ok(())
//! # }
//! ```

pub mod strategies;
pub mod validator;

#[cfg(test)]
pub mod tests;

pub use strategies::{check, not_null, range, regex, unreadable};
pub use validator::{ValidationReport, Validator};
