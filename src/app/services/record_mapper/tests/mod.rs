//! Test utilities for record mapper testing
//!
//! Record fixtures live with the schema tests; this module adds mapper
//! construction helpers shared by the test modules below.

use std::sync::Arc;

pub use crate::app::schema::tests::{
    Audit, DottedPair, MockRecord, NoFileSource, TabSeparated, Transaction, create_temp_file,
};
use crate::app::services::diagnostics::CollectingDiagnostics;
use crate::app::services::record_mapper::RecordMapper;
use crate::config::MapperConfig;

mod mapper_tests;

/// Mapper wired to an in-memory diagnostics sink
pub fn create_observed_mapper() -> (RecordMapper, Arc<CollectingDiagnostics>) {
    let diagnostics = Arc::new(CollectingDiagnostics::new());
    let mapper = RecordMapper::new(MapperConfig::default()).with_diagnostics(diagnostics.clone());
    (mapper, diagnostics)
}

/// Transaction file with comments, blank lines and two malformed rows
pub fn create_transaction_file_content() -> String {
    r#"# transactions exported nightly
// format: id|amount|date
TX-1|120.50|2024-01-15

TX-2|not-a-number|2024-01-16
   # indented comment
TX-3|0|2024-01-17
TX-4|99.99
TX-5|15.25|2024-02-29
"#
    .to_string()
}
