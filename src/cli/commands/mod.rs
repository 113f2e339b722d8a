//! Command implementations for the record binder CLI
//!
//! Each command is implemented in its own module:
//! - `check`: parse and validate files against a schema document
//! - `schema`: show what a schema document resolves to

pub mod check;
pub mod schema;
pub mod shared;

pub use shared::CommandStats;

use crate::cli::args::{Args, Commands};

/// Dispatch to the selected subcommand
///
/// Returns `None` when no subcommand was given.
pub fn run(args: Args) -> Option<anyhow::Result<CommandStats>> {
    match args.command? {
        Commands::Check(check_args) => Some(check::run_check(check_args)),
        Commands::Schema(schema_args) => Some(schema::run_schema(schema_args)),
    }
}
