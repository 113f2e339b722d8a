use clap::Parser;
use record_binder::cli::{args::Args, commands};
use std::process;

fn main() {
    let args = Args::parse();

    let Some(result) = commands::run(args) else {
        show_help_and_commands();
        process::exit(0);
    };

    match result {
        Ok(stats) if stats.is_success() => process::exit(0),
        // Invalid records or failed files; the report has already been printed
        Ok(_) => process::exit(1),
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

/// Show help information when no subcommand is provided
fn show_help_and_commands() {
    println!("Record Binder - Delimited Record Parser and Validator");
    println!("====================================================");
    println!();
    println!("Bind delimited text files to typed records described by a TOML schema");
    println!("and check every record against the schema's field constraints.");
    println!();
    println!("USAGE:");
    println!("    record-binder <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    check       Parse and validate files against a schema document");
    println!("    schema      Show the bindings a schema document resolves to");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("EXAMPLES:");
    println!("    # Strictly check one file:");
    println!("    record-binder check --schema customers.toml customers.csv");
    println!();
    println!("    # Skip malformed lines and report as JSON:");
    println!("    record-binder check -s events.toml --mode lenient --format json 'logs/*.txt'");
    println!();
    println!("    # Inspect a schema document:");
    println!("    record-binder schema --schema customers.toml");
    println!();
    println!("For detailed help on any command, use:");
    println!("    record-binder <COMMAND> --help");
}
