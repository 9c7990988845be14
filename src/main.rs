use clap::Parser;
use std::process;
use vision_screening::cli::{args::Args, commands};

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Failed to create async runtime: {}", e);
        process::exit(1);
    });

    match runtime.block_on(commands::run(args)) {
        Ok(stats) if stats.is_success() => process::exit(0),
        Ok(_stats) => {
            // Per-file failures have already been reported by the command
            process::exit(1);
        }
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("Vision Screening - device export parser and upload service");
    println!("==========================================================");
    println!();
    println!("Reads the semicolon-delimited v1 exports written by vision screening");
    println!("devices. A document either parses completely or is rejected with the");
    println!("line and column of the first offending token.");
    println!();
    println!("USAGE:");
    println!("    vision-screening <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    check       Parse export files and report which ones are valid");
    println!("    render      Parse one export and print its records");
    println!("    serve       Run the HTTP upload service");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("OPTIONS:");
    println!("    -v, --verbose    Increase logging verbosity");
    println!("    -q, --quiet      Suppress output except errors");
    println!("    -h, --help       Show help information");
    println!("    -V, --version    Show version information");
    println!();
    println!("EXAMPLES:");
    println!("    # Check every export below a directory:");
    println!("    vision-screening check ./exports");
    println!();
    println!("    # Print one export as JSON lines:");
    println!("    vision-screening render ./exports/school.csv --format json");
    println!();
    println!("    # Accept uploads on all interfaces:");
    println!("    vision-screening serve --bind 0.0.0.0:9000 --assets-dir ./public");
    println!();
    println!("For detailed help on any command, use:");
    println!("    vision-screening <COMMAND> --help");
}
