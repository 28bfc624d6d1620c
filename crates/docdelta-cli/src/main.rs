//! docdelta CLI
//!
//! Command-line interface for building and sending minimal Solr update batches

use clap::{Parser, Subcommand, ValueEnum};
use docdelta_core::logging_facility::{init, Profile};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "docdelta")]
#[command(about = "docdelta - Minimal Solr update batches from CSV snapshots", long_about = None)]
struct Cli {
    /// Log output format (logs go to stderr)
    #[arg(long, value_enum, global = true, default_value_t = LogFormat::Dev)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogFormat {
    /// Human-readable
    Dev,
    /// JSON lines
    Json,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Diff CSV snapshots and send the update batch
    Update(commands::update::UpdateArgs),
}

fn main() {
    let cli = Cli::parse();

    init(match cli.log_format {
        LogFormat::Dev => Profile::Development,
        LogFormat::Json => Profile::Production,
    });

    let result = match cli.command {
        Commands::Update(args) => commands::update::execute(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
