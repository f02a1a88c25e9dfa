use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
use commands::report::{handle_report_command, handle_show_command};

/// A CLI for the vacancy salary statistics pipeline.
#[derive(Parser, Debug)]
#[command(author, version, about = "Vacancy salary statistics over CSV exports", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Aggregate an input file and write the report artifacts.
    Report(ReportArgs),
    /// Aggregate an input file and print the summary tables.
    Show(ShowArgs),
}

#[derive(Args, Debug)]
struct ReportArgs {
    /// CSV file of vacancy records.
    #[arg(short, long)]
    input: PathBuf,

    /// Profession name; the filtered series match titles containing it.
    #[arg(short, long)]
    profession: String,

    /// Directory the report artifacts are written into.
    #[arg(long, default_value = "reports")]
    out_dir: PathBuf,
}

#[derive(Args, Debug)]
struct ShowArgs {
    /// CSV file of vacancy records.
    #[arg(short, long)]
    input: PathBuf,

    /// Profession name; the filtered series match titles containing it.
    #[arg(short, long)]
    profession: String,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Report(args) => handle_report_command(args),
        Command::Show(args) => handle_show_command(args),
    }
}
