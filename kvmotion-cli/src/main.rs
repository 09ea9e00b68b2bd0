//! KVMotion CLI - record tracker motion and inspect recordings.

mod commands;
mod error;
mod sink;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "kvmotion",
    version,
    about = "Record the motion of role-mounted spatial trackers into .kvmotion files"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start a recording session
    Record(commands::record::RecordArgs),
    /// Inspect an existing .kvmotion recording
    Info(commands::info::InfoArgs),
}

fn main() {
    // Logs go to stderr so the banner and summary stay clean on stdout.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Command::Record(args) => commands::record::run(args),
        Command::Info(args) => commands::info::run(args),
    };

    if let Err(e) = result {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
