//! Record command - run a recording session until stopped.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use clap::Args;
use tracing::debug;

use kvmotion::tracker::ScriptedRuntime;
use kvmotion::{ConfigFile, RecordingSession, SessionConfig};

use super::common::{resolve_frame_rate, resolve_output, resolve_roles, RoleArg};
use crate::error::CliError;
use crate::sink::{ConsoleSink, EnterMarkButton};

/// Arguments for the record command.
#[derive(Debug, Args)]
pub struct RecordArgs {
    /// Output recording file [default: recording.kvmotion, or the
    /// config-file output_dir]
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Target frame rate in ticks per second. Recording at twice the
    /// video frame rate makes alignment easier (48 for 24fps footage).
    #[arg(long)]
    pub fps: Option<f64>,

    /// Track only these roles (repeatable) [default: all roles, or the
    /// config-file selection]
    #[arg(long = "role", value_enum)]
    pub roles: Vec<RoleArg>,

    /// Explicit config.ini path [default: platform config directory]
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Run the record command.
pub fn run(args: RecordArgs) -> Result<(), CliError> {
    let config_file = ConfigFile::load_or_default(args.config.as_deref())?;

    // CLI > config file > default, resolved before anything is armed.
    let frame_rate = resolve_frame_rate(args.fps, &config_file);
    let output = resolve_output(args.output, &config_file);
    let roles = resolve_roles(&args.roles, &config_file);

    let config = SessionConfig::new(frame_rate, output.clone()).with_roles(roles.clone());
    config.validate().map_err(CliError::Setup)?;
    debug!(frame_rate, roles = roles.len(), "session configuration resolved");

    // Print banner
    println!("KVMotion Recorder v{}", kvmotion::VERSION);
    println!("=====================");
    println!();
    println!("Output:     {}", output.display());
    println!("Frame rate: {} fps", frame_rate);
    let role_names: Vec<&str> = roles.iter().map(|r| r.as_str()).collect();
    println!("Roles:      {}", role_names.join(", "));
    println!();
    println!("Press [ENTER] to drop a sync mark (clapperboard)");
    println!("Press Ctrl+C to stop recording");
    println!();

    // Set up the stop signal for graceful shutdown. The flag is read at
    // tick boundaries, so the file always ends on a complete record.
    let stop = Arc::new(AtomicBool::new(false));
    let stop_clone = stop.clone();

    ctrlc::set_handler(move || {
        println!();
        println!("Received stop signal, finishing current tick...");
        stop_clone.store(true, Ordering::SeqCst);
    })
    .map_err(|e| CliError::Config(format!("Failed to set signal handler: {}", e)))?;

    // TODO: swap in an OpenXR-backed TrackingRuntime once the hardware
    // binding lands; until then every role reports as located.
    let runtime = ScriptedRuntime::steady(&roles);
    let sink = ConsoleSink::new();
    let button = EnterMarkButton::spawn();

    let session = RecordingSession::new(&config, runtime, sink, button)?;
    let summary = session.run(&stop)?;

    // Print final session summary
    println!();
    println!("Session Summary");
    println!("───────────────");
    println!("  {}", summary);
    println!("  Saved to {}", output.display());
    Ok(())
}
