//! Info command - parse a recording and print its summary.

use std::path::PathBuf;

use chrono::DateTime;
use clap::Args;

use kvmotion::recording::{self, EventKind};

use crate::error::CliError;

/// Arguments for the info command.
#[derive(Debug, Args)]
pub struct InfoArgs {
    /// Recording file to inspect
    pub file: PathBuf,
}

/// Run the info command.
pub fn run(args: InfoArgs) -> Result<(), CliError> {
    let recording = recording::read_file(&args.file)?;
    let header = &recording.header;

    println!("{}", args.file.display());
    println!("  format version: {}", header.version);
    println!("  type:           {}", header.format_type);
    println!(
        "  step:           {}s ({:.2} fps)",
        header.step_seconds,
        1.0 / header.step_seconds
    );
    println!(
        "  start time:     {} ({})",
        format_start_time(header.start_time),
        header.start_time
    );
    println!();

    let standby = recording.count_kind(&EventKind::Standby);
    let no_tracker = recording.count_kind(&EventKind::NoTrackerFound);
    let sync_marks = recording.count_kind(&EventKind::SyncMark);
    let unknown = recording
        .records
        .iter()
        .filter(|r| matches!(r.kind, EventKind::Unknown(_)))
        .count();

    println!("  events:         {}", recording.records.len());
    println!("    standby:      {}", standby);
    println!("    no tracker:   {}", no_tracker);
    println!("    sync marks:   {}", sync_marks);
    if unknown > 0 {
        println!("    unknown:      {}", unknown);
    }

    if let Some(last) = recording.last_frame_index() {
        let covered = (last + 1) as f64 * header.step_seconds;
        println!();
        println!("  last event at frame {} (≥ {:.1}s of recording)", last, covered);
    }

    Ok(())
}

/// Render a unix-seconds timestamp as UTC, falling back to the raw value
/// for timestamps outside chrono's range.
fn format_start_time(unix_seconds: f64) -> String {
    let secs = unix_seconds.floor() as i64;
    let nanos = ((unix_seconds - secs as f64) * 1e9) as u32;
    match DateTime::from_timestamp(secs, nanos) {
        Some(datetime) => datetime.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        None => format!("{}", unix_seconds),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_start_time() {
        let text = format_start_time(0.0);
        assert_eq!(text, "1970-01-01 00:00:00 UTC");
    }

    #[test]
    fn test_format_start_time_out_of_range_falls_back() {
        let text = format_start_time(1e18);
        assert_eq!(text, "1000000000000000000");
    }
}
