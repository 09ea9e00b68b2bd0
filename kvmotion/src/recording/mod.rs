//! The `.kvmotion` recording format: writer, reader, and line grammar.
//!
//! A recording is a plain-text file - a fixed header followed by an
//! append-only stream of event lines keyed by frame index:
//!
//! ```text
//! KiVi.recording
//! #version=1
//! #type=raw
//!
//! #step=0.020833333333333332
//! #start_time=1724900000.125
//! !recording below
//! @0~standby
//! @57~no_tracker
//! @90~sync
//! ```
//!
//! Absence of a line for a frame index is itself meaningful: the tick was
//! nominal (session focused, at least one tracker located, no sync mark).
//! Readers must treat unrecognized event kinds as forward-compatible
//! unknowns, never as errors.

mod format;
mod reader;
mod writer;

pub use format::{
    EventKind, FrameRecord, RecordingHeader, FORMAT_TYPE, FORMAT_VERSION, MAGIC,
    RECORDING_EXTENSION, STREAM_MARKER,
};
pub use reader::{parse, read_file, Recording};
pub use writer::Recorder;

use std::io;

use thiserror::Error;

/// Errors from writing or parsing a recording.
#[derive(Debug, Error)]
pub enum RecordingError {
    /// I/O failure on the recording file.
    #[error("recording I/O error: {0}")]
    Io(#[from] io::Error),

    /// Append or close after the recording was finalized.
    #[error("recording is already closed")]
    Closed,

    /// The file does not start with the format magic line.
    #[error("not a kvmotion recording (expected leading `{MAGIC}` line)")]
    BadMagic,

    /// The header ended before all required fields were seen.
    #[error("recording header is missing the `{0}` field")]
    MissingField(&'static str),

    /// A header field failed to parse.
    #[error("invalid header field {key}: {value:?}")]
    BadField { key: &'static str, value: String },

    /// An event line did not match the `@<frame>~<kind>` grammar.
    #[error("malformed event line {line_no}: {line:?}")]
    MalformedEvent { line_no: usize, line: String },
}
