//! Recording parser: header plus ordered event stream.
//!
//! The reader is deliberately forgiving where the format allows growth
//! (unknown header fields, unknown event kinds) and strict where the
//! grammar is load-bearing (magic line, required header fields, event
//! line shape).

use std::fs;
use std::path::Path;

use super::format::{EventKind, FrameRecord, RecordingHeader, MAGIC, STREAM_MARKER};
use super::RecordingError;

/// A fully parsed recording.
#[derive(Debug, Clone, PartialEq)]
pub struct Recording {
    pub header: RecordingHeader,
    pub records: Vec<FrameRecord>,
}

impl Recording {
    /// Count records of a given kind.
    pub fn count_kind(&self, kind: &EventKind) -> usize {
        self.records.iter().filter(|r| &r.kind == kind).count()
    }

    /// Frame index of the last record, if any.
    pub fn last_frame_index(&self) -> Option<u64> {
        self.records.last().map(|r| r.frame_index)
    }
}

/// Read and parse a recording file.
pub fn read_file(path: &Path) -> Result<Recording, RecordingError> {
    let text = fs::read_to_string(path)?;
    parse(&text)
}

/// Parse recording text.
pub fn parse(text: &str) -> Result<Recording, RecordingError> {
    let mut lines = text.lines().enumerate();

    match lines.next() {
        Some((_, line)) if line == MAGIC => {}
        _ => return Err(RecordingError::BadMagic),
    }

    let mut version: Option<u32> = None;
    let mut format_type: Option<String> = None;
    let mut step_seconds: Option<f64> = None;
    let mut start_time: Option<f64> = None;
    let mut saw_marker = false;

    for (index, line) in &mut lines {
        if line == STREAM_MARKER {
            saw_marker = true;
            break;
        }
        if line.is_empty() {
            continue;
        }
        let Some(field) = line.strip_prefix('#') else {
            return Err(RecordingError::MalformedEvent {
                line_no: index + 1,
                line: line.to_string(),
            });
        };
        let Some((key, value)) = field.split_once('=') else {
            continue; // bare comment line, not a field
        };
        match key {
            "version" => {
                version = Some(value.parse().map_err(|_| RecordingError::BadField {
                    key: "version",
                    value: value.to_string(),
                })?);
            }
            "type" => format_type = Some(value.to_string()),
            "step" => {
                step_seconds = Some(value.parse().map_err(|_| RecordingError::BadField {
                    key: "step",
                    value: value.to_string(),
                })?);
            }
            "start_time" => {
                start_time = Some(value.parse().map_err(|_| RecordingError::BadField {
                    key: "start_time",
                    value: value.to_string(),
                })?);
            }
            // Unknown header fields belong to newer revisions; skip them.
            _ => {}
        }
    }

    if !saw_marker {
        return Err(RecordingError::MissingField("recording marker"));
    }

    let header = RecordingHeader {
        version: version.ok_or(RecordingError::MissingField("version"))?,
        format_type: format_type.ok_or(RecordingError::MissingField("type"))?,
        step_seconds: step_seconds.ok_or(RecordingError::MissingField("step"))?,
        start_time: start_time.ok_or(RecordingError::MissingField("start_time"))?,
    };

    let mut records = Vec::new();
    for (index, line) in lines {
        if line.is_empty() {
            continue;
        }
        records.push(FrameRecord::parse_line(line, index + 1)?);
    }

    Ok(Recording { header, records })
}
