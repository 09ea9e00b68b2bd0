//! Header constants, event kinds, and the event-line grammar.

use std::fmt;

use super::RecordingError;

/// Leading magic line identifying the format.
pub const MAGIC: &str = "KiVi.recording";

/// Current format version written to new recordings.
pub const FORMAT_VERSION: u32 = 1;

/// Recording type written to new recordings.
pub const FORMAT_TYPE: &str = "raw";

/// Literal line separating the header from the event stream.
pub const STREAM_MARKER: &str = "!recording below";

/// Canonical file extension (without the dot).
pub const RECORDING_EXTENSION: &str = "kvmotion";

/// Classification carried by one event line.
///
/// `Unknown` preserves kinds written by newer format revisions; parsing
/// never fails on an unrecognized name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    /// The tracking session was not focused during the tick.
    Standby,
    /// The session was focused but no tracker was located.
    NoTrackerFound,
    /// An operator sync mark (clapperboard) landed on the tick.
    SyncMark,
    /// A kind this reader does not know; carried through verbatim.
    Unknown(String),
}

impl EventKind {
    /// The name used on the wire.
    pub fn as_wire(&self) -> &str {
        match self {
            EventKind::Standby => "standby",
            EventKind::NoTrackerFound => "no_tracker",
            EventKind::SyncMark => "sync",
            EventKind::Unknown(name) => name,
        }
    }

    /// Map a wire name to a kind. Unrecognized names are preserved.
    pub fn from_wire(name: &str) -> EventKind {
        match name {
            "standby" => EventKind::Standby,
            "no_tracker" => EventKind::NoTrackerFound,
            "sync" => EventKind::SyncMark,
            other => EventKind::Unknown(other.to_string()),
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_wire())
    }
}

/// One durable log entry: a tick tagged with a non-nominal classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameRecord {
    /// Tick counter value at which the record was emitted.
    pub frame_index: u64,
    /// Classification of the tick.
    pub kind: EventKind,
}

impl FrameRecord {
    pub fn new(frame_index: u64, kind: EventKind) -> Self {
        Self { frame_index, kind }
    }

    pub fn standby(frame_index: u64) -> Self {
        Self::new(frame_index, EventKind::Standby)
    }

    pub fn no_tracker(frame_index: u64) -> Self {
        Self::new(frame_index, EventKind::NoTrackerFound)
    }

    pub fn sync_mark(frame_index: u64) -> Self {
        Self::new(frame_index, EventKind::SyncMark)
    }

    /// Render as an event line, without the trailing newline.
    pub fn to_line(&self) -> String {
        format!("@{}~{}", self.frame_index, self.kind)
    }

    /// Parse an event line of the form `@<frame_index>~<kind>`.
    pub fn parse_line(line: &str, line_no: usize) -> Result<Self, RecordingError> {
        let malformed = || RecordingError::MalformedEvent {
            line_no,
            line: line.to_string(),
        };

        let body = line.strip_prefix('@').ok_or_else(malformed)?;
        let (index, kind) = body.split_once('~').ok_or_else(malformed)?;
        let frame_index: u64 = index.parse().map_err(|_| malformed())?;
        if kind.is_empty() {
            return Err(malformed());
        }
        Ok(Self::new(frame_index, EventKind::from_wire(kind)))
    }
}

/// Parsed header of a recording.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordingHeader {
    /// Format version declared by the file.
    pub version: u32,
    /// Recording type (currently always `raw`).
    pub format_type: String,
    /// Declared step duration between ticks, in seconds.
    pub step_seconds: f64,
    /// Wall-clock start of the session, in unix seconds.
    pub start_time: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_kind_wire_names() {
        assert_eq!(EventKind::Standby.as_wire(), "standby");
        assert_eq!(EventKind::NoTrackerFound.as_wire(), "no_tracker");
        assert_eq!(EventKind::SyncMark.as_wire(), "sync");
    }

    #[test]
    fn test_unknown_kind_is_preserved() {
        let kind = EventKind::from_wire("pose_burst");
        assert_eq!(kind, EventKind::Unknown("pose_burst".to_string()));
        assert_eq!(kind.as_wire(), "pose_burst");
    }

    #[test]
    fn test_record_line_rendering() {
        assert_eq!(FrameRecord::standby(0).to_line(), "@0~standby");
        assert_eq!(FrameRecord::no_tracker(57).to_line(), "@57~no_tracker");
        assert_eq!(FrameRecord::sync_mark(90).to_line(), "@90~sync");
    }

    #[test]
    fn test_parse_line_roundtrip() {
        for record in [
            FrameRecord::standby(0),
            FrameRecord::no_tracker(1234),
            FrameRecord::sync_mark(u64::MAX),
        ] {
            let parsed = FrameRecord::parse_line(&record.to_line(), 1).unwrap();
            assert_eq!(parsed, record);
        }
    }

    #[test]
    fn test_parse_line_rejects_malformed() {
        for line in ["", "@", "@~standby", "@12", "@12~", "12~standby", "@x~standby"] {
            let result = FrameRecord::parse_line(line, 9);
            assert!(
                matches!(result, Err(RecordingError::MalformedEvent { line_no: 9, .. })),
                "line {:?} should be rejected",
                line
            );
        }
    }
}
