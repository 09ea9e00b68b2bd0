//! Append-only recording writer.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::format::{FrameRecord, FORMAT_TYPE, FORMAT_VERSION, MAGIC, STREAM_MARKER};
use super::RecordingError;

/// Sole writer of a recording file.
///
/// Created once at session start; the full header is on disk before
/// `create` returns, so the file is structurally valid (header plus N
/// complete records) at every point of the session. Records are buffered
/// between appends and made durable by [`Recorder::close`].
#[derive(Debug)]
pub struct Recorder {
    writer: BufWriter<File>,
    path: PathBuf,
    last_index: Option<u64>,
    records_written: u64,
    closed: bool,
}

impl Recorder {
    /// Create the recording file and write the complete header.
    ///
    /// `step_seconds` is the configured tick step, `start_time` the
    /// wall-clock session start in unix seconds. Any failure here is
    /// fatal: recording cannot proceed without a destination.
    pub fn create(
        path: &Path,
        step_seconds: f64,
        start_time: f64,
    ) -> Result<Self, RecordingError> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);

        writeln!(writer, "{}", MAGIC)?;
        writeln!(writer, "#version={}", FORMAT_VERSION)?;
        writeln!(writer, "#type={}", FORMAT_TYPE)?;
        writeln!(writer)?;
        writeln!(writer, "#step={}", step_seconds)?;
        writeln!(writer, "#start_time={}", start_time)?;
        writeln!(writer, "{}", STREAM_MARKER)?;
        // The header must be durable before the first record.
        writer.flush()?;

        info!(path = %path.display(), step_seconds, "recording created");
        Ok(Self {
            writer,
            path: path.to_path_buf(),
            last_index: None,
            records_written: 0,
            closed: false,
        })
    }

    /// Append one event line.
    ///
    /// Frame indices must arrive strictly increasing; the session loop
    /// guarantees this by construction.
    pub fn append(&mut self, record: &FrameRecord) -> Result<(), RecordingError> {
        if self.closed {
            return Err(RecordingError::Closed);
        }
        debug_assert!(
            self.last_index.map_or(true, |last| record.frame_index > last),
            "frame indices must be strictly increasing"
        );

        writeln!(self.writer, "{}", record.to_line())?;
        debug!(frame = record.frame_index, kind = %record.kind, "record appended");
        self.last_index = Some(record.frame_index);
        self.records_written += 1;
        Ok(())
    }

    /// Flush buffered records and sync the file to stable storage.
    ///
    /// Idempotent; after the first call no further appends are valid.
    pub fn close(&mut self) -> Result<(), RecordingError> {
        if self.closed {
            return Ok(());
        }
        self.writer.flush()?;
        self.writer.get_ref().sync_all()?;
        self.closed = true;
        info!(
            path = %self.path.display(),
            records = self.records_written,
            "recording closed"
        );
        Ok(())
    }

    /// Path of the recording file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of records appended so far.
    pub fn records_written(&self) -> u64 {
        self.records_written
    }

    /// Whether the recording has been finalized.
    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

impl Drop for Recorder {
    fn drop(&mut self) {
        // Best-effort flush if the session aborted without a clean close.
        if !self.closed {
            let _ = self.writer.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::fs;

    use tempfile::tempdir;

    #[test]
    fn test_header_written_before_any_record() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("take.kvmotion");

        let mut recorder = Recorder::create(&path, 0.1, 1724900000.5).unwrap();
        recorder.close().unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(
            lines,
            vec![
                "KiVi.recording",
                "#version=1",
                "#type=raw",
                "",
                "#step=0.1",
                "#start_time=1724900000.5",
                "!recording below",
            ]
        );
    }

    #[test]
    fn test_header_durable_without_close() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("take.kvmotion");

        let _recorder = Recorder::create(&path, 0.02, 0.0).unwrap();
        // Not closed yet - the header must already be on disk.
        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("KiVi.recording\n"));
        assert!(contents.ends_with("!recording below\n"));
    }

    #[test]
    fn test_appends_one_line_per_record() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("take.kvmotion");

        let mut recorder = Recorder::create(&path, 0.1, 0.0).unwrap();
        recorder.append(&FrameRecord::standby(0)).unwrap();
        recorder.append(&FrameRecord::no_tracker(3)).unwrap();
        recorder.append(&FrameRecord::sync_mark(7)).unwrap();
        recorder.close().unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        let events: Vec<&str> = contents
            .lines()
            .skip_while(|line| *line != "!recording below")
            .skip(1)
            .collect();
        assert_eq!(events, vec!["@0~standby", "@3~no_tracker", "@7~sync"]);
        assert_eq!(recorder.records_written(), 3);
    }

    #[test]
    fn test_append_after_close_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("take.kvmotion");

        let mut recorder = Recorder::create(&path, 0.1, 0.0).unwrap();
        recorder.close().unwrap();

        let result = recorder.append(&FrameRecord::standby(0));
        assert!(matches!(result, Err(RecordingError::Closed)));
    }

    #[test]
    fn test_close_is_idempotent() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("take.kvmotion");

        let mut recorder = Recorder::create(&path, 0.1, 0.0).unwrap();
        recorder.close().unwrap();
        recorder.close().unwrap();
        assert!(recorder.is_closed());
    }

    #[test]
    fn test_create_fails_on_unwritable_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("take.kvmotion");

        let result = Recorder::create(&path, 0.1, 0.0);
        assert!(matches!(result, Err(RecordingError::Io(_))));
    }
}
