//! End-of-session counters for operator feedback.

use std::fmt;
use std::time::Duration;

/// Point-in-time summary of a completed (or aborted) session.
///
/// Counted live by the loop; a nominal tick is one that produced no
/// record at all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionSummary {
    /// Total ticks completed.
    pub ticks: u64,
    /// Ticks spent in the inactive phase.
    pub standby_ticks: u64,
    /// Active ticks on which no tracker was located.
    pub no_tracker_ticks: u64,
    /// Operator sync marks recorded.
    pub sync_marks: u64,
    /// Records appended to the file (standby + no-tracker + sync marks).
    pub records_written: u64,
    /// Wall-clock duration of the session.
    pub elapsed: Duration,
}

impl SessionSummary {
    /// Ticks with at least one tracker located.
    pub fn nominal_ticks(&self) -> u64 {
        self.ticks - self.standby_ticks - self.no_tracker_ticks
    }
}

impl fmt::Display for SessionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ticks ({} tracking, {} standby, {} no-tracker), {} sync marks, {} records in {:.1}s",
            self.ticks,
            self.nominal_ticks(),
            self.standby_ticks,
            self.no_tracker_ticks,
            self.sync_marks,
            self.records_written,
            self.elapsed.as_secs_f64()
        )
    }
}
