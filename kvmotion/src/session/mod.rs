//! The frame-clocked recording session.
//!
//! Composes the frame clock, tracker multiplexer, sync signal, and
//! recorder into the per-tick loop:
//!
//! ```text
//! Setup ──► Armed ──► per tick:
//!   tick start ──► poll phase ──► classify (multiplexer)
//!     ├─ Standby / NoTrackerFound ──► append record
//!     └─ Tracking ──► sample mark button ──► pulse? append sync mark
//!   spin-wait until step elapsed ──► frame += 1
//! ──► Teardown (close recording)
//! ```
//!
//! The loop has no tracker-state terminal condition: it runs until the
//! external stop flag is raised or the runtime reports `Ended`. The stop
//! flag is checked at the tick boundary only, after the previous tick's
//! append completed, so the recording is always left structurally valid.

mod runner;
mod summary;

pub use runner::RecordingSession;
pub use summary::SessionSummary;

use thiserror::Error;

use crate::config::ConfigError;
use crate::recording::RecordingError;
use crate::tracker::TrackingError;

/// Fatal session errors.
///
/// Expected absence conditions (standby, no tracker located) are recorded
/// data and never appear here.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Invalid configuration, caught before the loop starts.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The tracking runtime failed; the session aborts.
    #[error("tracking runtime error: {0}")]
    Tracking(#[from] TrackingError),

    /// The recording file failed; the session aborts.
    #[error("recording error: {0}")]
    Recording(#[from] RecordingError),
}
