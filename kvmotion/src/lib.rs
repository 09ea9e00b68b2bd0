//! KVMotion - fixed-rate motion-capture recording for spatial trackers
//!
//! This library drives a frame-clocked acquisition loop over a set of
//! role-mounted tracking devices (waist, feet, camera, ...) and appends a
//! compact classification of every non-nominal tick to an append-only
//! `.kvmotion` recording that can later be aligned against external video.
//!
//! # Architecture
//!
//! ```text
//! per tick:
//!   FrameClock ──► TrackingRuntime ──► TrackerMultiplexer ──► SyncSignal
//!   (tick start)   (session phase)     (classify tick)        (mark edges)
//!                                            │
//!                                            ▼
//!                                        Recorder
//!                                   (append-only .kvmotion)
//! ```
//!
//! The loop is single-threaded and synchronous: the only blocking call is
//! the frame clock's spin wait. Hardware access sits entirely behind the
//! [`tracker::TrackingRuntime`] trait; the crate ships a scripted
//! implementation for tests and dry runs.

pub mod clock;
pub mod config;
pub mod recording;
pub mod session;
pub mod sync;
pub mod tracker;

pub use clock::FrameClock;
pub use config::{ConfigError, ConfigFile, SessionConfig};
pub use recording::{EventKind, FrameRecord, Recorder, RecordingError, RecordingHeader};
pub use session::{RecordingSession, SessionError, SessionSummary};
pub use sync::{MarkButton, SignalSink, SyncEdge, SyncSignal};
pub use tracker::{
    Pose, Role, SessionPhase, TickOutcome, TrackerMultiplexer, TrackingError, TrackingRuntime,
};

/// Library version from Cargo.toml.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
