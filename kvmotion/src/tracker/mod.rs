//! Tracker roles, the hardware-facing runtime interface, and the per-tick
//! multiplexer that classifies each tick of the recording loop.
//!
//! # Design
//!
//! The multiplexer never talks to hardware directly. Everything that
//! touches a tracking runtime (OpenXR or otherwise) sits behind the
//! [`TrackingRuntime`] trait, so the whole recording loop can run against
//! the in-crate [`ScriptedRuntime`] in tests and dry runs.
//!
//! A tick is classified into exactly one [`TickOutcome`]:
//!
//! - `Standby` - the runtime session is not focused; no queries are made
//! - `NoTrackerFound` - focused, but no configured role produced a valid pose
//! - `Tracking` - at least one role located; carries the `(Role, Pose)` set
//!
//! "Nothing is tracked right now" is recorded data, never an error. Actual
//! runtime call failures are fatal to the session and surface as
//! [`TrackingError`].

mod multiplexer;
mod role;
mod runtime;
mod scripted;

pub use multiplexer::{TickOutcome, TrackerMultiplexer};
pub use role::Role;
pub use runtime::{
    DevicePath, Pose, SessionPhase, TrackerHandle, TrackingError, TrackingRuntime,
};
pub use scripted::{ScriptedRuntime, ScriptedTick};
