//! The hardware-facing tracking interface.
//!
//! `TrackingRuntime` is the seam between the recording loop and whatever
//! tracking stack actually locates devices. The loop only ever sees this
//! trait; binding it to OpenXR (or anything else) is glue that lives
//! outside the core.
//!
//! Every method is fallible, and any failure is fatal to the session:
//! enumeration and query calls are assumed to fail atomically for the
//! whole device set, so a partial-role failure is not distinguished from
//! total session failure. No call is retried.

use std::fmt;
use std::time::Duration;

use thiserror::Error;

use super::role::Role;

/// Readiness state of the tracking runtime, polled once per tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Pre-focus or suspended; pose queries are invalid in this phase.
    Inactive,
    /// Focused and eligible to poll trackers.
    Active,
    /// The runtime session is over; the recording loop terminates.
    Ended,
}

/// A position + orientation sample with a validity flag.
///
/// Poses are transient: they are observed each tick for logging and sync
/// evaluation but never persisted to the recording. Only their
/// presence or absence is durable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    /// Position in meters, tracking-space coordinates.
    pub position: [f32; 3],
    /// Orientation quaternion `[x, y, z, w]`.
    pub orientation: [f32; 4],
    /// Whether the sample carries valid tracking data.
    pub valid: bool,
}

impl Pose {
    /// A valid pose at the given position and orientation.
    pub fn located(position: [f32; 3], orientation: [f32; 4]) -> Self {
        Self {
            position,
            orientation,
            valid: true,
        }
    }

    /// An invalid sample: the device was not located this tick.
    pub fn not_located() -> Self {
        Self {
            position: [0.0; 3],
            orientation: [0.0, 0.0, 0.0, 1.0],
            valid: false,
        }
    }
}

/// An owned, typed device-path value returned by enumeration.
///
/// The set of physically present devices can change between ticks as
/// trackers connect and disconnect; each enumeration returns a fresh
/// owned sequence, never a reused buffer.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DevicePath(String);

impl DevicePath {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DevicePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque per-role spatial-query handle.
///
/// Created once per configured role during session setup, owned
/// exclusively by the multiplexer for the session lifetime, and released
/// when the multiplexer is dropped. The binding is by role, not by
/// physical device, so a handle stays valid across device reconnects.
#[derive(Debug)]
pub struct TrackerHandle {
    role: Role,
    id: u64,
}

impl TrackerHandle {
    /// Create a handle. Called by `TrackingRuntime` implementations only.
    pub fn new(role: Role, id: u64) -> Self {
        Self { role, id }
    }

    /// The role this handle queries.
    pub fn role(&self) -> Role {
        self.role
    }

    /// Runtime-assigned identifier, opaque to the loop.
    pub fn id(&self) -> u64 {
        self.id
    }
}

/// Errors reported by the tracking runtime. All are fatal to the session.
#[derive(Debug, Error)]
pub enum TrackingError {
    /// Session phase query failed.
    #[error("session phase query failed: {0}")]
    Phase(String),

    /// Action-set synchronization failed.
    #[error("action sync failed: {0}")]
    SyncActions(String),

    /// Device-path enumeration failed.
    #[error("device enumeration failed: {0}")]
    Enumeration(String),

    /// Creating a per-role query handle failed.
    #[error("failed to create query handle for role {role}: {reason}")]
    CreateHandle { role: Role, reason: String },

    /// A pose query failed (distinct from an invalid pose, which is data).
    #[error("pose query failed for role {role}: {reason}")]
    Locate { role: Role, reason: String },
}

/// Interface to the external tracking stack.
///
/// One implementation drives one session. Calls arrive in a fixed order
/// each tick: `session_phase`, then (in the active phase only)
/// `sync_actions`, `enumerate_device_paths`, and one `locate` per
/// configured role.
pub trait TrackingRuntime {
    /// Report the runtime's current readiness state. Polled once per tick.
    fn session_phase(&mut self) -> Result<SessionPhase, TrackingError>;

    /// The configured roles in canonical evaluation order.
    fn enumerate_roles(&self) -> Result<Vec<Role>, TrackingError>;

    /// Create the spatial-query handle for a role. Called once per role
    /// at session setup.
    fn create_handle(&mut self, role: Role) -> Result<TrackerHandle, TrackingError>;

    /// Synchronize the input action set for this tick. Idempotent within
    /// a tick; required before any pose query.
    fn sync_actions(&mut self) -> Result<(), TrackingError>;

    /// Enumerate the device paths of all currently connected trackers.
    fn enumerate_device_paths(&mut self) -> Result<Vec<DevicePath>, TrackingError>;

    /// Query the pose of a role at the predicted sample time (time since
    /// session start). An unlocated device is a valid result with
    /// `pose.valid == false`, not an error.
    fn locate(
        &mut self,
        handle: &TrackerHandle,
        predicted_time: Duration,
    ) -> Result<Pose, TrackingError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pose_constructors() {
        let located = Pose::located([1.0, 2.0, 3.0], [0.0, 0.0, 0.0, 1.0]);
        assert!(located.valid);
        assert_eq!(located.position, [1.0, 2.0, 3.0]);

        let missing = Pose::not_located();
        assert!(!missing.valid);
    }

    #[test]
    fn test_handle_exposes_role() {
        let handle = TrackerHandle::new(Role::Chest, 7);
        assert_eq!(handle.role(), Role::Chest);
        assert_eq!(handle.id(), 7);
    }

    #[test]
    fn test_tracking_error_messages() {
        let err = TrackingError::Locate {
            role: Role::Waist,
            reason: "runtime lost".to_string(),
        };
        let text = err.to_string();
        assert!(text.contains("waist"));
        assert!(text.contains("runtime lost"));
    }
}
