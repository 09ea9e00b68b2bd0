//! Per-tick tracker polling and tick classification.

use std::time::Duration;

use tracing::{debug, info};

use super::role::Role;
use super::runtime::{DevicePath, Pose, SessionPhase, TrackerHandle, TrackingError, TrackingRuntime};

/// Classification of a single tick of the recording loop.
///
/// At most one outcome is produced per tick, regardless of how many roles
/// were unlocated; the recorder maps non-nominal outcomes onto file
/// records and writes nothing for `Tracking` ticks.
#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    /// The runtime session is not focused; no trackers were queried.
    Standby,
    /// The session is focused but no configured role was located.
    NoTrackerFound,
    /// Nominal: at least one role located, with the observed poses in
    /// canonical role order.
    Tracking(Vec<(Role, Pose)>),
}

impl TickOutcome {
    /// Whether this tick produces no file record.
    pub fn is_nominal(&self) -> bool {
        matches!(self, TickOutcome::Tracking(_))
    }
}

/// Polls every configured role once per tick and aggregates the result.
///
/// The multiplexer owns the per-role query handles for the session
/// lifetime. It also remembers the last-seen device-path set so that
/// connects and disconnects between ticks show up in the log exactly once.
#[derive(Debug)]
pub struct TrackerMultiplexer {
    handles: Vec<TrackerHandle>,
    known_devices: Vec<DevicePath>,
}

impl TrackerMultiplexer {
    /// Establish query handles for every role the runtime reports.
    ///
    /// Called once during session setup; any failure aborts the session
    /// before the recording file is touched.
    pub fn bind<R: TrackingRuntime>(runtime: &mut R) -> Result<Self, TrackingError> {
        let roles = runtime.enumerate_roles()?;
        let mut handles = Vec::with_capacity(roles.len());
        for role in &roles {
            handles.push(runtime.create_handle(*role)?);
        }
        info!(roles = handles.len(), "tracker query handles established");
        Ok(Self {
            handles,
            known_devices: Vec::new(),
        })
    }

    /// The configured roles in evaluation order.
    pub fn roles(&self) -> Vec<Role> {
        self.handles.iter().map(|h| h.role()).collect()
    }

    /// Classify one tick.
    ///
    /// In the inactive phase no runtime call is made; querying poses is
    /// undefined there. The session loop exits on `Ended` before polling,
    /// so that phase is classified as standby as well.
    pub fn poll<R: TrackingRuntime>(
        &mut self,
        runtime: &mut R,
        phase: SessionPhase,
        predicted_time: Duration,
    ) -> Result<TickOutcome, TrackingError> {
        match phase {
            SessionPhase::Inactive | SessionPhase::Ended => Ok(TickOutcome::Standby),
            SessionPhase::Active => self.poll_active(runtime, predicted_time),
        }
    }

    fn poll_active<R: TrackingRuntime>(
        &mut self,
        runtime: &mut R,
        predicted_time: Duration,
    ) -> Result<TickOutcome, TrackingError> {
        runtime.sync_actions()?;

        let devices = runtime.enumerate_device_paths()?;
        if devices != self.known_devices {
            info!(
                connected = devices.len(),
                previously = self.known_devices.len(),
                "tracker device set changed"
            );
            self.known_devices = devices;
        }

        let mut located = Vec::new();
        for handle in &self.handles {
            let pose = runtime.locate(handle, predicted_time)?;
            if pose.valid {
                debug!(
                    role = %handle.role(),
                    x = pose.position[0],
                    y = pose.position[1],
                    z = pose.position[2],
                    "role located"
                );
                located.push((handle.role(), pose));
            }
        }

        if located.is_empty() {
            debug!("no trackers located this tick");
            Ok(TickOutcome::NoTrackerFound)
        } else {
            Ok(TickOutcome::Tracking(located))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Minimal counting runtime: every role in `located` reports a valid
    /// pose, everything else reports not-located.
    struct CountingRuntime {
        roles: Vec<Role>,
        located: Vec<Role>,
        sync_calls: usize,
        enumerations: usize,
        locate_calls: usize,
        fail_locate: bool,
    }

    impl CountingRuntime {
        fn new(roles: &[Role], located: &[Role]) -> Self {
            Self {
                roles: roles.to_vec(),
                located: located.to_vec(),
                sync_calls: 0,
                enumerations: 0,
                locate_calls: 0,
                fail_locate: false,
            }
        }
    }

    impl TrackingRuntime for CountingRuntime {
        fn session_phase(&mut self) -> Result<SessionPhase, TrackingError> {
            Ok(SessionPhase::Active)
        }

        fn enumerate_roles(&self) -> Result<Vec<Role>, TrackingError> {
            Ok(self.roles.clone())
        }

        fn create_handle(&mut self, role: Role) -> Result<TrackerHandle, TrackingError> {
            Ok(TrackerHandle::new(role, 0))
        }

        fn sync_actions(&mut self) -> Result<(), TrackingError> {
            self.sync_calls += 1;
            Ok(())
        }

        fn enumerate_device_paths(&mut self) -> Result<Vec<DevicePath>, TrackingError> {
            self.enumerations += 1;
            Ok(self
                .located
                .iter()
                .map(|r| DevicePath::new(r.user_path()))
                .collect())
        }

        fn locate(
            &mut self,
            handle: &TrackerHandle,
            _predicted_time: Duration,
        ) -> Result<Pose, TrackingError> {
            self.locate_calls += 1;
            if self.fail_locate {
                return Err(TrackingError::Locate {
                    role: handle.role(),
                    reason: "runtime failure injected".to_string(),
                });
            }
            if self.located.contains(&handle.role()) {
                Ok(Pose::located([0.0, 1.0, 0.0], [0.0, 0.0, 0.0, 1.0]))
            } else {
                Ok(Pose::not_located())
            }
        }
    }

    const ROLES: &[Role] = &[Role::Waist, Role::Chest, Role::Camera];

    #[test]
    fn test_inactive_tick_queries_nothing() {
        let mut runtime = CountingRuntime::new(ROLES, ROLES);
        let mut mux = TrackerMultiplexer::bind(&mut runtime).unwrap();

        let outcome = mux
            .poll(&mut runtime, SessionPhase::Inactive, Duration::ZERO)
            .unwrap();

        assert_eq!(outcome, TickOutcome::Standby);
        assert_eq!(runtime.sync_calls, 0, "inactive tick must not sync actions");
        assert_eq!(runtime.locate_calls, 0, "inactive tick must not query poses");
    }

    #[test]
    fn test_active_with_no_valid_pose_reports_no_tracker() {
        let mut runtime = CountingRuntime::new(ROLES, &[]);
        let mut mux = TrackerMultiplexer::bind(&mut runtime).unwrap();

        let outcome = mux
            .poll(&mut runtime, SessionPhase::Active, Duration::ZERO)
            .unwrap();

        assert_eq!(outcome, TickOutcome::NoTrackerFound);
        assert_eq!(runtime.sync_calls, 1);
        assert_eq!(runtime.locate_calls, ROLES.len());
    }

    #[test]
    fn test_active_with_one_located_role_is_nominal() {
        let mut runtime = CountingRuntime::new(ROLES, &[Role::Chest]);
        let mut mux = TrackerMultiplexer::bind(&mut runtime).unwrap();

        let outcome = mux
            .poll(&mut runtime, SessionPhase::Active, Duration::ZERO)
            .unwrap();

        assert!(outcome.is_nominal());
        match outcome {
            TickOutcome::Tracking(located) => {
                assert_eq!(located.len(), 1);
                assert_eq!(located[0].0, Role::Chest);
                assert!(located[0].1.valid);
            }
            other => panic!("expected Tracking outcome, got {:?}", other),
        }
    }

    #[test]
    fn test_located_roles_keep_declaration_order() {
        let mut runtime = CountingRuntime::new(ROLES, ROLES);
        let mut mux = TrackerMultiplexer::bind(&mut runtime).unwrap();

        let outcome = mux
            .poll(&mut runtime, SessionPhase::Active, Duration::ZERO)
            .unwrap();

        match outcome {
            TickOutcome::Tracking(located) => {
                let order: Vec<Role> = located.iter().map(|(r, _)| *r).collect();
                assert_eq!(order, ROLES.to_vec());
            }
            other => panic!("expected Tracking outcome, got {:?}", other),
        }
    }

    #[test]
    fn test_locate_failure_is_fatal() {
        let mut runtime = CountingRuntime::new(ROLES, ROLES);
        let mut mux = TrackerMultiplexer::bind(&mut runtime).unwrap();
        runtime.fail_locate = true;

        let result = mux.poll(&mut runtime, SessionPhase::Active, Duration::ZERO);
        assert!(matches!(result, Err(TrackingError::Locate { .. })));
    }

    #[test]
    fn test_every_active_tick_syncs_and_enumerates_once() {
        let mut runtime = CountingRuntime::new(ROLES, ROLES);
        let mut mux = TrackerMultiplexer::bind(&mut runtime).unwrap();

        for _ in 0..3 {
            mux.poll(&mut runtime, SessionPhase::Active, Duration::ZERO)
                .unwrap();
        }

        assert_eq!(runtime.sync_calls, 3);
        assert_eq!(runtime.enumerations, 3);
    }
}
