//! A scripted tracking runtime for tests and dry runs.
//!
//! The script is a list of ticks, each declaring the session phase and
//! which roles report a valid pose. The runtime advances one tick per
//! `session_phase` call - the loop's once-per-tick phase poll - so a
//! script line describes everything the loop observes for that tick.
//! When the script runs out the runtime reports `Ended` (or repeats the
//! final tick if configured as steady), which ends the session cleanly.

use std::time::Duration;

use super::role::Role;
use super::runtime::{
    DevicePath, Pose, SessionPhase, TrackerHandle, TrackingError, TrackingRuntime,
};

/// One scripted tick: a phase plus the roles located during it.
#[derive(Debug, Clone)]
pub struct ScriptedTick {
    phase: SessionPhase,
    located: Vec<Role>,
    fail: Option<String>,
}

impl ScriptedTick {
    /// An inactive (standby) tick.
    pub fn inactive() -> Self {
        Self {
            phase: SessionPhase::Inactive,
            located: Vec::new(),
            fail: None,
        }
    }

    /// An active tick on which the given roles report valid poses.
    pub fn active(located: &[Role]) -> Self {
        Self {
            phase: SessionPhase::Active,
            located: located.to_vec(),
            fail: None,
        }
    }

    /// A tick on which the runtime itself fails. Exercises the fatal
    /// collaborator-error path.
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            phase: SessionPhase::Active,
            located: Vec::new(),
            fail: Some(reason.into()),
        }
    }
}

/// `TrackingRuntime` driven by a predeclared per-tick script.
#[derive(Debug)]
pub struct ScriptedRuntime {
    roles: Vec<Role>,
    script: Vec<ScriptedTick>,
    cursor: usize,
    current: Option<ScriptedTick>,
    repeat_last: bool,
    next_handle_id: u64,
}

impl ScriptedRuntime {
    /// A runtime that plays the script once, then reports `Ended`.
    pub fn new(roles: &[Role], script: Vec<ScriptedTick>) -> Self {
        Self {
            roles: roles.to_vec(),
            script,
            cursor: 0,
            current: None,
            repeat_last: false,
            next_handle_id: 0,
        }
    }

    /// A runtime that stays active forever with every role located.
    ///
    /// Used by the CLI as a stand-in collaborator until a hardware
    /// backend is wired in; the session then runs until the external
    /// stop signal fires.
    pub fn steady(roles: &[Role]) -> Self {
        let mut runtime = Self::new(roles, vec![ScriptedTick::active(roles)]);
        runtime.repeat_last = true;
        runtime
    }

    fn advance(&mut self) -> Option<&ScriptedTick> {
        if self.cursor >= self.script.len() {
            if self.repeat_last && !self.script.is_empty() {
                self.cursor = self.script.len() - 1;
            } else {
                self.current = None;
                return None;
            }
        }
        self.current = Some(self.script[self.cursor].clone());
        self.cursor += 1;
        self.current.as_ref()
    }
}

impl TrackingRuntime for ScriptedRuntime {
    fn session_phase(&mut self) -> Result<SessionPhase, TrackingError> {
        match self.advance() {
            None => Ok(SessionPhase::Ended),
            Some(tick) => {
                if let Some(reason) = &tick.fail {
                    return Err(TrackingError::Phase(reason.clone()));
                }
                Ok(tick.phase)
            }
        }
    }

    fn enumerate_roles(&self) -> Result<Vec<Role>, TrackingError> {
        Ok(self.roles.clone())
    }

    fn create_handle(&mut self, role: Role) -> Result<TrackerHandle, TrackingError> {
        let handle = TrackerHandle::new(role, self.next_handle_id);
        self.next_handle_id += 1;
        Ok(handle)
    }

    fn sync_actions(&mut self) -> Result<(), TrackingError> {
        Ok(())
    }

    fn enumerate_device_paths(&mut self) -> Result<Vec<DevicePath>, TrackingError> {
        let located = self
            .current
            .as_ref()
            .map(|tick| tick.located.as_slice())
            .unwrap_or(&[]);
        Ok(located
            .iter()
            .map(|role| DevicePath::new(role.user_path()))
            .collect())
    }

    fn locate(
        &mut self,
        handle: &TrackerHandle,
        predicted_time: Duration,
    ) -> Result<Pose, TrackingError> {
        let located = self
            .current
            .as_ref()
            .map(|tick| tick.located.contains(&handle.role()))
            .unwrap_or(false);
        if located {
            // A stable synthetic pose; the y coordinate carries the sample
            // time so tests can tell ticks apart if they need to.
            Ok(Pose::located(
                [0.0, predicted_time.as_secs_f32(), 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ))
        } else {
            Ok(Pose::not_located())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_plays_in_order_then_ends() {
        let mut runtime = ScriptedRuntime::new(
            &[Role::Waist],
            vec![ScriptedTick::inactive(), ScriptedTick::active(&[Role::Waist])],
        );

        assert_eq!(runtime.session_phase().unwrap(), SessionPhase::Inactive);
        assert_eq!(runtime.session_phase().unwrap(), SessionPhase::Active);
        assert_eq!(runtime.session_phase().unwrap(), SessionPhase::Ended);
        assert_eq!(runtime.session_phase().unwrap(), SessionPhase::Ended);
    }

    #[test]
    fn test_steady_runtime_never_ends() {
        let mut runtime = ScriptedRuntime::steady(&[Role::Camera]);
        for _ in 0..100 {
            assert_eq!(runtime.session_phase().unwrap(), SessionPhase::Active);
        }
    }

    #[test]
    fn test_locate_follows_current_tick() {
        let mut runtime = ScriptedRuntime::new(
            &[Role::Waist, Role::Chest],
            vec![ScriptedTick::active(&[Role::Chest])],
        );
        let waist = runtime.create_handle(Role::Waist).unwrap();
        let chest = runtime.create_handle(Role::Chest).unwrap();

        runtime.session_phase().unwrap();
        assert!(!runtime.locate(&waist, Duration::ZERO).unwrap().valid);
        assert!(runtime.locate(&chest, Duration::ZERO).unwrap().valid);
    }

    #[test]
    fn test_device_paths_mirror_located_roles() {
        let mut runtime = ScriptedRuntime::new(
            &[Role::Waist, Role::Chest],
            vec![ScriptedTick::active(&[Role::Waist])],
        );
        runtime.session_phase().unwrap();
        let paths = runtime.enumerate_device_paths().unwrap();
        assert_eq!(paths, vec![DevicePath::new(Role::Waist.user_path())]);
    }

    #[test]
    fn test_failing_tick_reports_phase_error() {
        let mut runtime = ScriptedRuntime::new(
            &[Role::Waist],
            vec![ScriptedTick::failing("runtime went away")],
        );
        let result = runtime.session_phase();
        assert!(matches!(result, Err(TrackingError::Phase(_))));
    }
}
