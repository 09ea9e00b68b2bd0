//! Semantic mount points for tracked devices.
//!
//! A role identifies *where* a tracker is worn (waist, left foot, camera
//! rig, ...), distinct from the physical device instance that currently
//! fills it. The set is fixed at configuration time; roles are never
//! created or destroyed during a session.

use std::fmt;

/// A semantic device-mount category.
///
/// The catalogue and its order match the HTC tracker role registry; the
/// declaration order is the canonical evaluation order within a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    HandheldObject,
    LeftFoot,
    RightFoot,
    LeftShoulder,
    RightShoulder,
    LeftElbow,
    RightElbow,
    LeftKnee,
    RightKnee,
    Waist,
    Chest,
    Camera,
    Keyboard,
}

impl Role {
    /// All roles in canonical evaluation order.
    pub const ALL: [Role; 13] = [
        Role::HandheldObject,
        Role::LeftFoot,
        Role::RightFoot,
        Role::LeftShoulder,
        Role::RightShoulder,
        Role::LeftElbow,
        Role::RightElbow,
        Role::LeftKnee,
        Role::RightKnee,
        Role::Waist,
        Role::Chest,
        Role::Camera,
        Role::Keyboard,
    ];

    /// Stable lower-case name, as used in config files and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::HandheldObject => "handheld_object",
            Role::LeftFoot => "left_foot",
            Role::RightFoot => "right_foot",
            Role::LeftShoulder => "left_shoulder",
            Role::RightShoulder => "right_shoulder",
            Role::LeftElbow => "left_elbow",
            Role::RightElbow => "right_elbow",
            Role::LeftKnee => "left_knee",
            Role::RightKnee => "right_knee",
            Role::Waist => "waist",
            Role::Chest => "chest",
            Role::Camera => "camera",
            Role::Keyboard => "keyboard",
        }
    }

    /// The interaction-profile user path for this role.
    pub fn user_path(&self) -> String {
        format!("/user/vive_tracker_htcx/role/{}", self.as_str())
    }

    /// Parse from a config file or CLI string.
    ///
    /// Accepts the stable name with either `_` or `-` separators, case
    /// insensitively.
    pub fn from_config_str(s: &str) -> Option<Role> {
        let normalized = s.trim().to_lowercase().replace('-', "_");
        Role::ALL
            .iter()
            .copied()
            .find(|role| role.as_str() == normalized)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_roles_distinct_names() {
        let mut names: Vec<_> = Role::ALL.iter().map(|r| r.as_str()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), Role::ALL.len());
    }

    #[test]
    fn test_from_config_str_roundtrip() {
        for role in Role::ALL {
            assert_eq!(Role::from_config_str(role.as_str()), Some(role));
        }
    }

    #[test]
    fn test_from_config_str_accepts_variants() {
        assert_eq!(Role::from_config_str("Left-Foot"), Some(Role::LeftFoot));
        assert_eq!(Role::from_config_str("  waist "), Some(Role::Waist));
        assert_eq!(Role::from_config_str("tail"), None);
    }

    #[test]
    fn test_user_path() {
        assert_eq!(
            Role::Waist.user_path(),
            "/user/vive_tracker_htcx/role/waist"
        );
    }

    #[test]
    fn test_canonical_order_starts_with_handheld() {
        // The evaluation order is part of the observable log ordering.
        assert_eq!(Role::ALL[0], Role::HandheldObject);
        assert_eq!(Role::ALL[9], Role::Waist);
        assert_eq!(Role::ALL[12], Role::Keyboard);
    }
}
