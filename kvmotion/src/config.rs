//! Session configuration and the optional `config.ini` file.
//!
//! Everything here is resolved and validated before the recording loop
//! starts; an invalid configuration is a fatal startup error and is never
//! surfaced mid-loop. The CLI layers its own precedence on top
//! (CLI argument > config file > default).

use std::path::{Path, PathBuf};
use std::time::Duration;

use ini::Ini;
use thiserror::Error;

use crate::tracker::Role;

/// Default target frame rate in ticks per second.
///
/// Recording at twice the video frame rate makes alignment easier; this
/// default assumes 24fps footage.
pub const DEFAULT_FRAME_RATE: f64 = 48.0;

/// Default recording file name (extension included).
pub const DEFAULT_OUTPUT_NAME: &str = "recording.kvmotion";

/// Configuration errors. All fatal before the loop starts.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Frame rate must be a positive, finite number.
    #[error("frame rate must be positive and finite (got {0})")]
    InvalidFrameRate(f64),

    /// A zero step duration can never tick.
    #[error("step duration must be greater than zero")]
    ZeroStep,

    /// At least one tracker role must be enabled.
    #[error("no tracker roles enabled")]
    NoRoles,

    /// A role name in the config file was not recognized.
    #[error("unknown tracker role {0:?} in config")]
    UnknownRole(String),

    /// The config file could not be read or parsed.
    #[error("failed to load config file {path}: {source}")]
    Load {
        path: PathBuf,
        #[source]
        source: ini::Error,
    },

    /// A config value failed to parse.
    #[error("invalid config value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
}

/// Validated inputs for one recording session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Target tick rate in frames per second.
    pub frame_rate: f64,
    /// Destination recording file.
    pub output: PathBuf,
    /// Roles to query each tick, in evaluation order.
    pub roles: Vec<Role>,
}

impl SessionConfig {
    /// Create a config with the full role catalogue enabled.
    pub fn new(frame_rate: f64, output: impl Into<PathBuf>) -> Self {
        Self {
            frame_rate,
            output: output.into(),
            roles: Role::ALL.to_vec(),
        }
    }

    /// Restrict the session to the given roles.
    pub fn with_roles(mut self, roles: Vec<Role>) -> Self {
        self.roles = roles;
        self
    }

    /// Check the configuration. Runs before any hardware is touched.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.frame_rate.is_finite() || self.frame_rate <= 0.0 {
            return Err(ConfigError::InvalidFrameRate(self.frame_rate));
        }
        if self.roles.is_empty() {
            return Err(ConfigError::NoRoles);
        }
        Ok(())
    }

    /// The tick step derived from the frame rate.
    pub fn step(&self) -> Result<Duration, ConfigError> {
        self.validate()?;
        Ok(Duration::from_secs_f64(1.0 / self.frame_rate))
    }
}

/// Optional settings loaded from `config.ini`.
///
/// ```ini
/// [recording]
/// frame_rate = 48
/// output_dir = /home/kivi/captures
///
/// [roles]
/// enabled = waist, chest, camera
/// ```
///
/// Every field is optional; `None` means "not set, use the next source
/// in the precedence chain".
#[derive(Debug, Clone, Default)]
pub struct ConfigFile {
    /// Target frame rate, if set.
    pub frame_rate: Option<f64>,
    /// Directory for new recordings, if set.
    pub output_dir: Option<PathBuf>,
    /// Enabled roles, if set.
    pub roles: Option<Vec<Role>>,
}

impl ConfigFile {
    /// Platform config location: `<config dir>/kvmotion/config.ini`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("kvmotion").join("config.ini"))
    }

    /// Load a config file from an explicit path.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let ini = Ini::load_from_file(path).map_err(|source| ConfigError::Load {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ini(&ini)
    }

    /// Load the config: explicit path if given, otherwise the default
    /// location if a file exists there, otherwise empty defaults.
    ///
    /// A missing default file is not an error; a missing explicit file is.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => match Self::default_path() {
                Some(default) if default.exists() => Self::load(&default),
                _ => Ok(Self::default()),
            },
        }
    }

    fn from_ini(ini: &Ini) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(section) = ini.section(Some("recording")) {
            if let Some(value) = section.get("frame_rate") {
                let rate: f64 = value.parse().map_err(|_| ConfigError::InvalidValue {
                    key: "frame_rate",
                    value: value.to_string(),
                })?;
                config.frame_rate = Some(rate);
            }
            if let Some(value) = section.get("output_dir") {
                config.output_dir = Some(PathBuf::from(value));
            }
        }

        if let Some(section) = ini.section(Some("roles")) {
            if let Some(value) = section.get("enabled") {
                let mut roles = Vec::new();
                for name in value.split(',') {
                    let name = name.trim();
                    if name.is_empty() {
                        continue;
                    }
                    let role = Role::from_config_str(name)
                        .ok_or_else(|| ConfigError::UnknownRole(name.to_string()))?;
                    roles.push(role);
                }
                config.roles = Some(roles);
            }
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::fs;

    use tempfile::tempdir;

    #[test]
    fn test_session_config_defaults_to_full_catalogue() {
        let config = SessionConfig::new(48.0, "take.kvmotion");
        assert_eq!(config.roles, Role::ALL.to_vec());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_frame_rates() {
        for rate in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let config = SessionConfig::new(rate, "take.kvmotion");
            assert!(
                matches!(config.validate(), Err(ConfigError::InvalidFrameRate(_))),
                "frame rate {} should be rejected",
                rate
            );
        }
    }

    #[test]
    fn test_validate_rejects_empty_roles() {
        let config = SessionConfig::new(48.0, "take.kvmotion").with_roles(Vec::new());
        assert!(matches!(config.validate(), Err(ConfigError::NoRoles)));
    }

    #[test]
    fn test_step_from_frame_rate() {
        let config = SessionConfig::new(50.0, "take.kvmotion");
        assert_eq!(config.step().unwrap(), Duration::from_millis(20));
    }

    #[test]
    fn test_load_full_config_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.ini");
        fs::write(
            &path,
            "[recording]\n\
             frame_rate = 60\n\
             output_dir = /tmp/captures\n\
             \n\
             [roles]\n\
             enabled = waist, chest, camera\n",
        )
        .unwrap();

        let config = ConfigFile::load(&path).unwrap();
        assert_eq!(config.frame_rate, Some(60.0));
        assert_eq!(config.output_dir, Some(PathBuf::from("/tmp/captures")));
        assert_eq!(
            config.roles,
            Some(vec![Role::Waist, Role::Chest, Role::Camera])
        );
    }

    #[test]
    fn test_load_partial_config_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.ini");
        fs::write(&path, "[recording]\nframe_rate = 24\n").unwrap();

        let config = ConfigFile::load(&path).unwrap();
        assert_eq!(config.frame_rate, Some(24.0));
        assert_eq!(config.output_dir, None);
        assert_eq!(config.roles, None);
    }

    #[test]
    fn test_unknown_role_in_config_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.ini");
        fs::write(&path, "[roles]\nenabled = waist, tail\n").unwrap();

        let result = ConfigFile::load(&path);
        assert!(matches!(result, Err(ConfigError::UnknownRole(name)) if name == "tail"));
    }

    #[test]
    fn test_bad_frame_rate_value_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.ini");
        fs::write(&path, "[recording]\nframe_rate = fast\n").unwrap();

        let result = ConfigFile::load(&path);
        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue { key: "frame_rate", .. })
        ));
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nope.ini");
        let result = ConfigFile::load_or_default(Some(&path));
        assert!(matches!(result, Err(ConfigError::Load { .. })));
    }
}
