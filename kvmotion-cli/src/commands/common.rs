//! Shared argument types and CLI > config > default resolution.

use std::path::PathBuf;

use clap::ValueEnum;

use kvmotion::config::{ConfigFile, DEFAULT_FRAME_RATE, DEFAULT_OUTPUT_NAME};
use kvmotion::Role;

/// Tracker role selection for CLI arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RoleArg {
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

impl From<RoleArg> for Role {
    fn from(arg: RoleArg) -> Self {
        match arg {
            RoleArg::HandheldObject => Role::HandheldObject,
            RoleArg::LeftFoot => Role::LeftFoot,
            RoleArg::RightFoot => Role::RightFoot,
            RoleArg::LeftShoulder => Role::LeftShoulder,
            RoleArg::RightShoulder => Role::RightShoulder,
            RoleArg::LeftElbow => Role::LeftElbow,
            RoleArg::RightElbow => Role::RightElbow,
            RoleArg::LeftKnee => Role::LeftKnee,
            RoleArg::RightKnee => Role::RightKnee,
            RoleArg::Waist => Role::Waist,
            RoleArg::Chest => Role::Chest,
            RoleArg::Camera => Role::Camera,
            RoleArg::Keyboard => Role::Keyboard,
        }
    }
}

/// Resolve the target frame rate: CLI > config > default.
pub fn resolve_frame_rate(cli: Option<f64>, config: &ConfigFile) -> f64 {
    cli.or(config.frame_rate).unwrap_or(DEFAULT_FRAME_RATE)
}

/// Resolve the output path: CLI > config output_dir > working directory.
pub fn resolve_output(cli: Option<PathBuf>, config: &ConfigFile) -> PathBuf {
    match cli {
        Some(path) => path,
        None => match &config.output_dir {
            Some(dir) => dir.join(DEFAULT_OUTPUT_NAME),
            None => PathBuf::from(DEFAULT_OUTPUT_NAME),
        },
    }
}

/// Resolve the role set: CLI > config > full catalogue.
pub fn resolve_roles(cli: &[RoleArg], config: &ConfigFile) -> Vec<Role> {
    if !cli.is_empty() {
        return cli.iter().map(|arg| Role::from(*arg)).collect();
    }
    config.roles.clone().unwrap_or_else(|| Role::ALL.to_vec())
}
