//! CLI subcommands.

pub mod common;
pub mod info;
pub mod record;
