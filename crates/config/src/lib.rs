//! Configuration loading, validation, and env substitution.
//!
//! Config files: `steeple.toml`, `steeple.yaml`, or `steeple.json`
//! Searched in `./` then `~/.config/steeple/`.
//!
//! Supports `${ENV_VAR}` substitution in all string values.

pub mod env_subst;
pub mod interval;
pub mod loader;
pub mod schema;
pub mod validate;

pub use {
    interval::parse_interval,
    loader::{
        apply_env_overrides, clear_data_dir, config_dir, data_dir, database_path,
        discover_and_load, find_or_default_config_path, load_config, set_data_dir,
    },
    schema::{ChannelEntry, DatabaseConfig, SteepleConfig, SyncConfig, YoutubeConfig},
    validate::{Diagnostic, Severity, ValidationResult, validate_config},
};
