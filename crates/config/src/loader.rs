use std::{
    path::{Path, PathBuf},
    sync::RwLock,
};

use tracing::{debug, warn};

use crate::{env_subst::substitute_env, schema::SteepleConfig};

/// Standard config file names, checked in order.
const CONFIG_FILENAMES: &[&str] = &["steeple.toml", "steeple.yaml", "steeple.yml", "steeple.json"];

/// Test override for the data directory.
static DATA_DIR_OVERRIDE: RwLock<Option<PathBuf>> = RwLock::new(None);

/// Load config from the given path (any supported format).
pub fn load_config(path: &Path) -> anyhow::Result<SteepleConfig> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("failed to read {}: {e}", path.display()))?;
    let raw = substitute_env(&raw);
    parse_config(&raw, path)
}

/// Discover and load config from standard locations.
///
/// Search order:
/// 1. `./steeple.{toml,yaml,yml,json}` (project-local)
/// 2. `~/.config/steeple/steeple.{toml,yaml,yml,json}` (user-global)
///
/// Returns `SteepleConfig::default()` if no config file is found. Env
/// overrides are a separate, explicit step ([`apply_env_overrides`]).
pub fn discover_and_load() -> SteepleConfig {
    if let Some(path) = find_config_file() {
        debug!(path = %path.display(), "loading config");
        match load_config(&path) {
            Ok(cfg) => return cfg,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to load config, using defaults");
            },
        }
    } else {
        debug!("no config file found, using defaults");
    }
    SteepleConfig::default()
}

/// Apply environment variable overrides on top of a loaded config.
///
/// Recognized: `STEEPLE_YOUTUBE_API_KEY` (or plain `YOUTUBE_API_KEY`),
/// `STEEPLE_DB_PATH`, `STEEPLE_SYNC_INTERVAL`. Empty values are ignored.
pub fn apply_env_overrides(config: &mut SteepleConfig) {
    apply_env_overrides_with(config, |name| std::env::var(name).ok());
}

fn apply_env_overrides_with(
    config: &mut SteepleConfig,
    lookup: impl Fn(&str) -> Option<String>,
) {
    let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

    if let Some(key) = get("STEEPLE_YOUTUBE_API_KEY").or_else(|| get("YOUTUBE_API_KEY")) {
        config.youtube.api_key = key;
    }
    if let Some(path) = get("STEEPLE_DB_PATH") {
        config.database.path = path;
    }
    if let Some(interval) = get("STEEPLE_SYNC_INTERVAL") {
        config.sync.interval = interval;
    }
}

/// Find the first config file in standard locations.
fn find_config_file() -> Option<PathBuf> {
    // Project-local
    for name in CONFIG_FILENAMES {
        let p = PathBuf::from(name);
        if p.exists() {
            return Some(p);
        }
    }

    // User-global: ~/.config/steeple/
    if let Some(dirs) = directories::ProjectDirs::from("", "", "steeple") {
        let config_dir = dirs.config_dir();
        for name in CONFIG_FILENAMES {
            let p = config_dir.join(name);
            if p.exists() {
                return Some(p);
            }
        }
    }

    None
}

/// Returns the user-global config directory (`~/.config/steeple/`).
pub fn config_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "steeple").map(|d| d.config_dir().to_path_buf())
}

/// Returns the path of an existing config file, or the default TOML path.
pub fn find_or_default_config_path() -> PathBuf {
    if let Some(path) = find_config_file() {
        return path;
    }
    config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("steeple.toml")
}

/// Returns the data directory for databases and caches.
///
/// Honors [`set_data_dir`] overrides (tests), otherwise the platform data
/// dir for "steeple", falling back to the current directory.
pub fn data_dir() -> PathBuf {
    let override_dir = DATA_DIR_OVERRIDE
        .read()
        .unwrap_or_else(|e| e.into_inner())
        .clone();
    if let Some(dir) = override_dir {
        return dir;
    }
    directories::ProjectDirs::from("", "", "steeple")
        .map(|d| d.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Override the data directory (tests).
pub fn set_data_dir(path: impl Into<PathBuf>) {
    let mut guard = DATA_DIR_OVERRIDE.write().unwrap_or_else(|e| e.into_inner());
    *guard = Some(path.into());
}

/// Clear the data directory override (tests).
pub fn clear_data_dir() {
    let mut guard = DATA_DIR_OVERRIDE.write().unwrap_or_else(|e| e.into_inner());
    *guard = None;
}

/// Effective SQLite file path: `database.path`, or `<data-dir>/steeple.db`.
pub fn database_path(config: &SteepleConfig) -> PathBuf {
    let configured = config.database.path.trim();
    if configured.is_empty() {
        data_dir().join("steeple.db")
    } else {
        PathBuf::from(configured)
    }
}

fn parse_config(raw: &str, path: &Path) -> anyhow::Result<SteepleConfig> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("toml");

    match ext {
        "toml" => Ok(toml::from_str(raw)?),
        "yaml" | "yml" => Ok(serde_yaml::from_str(raw)?),
        "json" => Ok(serde_json::from_str(raw)?),
        _ => anyhow::bail!("unsupported config format: .{ext}"),
    }
}
