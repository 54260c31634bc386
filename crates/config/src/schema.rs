//! Config schema types (YouTube API access, database location, sync cadence,
//! tracked channels).

use std::time::Duration;

use {
    serde::{Deserialize, Serialize},
    tracing::warn,
};

use crate::interval::parse_interval;

/// Hard bounds the video API enforces on `maxResults`.
pub const MAX_RESULTS_BOUNDS: (u32, u32) = (1, 50);

/// Interval used when `sync.interval` is missing or unparseable.
pub const DEFAULT_SYNC_INTERVAL: Duration = Duration::from_secs(15 * 60);

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SteepleConfig {
    pub youtube: YoutubeConfig,
    pub database: DatabaseConfig,
    pub sync: SyncConfig,
    /// Tracked channels. Defaults to the built-in ministry list; a config
    /// file replaces the list wholesale.
    pub channels: Vec<ChannelEntry>,
}

impl SteepleConfig {
    /// Effective channel list: the configured one, or the built-ins when the
    /// config names none.
    #[must_use]
    pub fn effective_channels(&self) -> Vec<ChannelEntry> {
        if self.channels.is_empty() {
            default_channels()
        } else {
            self.channels.clone()
        }
    }
}

/// YouTube Data API access.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct YoutubeConfig {
    /// API key. Usually `${YOUTUBE_API_KEY}` in the config file; empty means
    /// unset, which is fatal for commands that talk to the API.
    pub api_key: String,
    /// How many recent uploads to request per channel. Defaults to 10.
    pub max_results: u32,
}

impl Default for YoutubeConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            max_results: 10,
        }
    }
}

impl YoutubeConfig {
    /// `max_results` clamped to the API's documented bounds, warning when the
    /// configured value falls outside them.
    #[must_use]
    pub fn effective_max_results(&self) -> u32 {
        let (lo, hi) = MAX_RESULTS_BOUNDS;
        if self.max_results < lo || self.max_results > hi {
            warn!(
                configured = self.max_results,
                "youtube.max_results outside {lo}..={hi}, clamping"
            );
        }
        self.max_results.clamp(lo, hi)
    }
}

/// Database location.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Path to the SQLite file. Empty means `<data-dir>/steeple.db`.
    pub path: String,
}

/// Background sync cadence.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Interval between passes, e.g. "90s", "15m", "1h". Defaults to "15m".
    pub interval: String,
    /// Whether a pass fires immediately on startup. Defaults to true.
    pub run_on_start: bool,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            interval: "15m".into(),
            run_on_start: true,
        }
    }
}

impl SyncConfig {
    /// Parsed interval, falling back to 15 minutes (with a warning) when the
    /// configured string does not parse.
    #[must_use]
    pub fn interval_duration(&self) -> Duration {
        match parse_interval(&self.interval) {
            Some(d) => d,
            None => {
                warn!(
                    configured = %self.interval,
                    "sync.interval unparseable, falling back to 15m"
                );
                DEFAULT_SYNC_INTERVAL
            },
        }
    }
}

/// One tracked channel.
///
/// Prefer explicit stable IDs (`UC…`) to avoid handle mixups; handle-only
/// entries are resolved on every pass.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ChannelEntry {
    /// Stable channel ID, if already known.
    pub id: Option<String>,
    /// Human-readable alias, with or without the leading `@`.
    pub handle: Option<String>,
    /// Display label used in logs and CLI output.
    pub name: String,
}

impl ChannelEntry {
    /// True when the entry carries at least one usable identifier.
    #[must_use]
    pub fn has_identity(&self) -> bool {
        let set = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.trim().is_empty());
        set(&self.id) || set(&self.handle)
    }
}

/// Built-in channel list for a bare install.
#[must_use]
pub fn default_channels() -> Vec<ChannelEntry> {
    fn entry(id: &str, handle: &str, name: &str) -> ChannelEntry {
        ChannelEntry {
            id: Some(id.into()),
            handle: Some(handle.into()),
            name: name.into(),
        }
    }

    vec![
        entry("UC3DgiGIrnmfMbBjDQP0oM-w", "@CrownTvkeOfficial", "Crown TV KE Official"),
        entry("UC4uzQvfZ-TNtr9USnPNg72w", "@Machdan_media", "Machdan Media"),
        entry("UCqdgi-yU4fVlOhKZLrz24rw", "@repentpreparetheway", "Repent Prepare The Way"),
        entry("UCuJUQh03Zub62Vv8uZd9SWA", "@kayolemainworshipchannel", "Kayole Main Altar"),
        entry("UCoEYFha5gALQXSY0dBKCncw", "@thecitymegachurch", "The City Megachurch"),
        entry("UC1Ej2mG1R8L4R2c1I7Sqq4A", "@repentancechannel1", "Repentance Channel 1"),
    ]
}
