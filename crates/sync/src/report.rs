//! Per-pass outcome reporting.
//!
//! A bare merged count cannot tell "no new videos" apart from "every channel
//! failed", so a pass reports one entry per channel alongside the total.

/// How one channel fared in a pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelStatus {
    /// Resolution and fetch succeeded; `merged`/`failed` count the records.
    Synced,
    /// No stable ID could be resolved; the channel was skipped.
    Unresolved,
    /// The fetch or status lookup failed; the channel was skipped.
    FetchFailed,
}

impl std::fmt::Display for ChannelStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Synced => write!(f, "synced"),
            Self::Unresolved => write!(f, "unresolved"),
            Self::FetchFailed => write!(f, "fetch-failed"),
        }
    }
}

/// One channel's contribution to a pass.
#[derive(Debug, Clone)]
pub struct ChannelReport {
    /// Display name from the registry entry.
    pub name: String,
    /// The stable ID used for this pass, when resolution succeeded.
    pub channel_id: Option<String>,
    pub status: ChannelStatus,
    /// Records upserted into the cache.
    pub merged: u64,
    /// Records whose upsert failed; siblings were still attempted.
    pub failed: u64,
}

/// Outcome of one complete pass over the registry, in registry order.
#[derive(Debug, Clone, Default)]
pub struct PassSummary {
    pub reports: Vec<ChannelReport>,
}

impl PassSummary {
    /// Total records merged across all channels. This is the single-integer
    /// contract the scheduler and manual trigger both observe.
    #[must_use]
    pub fn merged_total(&self) -> u64 {
        self.reports.iter().map(|r| r.merged).sum()
    }

    /// Total records whose upsert failed.
    #[must_use]
    pub fn failed_total(&self) -> u64 {
        self.reports.iter().map(|r| r.failed).sum()
    }

    /// Channels skipped for resolution or fetch failures.
    #[must_use]
    pub fn skipped_channels(&self) -> usize {
        self.reports
            .iter()
            .filter(|r| r.status != ChannelStatus::Synced)
            .count()
    }
}
