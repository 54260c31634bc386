//! Channel handle resolution.
//!
//! A channel entry may carry a stable `UC…` ID, a human handle, or both.
//! Resolution tries an ordered list of strategies and stops at the first
//! hit:
//!
//! 1. already-stable ID, returned without any network call
//! 2. handle lookup via `/channels?forHandle=`
//! 3. free-text channel search, first hit wins
//!
//! Strategy errors are logged and count as "no match" so the next strategy
//! still runs; IDs are re-resolved every pass rather than persisted, which
//! tolerates upstream renames.

use {
    steeple_config::ChannelEntry,
    tracing::{debug, warn},
};

use crate::client::YoutubeClient;

/// Outcome of resolving one channel for one pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Resolved(String),
    NotFound,
}

impl Resolution {
    /// The stable ID, if resolution succeeded.
    #[must_use]
    pub fn into_id(self) -> Option<String> {
        match self {
            Self::Resolved(id) => Some(id),
            Self::NotFound => None,
        }
    }
}

/// True when `id` already has the stable shape the API issues (`UC` prefix).
#[must_use]
pub fn is_stable_channel_id(id: &str) -> bool {
    id.starts_with("UC")
}

/// Canonical alias form: handles always carry a leading `@`.
fn normalize_handle(handle: &str) -> String {
    if handle.starts_with('@') {
        handle.to_string()
    } else {
        format!("@{handle}")
    }
}

/// Resolve a channel to its stable ID, or [`Resolution::NotFound`] when every
/// strategy misses. Never fails; callers treat `NotFound` as "skip this
/// channel for this pass".
pub async fn resolve_channel(client: &YoutubeClient, channel: &ChannelEntry) -> Resolution {
    if let Some(id) = channel.id.as_deref()
        && is_stable_channel_id(id)
    {
        return Resolution::Resolved(id.to_string());
    }

    let handle = channel
        .handle
        .as_deref()
        .map(str::trim)
        .filter(|h| !h.is_empty());
    let Some(handle) = handle else {
        warn!(channel = %channel.name, "no stable id and no handle, cannot resolve");
        return Resolution::NotFound;
    };
    let handle = normalize_handle(handle);

    match client.channel_id_for_handle(&handle).await {
        Ok(Some(id)) => {
            debug!(channel = %channel.name, %id, strategy = "handle_lookup", "resolved");
            return Resolution::Resolved(id);
        },
        Ok(None) => {
            debug!(channel = %channel.name, handle = %handle, strategy = "handle_lookup", "no match");
        },
        Err(error) => {
            warn!(channel = %channel.name, %error, strategy = "handle_lookup", "lookup failed");
        },
    }

    match client.search_channel(&handle).await {
        Ok(Some(id)) => {
            debug!(channel = %channel.name, %id, strategy = "channel_search", "resolved");
            Resolution::Resolved(id)
        },
        Ok(None) => {
            warn!(channel = %channel.name, handle = %handle, "handle did not resolve to any channel");
            Resolution::NotFound
        },
        Err(error) => {
            warn!(channel = %channel.name, %error, strategy = "channel_search", "lookup failed");
            Resolution::NotFound
        },
    }
}
