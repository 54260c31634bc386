//! YouTube Data API v3 access: handle resolution and eligible-video fetching.
//!
//! The client covers the four endpoints the sync engine needs (video search,
//! bulk status lookup, channel-by-handle, channel text search). Resolution
//! and fetching sit on top as free functions so callers can hold one shared
//! [`YoutubeClient`].

pub mod client;
pub mod error;
pub mod fetcher;
pub mod resolver;
pub mod types;

pub use {
    client::{DEFAULT_BASE_URL, YoutubeClient},
    error::{Error, Result},
    fetcher::fetch_videos,
    resolver::{Resolution, is_stable_channel_id, resolve_channel},
};
