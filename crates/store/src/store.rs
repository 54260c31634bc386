//! Storage abstraction for the video cache.

use async_trait::async_trait;

use crate::{error::Result, types::VideoRecord};

/// Persistence backend for cached videos.
///
/// Implementations must make [`VideoStore::upsert`] a single atomic
/// write-or-replace keyed by `video_id`, never a read-then-write sequence;
/// concurrent sync passes rely on this for safety.
#[async_trait]
pub trait VideoStore: Send + Sync {
    /// Insert or replace the record keyed by `video_id`, returning the
    /// stored row.
    async fn upsert(&self, record: &VideoRecord) -> Result<VideoRecord>;

    /// Fetch one record by its natural key.
    async fn get(&self, video_id: &str) -> Result<Option<VideoRecord>>;

    /// Cached records ordered by publish date, newest first. `None` returns
    /// everything.
    async fn list_recent(&self, limit: Option<u32>) -> Result<Vec<VideoRecord>>;

    /// Delete every cached record, returning the number removed.
    async fn delete_all(&self) -> Result<u64>;

    /// Number of cached records.
    async fn count(&self) -> Result<u64>;
}
