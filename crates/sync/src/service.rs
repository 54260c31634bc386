//! The sync orchestrator.

use std::sync::Arc;

use {
    steeple_store::VideoStore,
    steeple_youtube::{Resolution, YoutubeClient, fetch_videos, resolve_channel},
    tracing::{debug, info, warn},
};

use crate::{
    registry::ChannelRegistry,
    report::{ChannelReport, ChannelStatus, PassSummary},
};

/// Drives one sync pass: resolve, fetch, merge, per channel in registry
/// order.
///
/// Every failure is absorbed at the smallest possible unit. A dead channel
/// never blocks its siblings; a bad record never blocks the rest of its
/// batch; `run_pass` itself never returns an error. The cost is that the
/// merged total is a lower bound, which is why [`PassSummary`] also carries
/// the per-channel breakdown.
pub struct SyncService {
    client: YoutubeClient,
    store: Arc<dyn VideoStore>,
    registry: ChannelRegistry,
    max_results: u32,
}

impl SyncService {
    pub fn new(
        client: YoutubeClient,
        store: Arc<dyn VideoStore>,
        registry: ChannelRegistry,
        max_results: u32,
    ) -> Self {
        Self {
            client,
            store,
            registry,
            max_results,
        }
    }

    /// Run one complete pass over the registry.
    ///
    /// Safe to call concurrently with itself: the store's atomic upsert
    /// makes overlapping passes redundant work rather than corruption.
    pub async fn run_pass(&self) -> PassSummary {
        let mut summary = PassSummary::default();

        for channel in &self.registry {
            summary.reports.push(self.sync_channel(channel).await);
        }

        info!(
            merged = summary.merged_total(),
            failed = summary.failed_total(),
            skipped_channels = summary.skipped_channels(),
            channels = summary.reports.len(),
            "sync pass finished"
        );
        summary
    }

    async fn sync_channel(&self, channel: &steeple_config::ChannelEntry) -> ChannelReport {
        let channel_id = match resolve_channel(&self.client, channel).await {
            Resolution::Resolved(id) => id,
            Resolution::NotFound => {
                warn!(channel = %channel.name, stage = "resolve", "channel skipped");
                return ChannelReport {
                    name: channel.name.clone(),
                    channel_id: None,
                    status: ChannelStatus::Unresolved,
                    merged: 0,
                    failed: 0,
                };
            },
        };

        let records = match fetch_videos(&self.client, &channel_id, self.max_results).await {
            Ok(records) => records,
            Err(error) => {
                warn!(
                    channel = %channel.name,
                    %channel_id,
                    stage = "fetch",
                    %error,
                    "channel skipped"
                );
                return ChannelReport {
                    name: channel.name.clone(),
                    channel_id: Some(channel_id),
                    status: ChannelStatus::FetchFailed,
                    merged: 0,
                    failed: 0,
                };
            },
        };

        let mut merged = 0;
        let mut failed = 0;
        // Merge in fetch order (newest first). One bad record never aborts
        // the rest of the batch.
        for record in &records {
            match self.store.upsert(record).await {
                Ok(_) => merged += 1,
                Err(error) => {
                    failed += 1;
                    warn!(
                        channel = %channel.name,
                        video_id = %record.video_id,
                        stage = "merge",
                        %error,
                        "record skipped"
                    );
                },
            }
        }

        debug!(channel = %channel.name, %channel_id, merged, failed, "channel synced");
        ChannelReport {
            name: channel.name.clone(),
            channel_id: Some(channel_id),
            status: ChannelStatus::Synced,
            merged,
            failed,
        }
    }
}
