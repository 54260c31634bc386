use {clap::Subcommand, steeple_config::SteepleConfig, steeple_store::VideoStore};

#[derive(Subcommand)]
pub enum VideoAction {
    /// List cached videos, newest first.
    List {
        /// Maximum number of rows to print.
        #[arg(long, default_value_t = 20)]
        limit: u32,
    },
    /// Delete every cached video.
    Clear {
        /// Skip the confirmation prompt.
        #[arg(long, default_value_t = false)]
        yes: bool,
    },
}

pub async fn handle(action: VideoAction, config: &SteepleConfig) -> anyhow::Result<()> {
    let store = crate::open_store(config).await?;
    match action {
        VideoAction::List { limit } => list(&store, limit).await,
        VideoAction::Clear { yes } => clear(&store, yes).await,
    }
}

async fn list(store: &impl VideoStore, limit: u32) -> anyhow::Result<()> {
    let videos = store.list_recent(Some(limit)).await?;
    if videos.is_empty() {
        println!("No cached videos. Run `steeple sync` to populate the cache.");
        return Ok(());
    }

    println!("{:<14} {:<22} {:<26} TITLE", "VIDEO", "PUBLISHED", "CHANNEL");
    for video in &videos {
        println!(
            "{:<14} {:<22} {:<26} {}",
            video.video_id,
            video.published_at.format("%Y-%m-%d %H:%M UTC"),
            video.channel_id,
            video.title
        );
    }
    Ok(())
}

async fn clear(store: &impl VideoStore, yes: bool) -> anyhow::Result<()> {
    let count = store.count().await?;
    if count == 0 {
        println!("Cache is already empty.");
        return Ok(());
    }

    if !yes && !crate::confirm(&format!("Delete all {count} cached videos?")) {
        println!("Aborted.");
        return Ok(());
    }

    let deleted = store.delete_all().await?;
    println!("Deleted {deleted} cached videos.");
    Ok(())
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use {
        chrono::{TimeZone, Utc},
        steeple_store::{InMemoryVideoStore, VideoRecord},
    };

    use super::*;

    fn record(id: &str) -> VideoRecord {
        VideoRecord {
            video_id: id.into(),
            title: format!("Sermon {id}"),
            description: String::new(),
            thumbnail_url: None,
            published_at: Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap(),
            channel_id: "UCabc".into(),
        }
    }

    #[tokio::test]
    async fn test_clear_with_yes_deletes_everything() {
        let store = InMemoryVideoStore::new();
        store.upsert(&record("v1")).await.unwrap();
        store.upsert(&record("v2")).await.unwrap();

        clear(&store, true).await.unwrap();
        assert_eq!(store.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_clear_empty_cache_is_a_noop() {
        let store = InMemoryVideoStore::new();
        clear(&store, true).await.unwrap();
        assert_eq!(store.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_list_tolerates_empty_cache() {
        let store = InMemoryVideoStore::new();
        list(&store, 20).await.unwrap();
    }

    #[tokio::test]
    async fn test_list_prints_cached_records() {
        let store = InMemoryVideoStore::new();
        store.upsert(&record("v1")).await.unwrap();
        list(&store, 20).await.unwrap();
    }
}
