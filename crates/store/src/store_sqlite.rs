//! SQLite-backed video cache using sqlx.

use {
    async_trait::async_trait,
    chrono::{DateTime, SecondsFormat, Utc},
    sqlx::{SqlitePool, sqlite::SqlitePoolOptions},
};

use crate::{
    error::{Error, Result},
    store::VideoStore,
    types::VideoRecord,
};

/// SQLite-backed persistence for cached videos.
pub struct SqliteVideoStore {
    pool: SqlitePool,
}

impl SqliteVideoStore {
    /// Create a new store with its own connection pool and run migrations.
    ///
    /// Use this for standalone databases. For shared pools, use
    /// [`SqliteVideoStore::with_pool`] after calling [`crate::run_migrations`].
    pub async fn new(database_url: &str) -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await?;

        crate::run_migrations(&pool).await?;

        Ok(Self { pool })
    }

    /// Create a store using an existing pool (migrations must already be run).
    ///
    /// Call [`crate::run_migrations`] before using this constructor.
    pub fn with_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

/// Raw row shape; `published_at` is stored as fixed-width RFC 3339 text so
/// that `ORDER BY published_at` sorts chronologically.
#[derive(sqlx::FromRow)]
struct VideoRow {
    video_id: String,
    title: String,
    description: String,
    thumbnail_url: Option<String>,
    published_at: String,
    channel_id: String,
}

impl TryFrom<VideoRow> for VideoRecord {
    type Error = Error;

    fn try_from(row: VideoRow) -> Result<Self> {
        let published_at = DateTime::parse_from_rfc3339(&row.published_at)?.with_timezone(&Utc);
        Ok(VideoRecord {
            video_id: row.video_id,
            title: row.title,
            description: row.description,
            thumbnail_url: row.thumbnail_url,
            published_at,
            channel_id: row.channel_id,
        })
    }
}

/// Fixed-width UTC timestamp (millisecond precision) so lexicographic order
/// matches chronological order.
fn format_ts(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

const SELECT_COLUMNS: &str =
    "video_id, title, description, thumbnail_url, published_at, channel_id";

#[async_trait]
impl VideoStore for SqliteVideoStore {
    async fn upsert(&self, record: &VideoRecord) -> Result<VideoRecord> {
        let sql = format!(
            "INSERT INTO videos (video_id, title, description, thumbnail_url, published_at, channel_id)
             VALUES (?, ?, ?, ?, ?, ?)
             ON CONFLICT(video_id) DO UPDATE SET
                 title         = excluded.title,
                 description   = excluded.description,
                 thumbnail_url = excluded.thumbnail_url,
                 published_at  = excluded.published_at,
                 channel_id    = excluded.channel_id
             RETURNING {SELECT_COLUMNS}"
        );
        let row = sqlx::query_as::<_, VideoRow>(&sql)
            .bind(&record.video_id)
            .bind(&record.title)
            .bind(&record.description)
            .bind(&record.thumbnail_url)
            .bind(format_ts(&record.published_at))
            .bind(&record.channel_id)
            .fetch_one(&self.pool)
            .await?;
        row.try_into()
    }

    async fn get(&self, video_id: &str) -> Result<Option<VideoRecord>> {
        let sql = format!("SELECT {SELECT_COLUMNS} FROM videos WHERE video_id = ?");
        let row = sqlx::query_as::<_, VideoRow>(&sql)
            .bind(video_id)
            .fetch_optional(&self.pool)
            .await?;
        row.map(VideoRecord::try_from).transpose()
    }

    async fn list_recent(&self, limit: Option<u32>) -> Result<Vec<VideoRecord>> {
        // SQLite treats a negative LIMIT as "no limit".
        let limit = limit.map_or(-1i64, i64::from);
        let sql = format!("SELECT {SELECT_COLUMNS} FROM videos ORDER BY published_at DESC LIMIT ?");
        let rows = sqlx::query_as::<_, VideoRow>(&sql)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;
        rows.into_iter().map(VideoRecord::try_from).collect()
    }

    async fn delete_all(&self) -> Result<u64> {
        let result = sqlx::query("DELETE FROM videos").execute(&self.pool).await?;
        Ok(result.rows_affected())
    }

    async fn count(&self) -> Result<u64> {
        let n: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM videos")
            .fetch_one(&self.pool)
            .await?;
        Ok(n.unsigned_abs())
    }
}
