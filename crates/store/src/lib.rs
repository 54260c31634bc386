//! Durable cache for synced videos.
//! One table, keyed by the upstream `video_id`; writes are atomic upserts so
//! overlapping sync passes cannot duplicate rows.

pub mod error;
pub mod store;
pub mod store_memory;
pub mod store_sqlite;
pub mod types;

pub use {
    error::{Error, Result},
    store::VideoStore,
    store_memory::InMemoryVideoStore,
    store_sqlite::SqliteVideoStore,
    types::VideoRecord,
};

/// Run database migrations for the video cache.
///
/// Creates the `videos` table. Should be called at application startup when
/// using [`store_sqlite::SqliteVideoStore`] with a shared pool.
pub async fn run_migrations(pool: &sqlx::SqlitePool) -> Result<()> {
    sqlx::migrate!("./migrations")
        .set_ignore_missing(true)
        .run(pool)
        .await?;
    Ok(())
}
