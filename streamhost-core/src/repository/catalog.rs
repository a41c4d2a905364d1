//! Read-only access to the dashboard's playlist tables
//!
//! The schema belongs to the dashboard; this service never writes to it.

use async_trait::async_trait;
use sqlx::MySqlPool;

use crate::{models::CatalogVideo, Result};

/// Lookups the player endpoints need
#[async_trait]
pub trait MediaCatalog: Send + Sync {
    /// Display name of a playlist
    async fn playlist_name(&self, playlist_id: i64) -> Result<Option<String>>;

    /// First video of a playlist by its configured order
    async fn first_playlist_video(&self, playlist_id: i64) -> Result<Option<CatalogVideo>>;

    /// A single playlist entry by its code
    async fn video_by_code(&self, code: i64) -> Result<Option<CatalogVideo>>;

    /// Round-trip to the backing store
    async fn ping(&self) -> Result<()>;
}

/// `MediaCatalog` backed by the dashboard's MySQL database
#[derive(Clone)]
pub struct MySqlMediaCatalog {
    pool: MySqlPool,
}

impl MySqlMediaCatalog {
    #[must_use]
    pub const fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MediaCatalog for MySqlMediaCatalog {
    async fn playlist_name(&self, playlist_id: i64) -> Result<Option<String>> {
        let name: Option<String> = sqlx::query_scalar(
            r"
            SELECT nome
            FROM playlists
            WHERE id = ?
            ",
        )
        .bind(playlist_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(name)
    }

    async fn first_playlist_video(&self, playlist_id: i64) -> Result<Option<CatalogVideo>> {
        let video = sqlx::query_as::<_, CatalogVideo>(
            r"
            SELECT path_video, video
            FROM playlists_videos
            WHERE codigo_playlist = ?
            ORDER BY ordem
            LIMIT 1
            ",
        )
        .bind(playlist_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(video)
    }

    async fn video_by_code(&self, code: i64) -> Result<Option<CatalogVideo>> {
        let video = sqlx::query_as::<_, CatalogVideo>(
            r"
            SELECT path_video, video
            FROM playlists_videos
            WHERE codigo = ?
            ",
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await?;

        Ok(video)
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
