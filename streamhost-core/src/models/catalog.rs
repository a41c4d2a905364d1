use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A video row as stored by the dashboard (`playlists_videos`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct CatalogVideo {
    /// Path under the media server's content root, with a leading slash
    #[sqlx(rename = "path_video")]
    pub path: String,
    #[sqlx(rename = "video")]
    pub title: String,
}

impl CatalogVideo {
    /// URL of this video through the content proxy
    #[must_use]
    pub fn content_url(&self) -> String {
        if self.path.starts_with('/') {
            format!("/content{}", self.path)
        } else {
            format!("/content/{}", self.path)
        }
    }
}
