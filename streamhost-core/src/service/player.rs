//! Resolves what an embedded player page should play

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{
    models::StreamName,
    repository::MediaCatalog,
    upstream::UpstreamResolver,
    Error, Result,
};

/// Query accepted by the iframe player. Empty values count as absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlayerRequest {
    pub stream: Option<String>,
    pub playlist: Option<String>,
    pub video: Option<String>,
}

/// What a player page plays and how it labels it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerSource {
    pub title: String,
    /// `None` renders the "nothing to play" state
    pub video_url: Option<String>,
    pub is_live: bool,
}

impl Default for PlayerSource {
    fn default() -> Self {
        Self {
            title: "Player".to_string(),
            video_url: None,
            is_live: false,
        }
    }
}

#[derive(Clone)]
pub struct PlayerService {
    catalog: Arc<dyn MediaCatalog>,
    resolver: Arc<UpstreamResolver>,
}

impl PlayerService {
    #[must_use]
    pub fn new(catalog: Arc<dyn MediaCatalog>, resolver: Arc<UpstreamResolver>) -> Self {
        Self { catalog, resolver }
    }

    /// Pick the source for an iframe player.
    ///
    /// `stream` wins over `playlist`, which wins over `video`. Catalog
    /// failures degrade to a page without a video; only malformed input is
    /// an error.
    pub async fn resolve(&self, request: &PlayerRequest) -> Result<PlayerSource> {
        if let Some(stream) = present(request.stream.as_deref()) {
            let stream = StreamName::parse(stream)?;
            return Ok(self.live_source(&stream));
        }

        if let Some(playlist) = present(request.playlist.as_deref()) {
            let playlist_id = parse_id("playlist", playlist)?;
            return Ok(self.playlist_source(playlist_id).await);
        }

        if let Some(video) = present(request.video.as_deref()) {
            let code = parse_id("video", video)?;
            return Ok(self.video_source(code).await);
        }

        Ok(PlayerSource::default())
    }

    #[must_use]
    pub fn live_source(&self, stream: &StreamName) -> PlayerSource {
        PlayerSource {
            title: format!("Stream: {stream}"),
            video_url: Some(self.resolver.live_playlist_url(stream)),
            is_live: true,
        }
    }

    async fn playlist_source(&self, playlist_id: i64) -> PlayerSource {
        let mut source = PlayerSource::default();

        let name = match self.catalog.playlist_name(playlist_id).await {
            Ok(Some(name)) => name,
            Ok(None) => return source,
            Err(e) => {
                warn!(playlist_id, error = %e, "Failed to load playlist");
                return source;
            }
        };
        source.title = format!("Playlist: {name}");

        match self.catalog.first_playlist_video(playlist_id).await {
            Ok(Some(video)) => {
                source.video_url = Some(video.content_url());
                source.title = video.title;
            }
            Ok(None) => {}
            Err(e) => warn!(playlist_id, error = %e, "Failed to load playlist videos"),
        }

        source
    }

    async fn video_source(&self, code: i64) -> PlayerSource {
        match self.catalog.video_by_code(code).await {
            Ok(Some(video)) => PlayerSource {
                video_url: Some(video.content_url()),
                title: video.title,
                is_live: false,
            },
            Ok(None) => PlayerSource::default(),
            Err(e) => {
                warn!(code, error = %e, "Failed to load video");
                PlayerSource::default()
            }
        }
    }
}

fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn parse_id(field: &str, raw: &str) -> Result<i64> {
    raw.parse::<i64>()
        .map_err(|_| Error::InvalidInput(format!("{field} must be a numeric id")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MediaServerConfig;
    use crate::models::CatalogVideo;
    use async_trait::async_trait;

    struct FixedCatalog {
        broken: bool,
    }

    #[async_trait]
    impl MediaCatalog for FixedCatalog {
        async fn playlist_name(&self, playlist_id: i64) -> Result<Option<String>> {
            if self.broken {
                return Err(Error::Internal("down".to_string()));
            }
            Ok((playlist_id == 3).then(|| "Morning show".to_string()))
        }

        async fn first_playlist_video(&self, playlist_id: i64) -> Result<Option<CatalogVideo>> {
            Ok((playlist_id == 3).then(|| CatalogVideo {
                path: "/bob/morning/ep1.mp4".to_string(),
                title: "Episode 1".to_string(),
            }))
        }

        async fn video_by_code(&self, code: i64) -> Result<Option<CatalogVideo>> {
            if self.broken {
                return Err(Error::Internal("down".to_string()));
            }
            Ok((code == 7).then(|| CatalogVideo {
                path: "/bob/clips/goal.mp4".to_string(),
                title: "Goal".to_string(),
            }))
        }

        async fn ping(&self) -> Result<()> {
            Ok(())
        }
    }

    fn service(broken: bool) -> PlayerService {
        let resolver = UpstreamResolver::new(&MediaServerConfig {
            public_host: "media.example.com".to_string(),
            ..MediaServerConfig::default()
        });
        PlayerService::new(Arc::new(FixedCatalog { broken }), Arc::new(resolver))
    }

    fn request(stream: Option<&str>, playlist: Option<&str>, video: Option<&str>) -> PlayerRequest {
        PlayerRequest {
            stream: stream.map(str::to_string),
            playlist: playlist.map(str::to_string),
            video: video.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn stream_takes_precedence() {
        let source = service(false)
            .resolve(&request(Some("bob_live"), Some("3"), Some("7")))
            .await
            .unwrap();
        assert!(source.is_live);
        assert_eq!(source.title, "Stream: bob_live");
        assert_eq!(
            source.video_url.as_deref(),
            Some("http://media.example.com:1935/samhost/bob_live/playlist.m3u8")
        );
    }

    #[tokio::test]
    async fn playlist_plays_first_video() {
        let source = service(false).resolve(&request(Some(""), Some("3"), None)).await.unwrap();
        assert!(!source.is_live);
        assert_eq!(source.title, "Episode 1");
        assert_eq!(source.video_url.as_deref(), Some("/content/bob/morning/ep1.mp4"));
    }

    #[tokio::test]
    async fn unknown_playlist_renders_empty_player() {
        let source = service(false).resolve(&request(None, Some("99"), None)).await.unwrap();
        assert_eq!(source, PlayerSource::default());
    }

    #[tokio::test]
    async fn video_by_code() {
        let source = service(false).resolve(&request(None, None, Some("7"))).await.unwrap();
        assert_eq!(source.title, "Goal");
        assert_eq!(source.video_url.as_deref(), Some("/content/bob/clips/goal.mp4"));
    }

    #[tokio::test]
    async fn catalog_failure_degrades() {
        let source = service(true).resolve(&request(None, Some("3"), None)).await.unwrap();
        assert_eq!(source, PlayerSource::default());
        let source = service(true).resolve(&request(None, None, Some("7"))).await.unwrap();
        assert_eq!(source, PlayerSource::default());
    }

    #[tokio::test]
    async fn malformed_input_is_rejected() {
        let svc = service(false);
        assert!(matches!(
            svc.resolve(&request(Some("a/b"), None, None)).await,
            Err(Error::InvalidInput(_))
        ));
        assert!(matches!(
            svc.resolve(&request(None, Some("abc"), None)).await,
            Err(Error::InvalidInput(_))
        ));
    }

    #[tokio::test]
    async fn nothing_requested() {
        let source = service(false).resolve(&PlayerRequest::default()).await.unwrap();
        assert_eq!(source.title, "Player");
        assert!(source.video_url.is_none());
    }
}
