//! Shared fixtures for the router tests

#![allow(dead_code)]

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, Response},
    Router,
};
use http_body_util::BodyExt;
use streamhost_api::{create_router, AppState};
use streamhost_core::{
    models::CatalogVideo, repository::MediaCatalog, Config, Error, Result,
};
use tower::ServiceExt;

/// Catalog held in memory; `healthy = false` makes every call fail
#[derive(Default)]
pub struct InMemoryCatalog {
    pub healthy: bool,
    pub playlists: HashMap<i64, (String, Vec<CatalogVideo>)>,
    pub videos: HashMap<i64, CatalogVideo>,
}

impl InMemoryCatalog {
    pub fn healthy() -> Self {
        Self {
            healthy: true,
            ..Self::default()
        }
    }

    pub fn with_playlist(mut self, id: i64, name: &str, videos: Vec<CatalogVideo>) -> Self {
        self.playlists.insert(id, (name.to_string(), videos));
        self
    }

    pub fn with_video(mut self, code: i64, video: CatalogVideo) -> Self {
        self.videos.insert(code, video);
        self
    }

    fn check(&self) -> Result<()> {
        if self.healthy {
            Ok(())
        } else {
            Err(Error::Internal("connection refused".to_string()))
        }
    }
}

#[async_trait]
impl MediaCatalog for InMemoryCatalog {
    async fn playlist_name(&self, playlist_id: i64) -> Result<Option<String>> {
        self.check()?;
        Ok(self.playlists.get(&playlist_id).map(|(name, _)| name.clone()))
    }

    async fn first_playlist_video(&self, playlist_id: i64) -> Result<Option<CatalogVideo>> {
        self.check()?;
        Ok(self
            .playlists
            .get(&playlist_id)
            .and_then(|(_, videos)| videos.first().cloned()))
    }

    async fn video_by_code(&self, code: i64) -> Result<Option<CatalogVideo>> {
        self.check()?;
        Ok(self.videos.get(&code).cloned())
    }

    async fn ping(&self) -> Result<()> {
        self.check()
    }
}

pub fn video(path: &str, title: &str) -> CatalogVideo {
    CatalogVideo {
        path: path.to_string(),
        title: title.to_string(),
    }
}

/// Port of a wiremock server URI such as `http://127.0.0.1:41234`
pub fn port_of(uri: &str) -> u16 {
    uri.rsplit(':').next().unwrap().parse().unwrap()
}

/// Config pointing every media server route at localhost
pub fn config_with_ports(live_port: u16, vod_port: u16) -> Config {
    let mut config = Config::default();
    config.media_server.hosts = vec!["127.0.0.1".to_string()];
    config.media_server.public_host = "media.example.com".to_string();
    config.media_server.live_port = live_port;
    config.media_server.vod_port = vod_port;
    config.proxy.timeout_seconds = 2;
    config.proxy.connect_timeout_seconds = 1;
    config
}

pub fn app(config: Config, catalog: InMemoryCatalog) -> Router {
    let state = AppState::new(Arc::new(config), Arc::new(catalog)).unwrap();
    create_router(state)
}

pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Request::builder().uri(uri).body(Body::empty()).unwrap()).await
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response.into_body().collect().await.unwrap().to_bytes().to_vec()
}

pub async fn body_text(response: Response<Body>) -> String {
    String::from_utf8(body_bytes(response).await).unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}
