//! Upstream media server addressing
//!
//! Maps `/content` requests onto the URLs the media server may answer them
//! at, and builds the public URLs handed to players and encoders.

use crate::config::MediaServerConfig;
use crate::models::{MediaFormat, StreamName};
use crate::playback::is_safe_content_path;

/// Builds candidate upstream URLs for content requests
#[derive(Debug, Clone)]
pub struct UpstreamResolver {
    hosts: Vec<String>,
    public_host: String,
    public_scheme: String,
    live_port: u16,
    vod_port: u16,
    live_application: String,
    vod_application: String,
}

impl UpstreamResolver {
    #[must_use]
    pub fn new(config: &MediaServerConfig) -> Self {
        Self {
            hosts: config.upstream_hosts(),
            public_host: config.public_host.clone(),
            public_scheme: config.public_scheme.clone(),
            live_port: config.live_port,
            vod_port: config.vod_port,
            live_application: config.live_application.trim_matches('/').to_string(),
            vod_application: config.vod_application.trim_matches('/').to_string(),
        }
    }

    #[must_use]
    pub fn hosts(&self) -> &[String] {
        &self.hosts
    }

    /// Candidate URLs for a path below `/content`, in the order they should
    /// be tried. Host-major: every route on the first host is tried before
    /// the second host. Duplicates are dropped, keeping the first position.
    ///
    /// Paths that could climb out of the content root yield no candidates.
    #[must_use]
    pub fn candidates(&self, path: &str, query: Option<&str>, format: MediaFormat) -> Vec<String> {
        if !is_safe_content_path(path) {
            return Vec::new();
        }
        let path = if path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{path}")
        };
        let suffix = match query.filter(|q| !q.is_empty()) {
            Some(q) => format!("{path}?{q}"),
            None => path,
        };

        let mut urls = Vec::with_capacity(self.hosts.len() * 2);
        for host in &self.hosts {
            let primary = if format.is_stream() {
                format!("http://{host}:{}{suffix}", self.live_port)
            } else {
                format!("http://{host}:{}/content{suffix}", self.vod_port)
            };
            push_unique(&mut urls, primary);
            push_unique(&mut urls, format!("{}{suffix}", self.direct_vod_prefix(host)));
        }
        urls
    }

    /// `http://{host}:{live_port}/{vod_application}` with no trailing slash
    #[must_use]
    pub fn direct_vod_prefix(&self, host: &str) -> String {
        format!("http://{host}:{}/{}", self.live_port, self.vod_application)
    }

    /// `http://{host}:{live_port}/{root}` where `root` is the first segment
    /// of the VOD application (`vod` for `vod/_definst_`)
    #[must_use]
    pub fn direct_vod_root_prefix(&self, host: &str) -> String {
        let root = self
            .vod_application
            .split('/')
            .next()
            .unwrap_or_default();
        format!("http://{host}:{}/{root}", self.live_port)
    }

    /// HLS playlist viewers use to watch a live stream
    #[must_use]
    pub fn live_playlist_url(&self, stream: &StreamName) -> String {
        format!("{}/{stream}/playlist.m3u8", self.public_live_base())
    }

    /// Path of a live playlist on the media server, as accepted by
    /// [`Self::candidates`]
    #[must_use]
    pub fn live_playlist_path(&self, stream: &StreamName) -> String {
        format!("/{}/{stream}/playlist.m3u8", self.live_application)
    }

    /// Where each upstream host serves a live playlist, in host order
    #[must_use]
    pub fn live_candidates(&self, stream: &StreamName) -> Vec<String> {
        let path = self.live_playlist_path(stream);
        let mut urls = Vec::with_capacity(self.hosts.len());
        for host in &self.hosts {
            push_unique(&mut urls, format!("http://{host}:{}{path}", self.live_port));
        }
        urls
    }

    /// Progressive MP4 rendition of a live stream
    #[must_use]
    pub fn live_mp4_url(&self, stream: &StreamName) -> String {
        format!("{}/{stream}.mp4", self.public_live_base())
    }

    /// Ingest endpoint encoders publish to (stream name is the key)
    #[must_use]
    pub fn rtmp_ingest_url(&self) -> String {
        format!(
            "rtmp://{}:{}/{}",
            self.public_host, self.live_port, self.live_application
        )
    }

    fn public_live_base(&self) -> String {
        format!(
            "{}://{}:{}/{}",
            self.public_scheme, self.public_host, self.live_port, self.live_application
        )
    }
}

fn push_unique(urls: &mut Vec<String>, url: String) {
    if !urls.contains(&url) {
        urls.push(url);
    }
}
