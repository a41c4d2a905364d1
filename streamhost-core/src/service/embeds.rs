//! Embed snippets offered to dashboard users for their live stream

use serde::Serialize;

use crate::{models::StreamName, upstream::UpstreamResolver, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerKind {
    Universal,
    Iframe,
    Html5,
    Mobile,
    Facebook,
    Android,
}

impl PlayerKind {
    pub const ALL: [Self; 6] = [
        Self::Universal,
        Self::Iframe,
        Self::Html5,
        Self::Mobile,
        Self::Facebook,
        Self::Android,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Universal => "Universal player",
            Self::Iframe => "iFrame player",
            Self::Html5 => "HTML5 player",
            Self::Mobile => "Mobile player",
            Self::Facebook => "Facebook player",
            Self::Android => "Android player",
        }
    }

    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Universal => "Full player with HLS, MP4 and advanced controls",
            Self::Iframe => "Simple iFrame embed for external sites",
            Self::Html5 => "Native HTML5 video element for maximum compatibility",
            Self::Mobile => "Optimized for touch devices",
            Self::Facebook => "Share the stream on Facebook and other social networks",
            Self::Android => "ExoPlayer snippet for native Android apps",
        }
    }

    #[must_use]
    pub const fn features(self) -> &'static [&'static str] {
        match self {
            Self::Universal => &["HLS/M3U8", "MP4/AVI/MOV", "Custom controls", "Fullscreen", "Statistics"],
            Self::Iframe => &["Easy embedding", "Responsive", "Cross-domain"],
            Self::Html5 => &["Native HTML5", "Lightweight", "No dependencies"],
            Self::Mobile => &["Touch friendly", "Responsive", "Low power"],
            Self::Facebook => &["Facebook Live", "Open Graph", "Sharing"],
            Self::Android => &["ExoPlayer", "Hardware acceleration", "Background play"],
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct EmbedSnippet {
    pub id: PlayerKind,
    pub name: &'static str,
    pub description: &'static str,
    pub features: &'static [&'static str],
    pub code: String,
    pub preview_url: String,
}

/// Everything a user needs to publish and embed their live stream
#[derive(Debug, Clone, Serialize)]
pub struct EmbedBundle {
    pub stream: StreamName,
    pub stream_url: String,
    pub rtmp_url: String,
    pub players: Vec<EmbedSnippet>,
}

/// Build the embed catalogue for a dashboard login
pub fn embed_bundle(resolver: &UpstreamResolver, login: &str) -> Result<EmbedBundle> {
    let stream = StreamName::live_for_login(login)?;
    let stream_url = resolver.live_playlist_url(&stream);
    let mp4_url = resolver.live_mp4_url(&stream);
    let iframe_url = format!("/api/players/iframe?stream={stream}");
    let social_url = format!("/api/players/social?stream={stream}");

    let players = PlayerKind::ALL
        .into_iter()
        .map(|kind| {
            let (code, preview_url) = match kind {
                PlayerKind::Universal => (
                    format!(
                        "<div id=\"universal-player\"></div>\n<script>\n  const player = new UniversalPlayer({{\n    container: '#universal-player',\n    src: '{stream_url}',\n    autoplay: true,\n    controls: true,\n    responsive: true\n  }});\n</script>"
                    ),
                    stream_url.clone(),
                ),
                PlayerKind::Iframe => (
                    format!(
                        "<iframe\n  src=\"{iframe_url}\"\n  width=\"640\"\n  height=\"360\"\n  frameborder=\"0\"\n  allowfullscreen>\n</iframe>"
                    ),
                    iframe_url.clone(),
                ),
                PlayerKind::Html5 => (
                    format!(
                        "<video width=\"640\" height=\"360\" controls autoplay muted>\n  <source src=\"{stream_url}\" type=\"application/vnd.apple.mpegurl\">\n  <source src=\"{mp4_url}\" type=\"video/mp4\">\n  Your browser does not support HTML5 video.\n</video>"
                    ),
                    stream_url.clone(),
                ),
                PlayerKind::Mobile => (
                    format!(
                        "<div id=\"mobile-player\" class=\"mobile-player\">\n  <video playsinline webkit-playsinline controls width=\"100%\" height=\"auto\">\n    <source src=\"{stream_url}\" type=\"application/vnd.apple.mpegurl\">\n  </video>\n</div>\n<style>\n.mobile-player {{ max-width: 100%; touch-action: manipulation; }}\n</style>"
                    ),
                    stream_url.clone(),
                ),
                PlayerKind::Facebook => (
                    format!(
                        "<div class=\"fb-video\"\n     data-href=\"{social_url}\"\n     data-width=\"640\"\n     data-show-text=\"false\">\n</div>\n<script async defer crossorigin=\"anonymous\"\n        src=\"https://connect.facebook.net/en_US/sdk.js#xfbml=1&version=v18.0\">\n</script>"
                    ),
                    social_url.clone(),
                ),
                PlayerKind::Android => (
                    format!(
                        "// Android ExoPlayer\nExoPlayer player = new ExoPlayer.Builder(context).build();\nplayerView.setPlayer(player);\n\nMediaItem mediaItem = MediaItem.fromUri(\"{stream_url}\");\nplayer.setMediaItem(mediaItem);\nplayer.prepare();\nplayer.play();"
                    ),
                    stream_url.clone(),
                ),
            };

            EmbedSnippet {
                id: kind,
                name: kind.name(),
                description: kind.description(),
                features: kind.features(),
                code,
                preview_url,
            }
        })
        .collect();

    Ok(EmbedBundle {
        rtmp_url: resolver.rtmp_ingest_url(),
        stream,
        stream_url,
        players,
    })
}
