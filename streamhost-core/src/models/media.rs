//! Media formats served through the content proxy

use serde::{Deserialize, Serialize};

/// A file format the proxy is willing to serve, keyed by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaFormat {
    /// HLS playlist (`.m3u8`)
    Hls,
    /// MPEG transport stream segment (`.ts`)
    TransportStream,
    Mp4,
    Avi,
    Mov,
    Wmv,
    Flv,
    Webm,
    Mkv,
}

impl MediaFormat {
    pub const ALL: [Self; 9] = [
        Self::Hls,
        Self::TransportStream,
        Self::Mp4,
        Self::Avi,
        Self::Mov,
        Self::Wmv,
        Self::Flv,
        Self::Webm,
        Self::Mkv,
    ];

    /// Match an extension (without the dot), ignoring case.
    #[must_use]
    pub fn from_extension(ext: &str) -> Option<Self> {
        let format = match ext.to_ascii_lowercase().as_str() {
            "m3u8" => Self::Hls,
            "ts" => Self::TransportStream,
            "mp4" => Self::Mp4,
            "avi" => Self::Avi,
            "mov" => Self::Mov,
            "wmv" => Self::Wmv,
            "flv" => Self::Flv,
            "webm" => Self::Webm,
            "mkv" => Self::Mkv,
            _ => return None,
        };
        Some(format)
    }

    /// Classify a request path by the extension of its last segment.
    #[must_use]
    pub fn from_path(path: &str) -> Option<Self> {
        let file_name = path.rsplit('/').next()?;
        let (_, ext) = file_name.rsplit_once('.')?;
        Self::from_extension(ext)
    }

    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Hls => "m3u8",
            Self::TransportStream => "ts",
            Self::Mp4 => "mp4",
            Self::Avi => "avi",
            Self::Mov => "mov",
            Self::Wmv => "wmv",
            Self::Flv => "flv",
            Self::Webm => "webm",
            Self::Mkv => "mkv",
        }
    }

    #[must_use]
    pub const fn content_type(self) -> &'static str {
        match self {
            Self::Hls => "application/vnd.apple.mpegurl",
            Self::TransportStream => "video/mp2t",
            Self::Mp4 => "video/mp4",
            Self::Avi => "video/x-msvideo",
            Self::Mov => "video/quicktime",
            Self::Wmv => "video/x-ms-wmv",
            Self::Flv => "video/x-flv",
            Self::Webm => "video/webm",
            Self::Mkv => "video/x-matroska",
        }
    }

    /// Playlists and segments are delivered by the live application and
    /// change underneath the client.
    #[must_use]
    pub const fn is_stream(self) -> bool {
        matches!(self, Self::Hls | Self::TransportStream)
    }

    #[must_use]
    pub fn cache_policy(self, vod_max_age_seconds: u64) -> CachePolicy {
        if self.is_stream() {
            CachePolicy::NoStore
        } else {
            CachePolicy::Public {
                max_age_seconds: vod_max_age_seconds,
            }
        }
    }
}

/// Caching headers attached to proxied content
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CachePolicy {
    NoStore,
    Public { max_age_seconds: u64 },
}

impl CachePolicy {
    /// Header name/value pairs for this policy
    #[must_use]
    pub fn headers(self) -> Vec<(&'static str, String)> {
        match self {
            Self::NoStore => vec![
                ("cache-control", "no-cache, no-store, must-revalidate".to_string()),
                ("pragma", "no-cache".to_string()),
                ("expires", "0".to_string()),
            ],
            Self::Public { max_age_seconds } => {
                vec![("cache-control", format!("public, max-age={max_age_seconds}"))]
            }
        }
    }
}

/// Coarse classification the embedded players use to pick a playback path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    Hls,
    Mp4,
    Webm,
    Ogg,
    Video,
    Unknown,
}

impl FileType {
    #[must_use]
    pub fn detect(url: &str) -> Self {
        let path = url.split(['?', '#']).next().unwrap_or_default();
        let ext = path
            .rsplit('/')
            .next()
            .and_then(|name| name.rsplit_once('.'))
            .map(|(_, ext)| ext.to_ascii_lowercase());

        match ext.as_deref() {
            Some("m3u8") => Self::Hls,
            Some("mp4") => Self::Mp4,
            Some("webm") => Self::Webm,
            Some("ogg") => Self::Ogg,
            Some("avi" | "mov" | "wmv" | "flv" | "mkv") => Self::Video,
            _ => Self::Unknown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_by_last_extension() {
        assert_eq!(MediaFormat::from_path("/user/folder/clip.MP4"), Some(MediaFormat::Mp4));
        assert_eq!(
            MediaFormat::from_path("/samhost/bob_live/playlist.m3u8"),
            Some(MediaFormat::Hls)
        );
        assert_eq!(
            MediaFormat::from_path("/samhost/bob_live/media_w1_12.ts"),
            Some(MediaFormat::TransportStream)
        );
        assert_eq!(MediaFormat::from_path("/user/clip.mp4/notes.txt"), None);
        assert_eq!(MediaFormat::from_path("/user/folder.mp4/readme"), None);
        assert_eq!(MediaFormat::from_path("/user/video"), None);
        assert_eq!(MediaFormat::from_path(""), None);
    }

    #[test]
    fn extension_round_trips_for_every_format() {
        for format in MediaFormat::ALL {
            assert_eq!(MediaFormat::from_extension(format.extension()), Some(format));
        }
    }

    #[test]
    fn content_types() {
        assert_eq!(MediaFormat::Hls.content_type(), "application/vnd.apple.mpegurl");
        assert_eq!(MediaFormat::TransportStream.content_type(), "video/mp2t");
        assert_eq!(MediaFormat::Mkv.content_type(), "video/x-matroska");
        assert_eq!(MediaFormat::Wmv.content_type(), "video/x-ms-wmv");
    }

    #[test]
    fn streams_are_never_cached() {
        assert_eq!(MediaFormat::Hls.cache_policy(3600), CachePolicy::NoStore);
        assert_eq!(
            MediaFormat::Mp4.cache_policy(3600),
            CachePolicy::Public { max_age_seconds: 3600 }
        );

        let headers = CachePolicy::NoStore.headers();
        assert_eq!(headers.len(), 3);
        assert_eq!(
            CachePolicy::Public { max_age_seconds: 60 }.headers(),
            vec![("cache-control", "public, max-age=60".to_string())]
        );
    }

    #[test]
    fn file_type_detection() {
        assert_eq!(FileType::detect("http://h:1935/app/s/playlist.m3u8"), FileType::Hls);
        assert_eq!(FileType::detect("/content/a/b.mp4?t=1"), FileType::Mp4);
        assert_eq!(FileType::detect("/content/a/b.OGG"), FileType::Ogg);
        assert_eq!(FileType::detect("/content/a/b.mkv"), FileType::Video);
        assert_eq!(FileType::detect("/content/a/b"), FileType::Unknown);
    }
}
