//! HTML pages for embeddable players
//!
//! Uses Handlebars; `{{...}}` values are HTML-escaped, values placed inside
//! `<script>` go through [`js_string`] and are inserted raw.

use std::sync::Arc;

use handlebars::Handlebars;
use serde_json::json;

use crate::{models::StreamName, service::player::PlayerSource, Error, Result};

/// Static page returned when a player page cannot be rendered
pub const PLAYER_ERROR_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head><title>Error</title></head>
<body style="background:#000;color:white;display:flex;align-items:center;justify-content:center;height:100vh;margin:0;font-family:Arial">
    <div style="text-align:center">
        <h2>Player error</h2>
        <p>The requested content could not be loaded.</p>
    </div>
</body>
</html>"#;

/// Renders player pages
#[derive(Clone)]
pub struct PlayerPages {
    handlebars: Arc<Handlebars<'static>>,
}

impl PlayerPages {
    pub fn new() -> Result<Self> {
        let mut handlebars = Handlebars::new();

        handlebars
            .register_template_string("iframe", IFRAME_TEMPLATE)
            .map_err(|e| Error::Template(format!("Failed to register iframe template: {e}")))?;

        handlebars
            .register_template_string("social", SOCIAL_TEMPLATE)
            .map_err(|e| Error::Template(format!("Failed to register social template: {e}")))?;

        handlebars
            .register_template_string("invalid", INVALID_REQUEST_TEMPLATE)
            .map_err(|e| Error::Template(format!("Failed to register invalid request template: {e}")))?;

        Ok(Self {
            handlebars: Arc::new(handlebars),
        })
    }

    /// Full-viewport player for `/api/players/iframe`
    pub fn render_iframe(&self, source: &PlayerSource) -> Result<String> {
        let video_url = source.video_url.as_deref().unwrap_or_default();
        let data = json!({
            "title": source.title,
            "is_live": source.is_live,
            "video_url_js": js_string(video_url)?,
            // Live streams are always HLS even without an .m3u8 suffix
            "is_hls_js": source.is_live || video_url.contains(".m3u8"),
            "back_buffer": if source.is_live { 10 } else { 30 },
            "max_buffer": if source.is_live { 20 } else { 60 },
        });

        Ok(self.handlebars.render("iframe", &data)?)
    }

    /// Open Graph enabled page for `/api/players/social`
    ///
    /// `page_url` is the absolute URL of the page itself (`og:url`).
    pub fn render_social(&self, stream: &StreamName, video_url: &str, page_url: &str) -> Result<String> {
        let data = json!({
            "stream": stream.as_str(),
            "video_url": video_url,
            "video_url_js": js_string(video_url)?,
            "page_url": page_url,
        });

        Ok(self.handlebars.render("social", &data)?)
    }

    /// Page shown in place of a player when the query cannot be used
    pub fn render_invalid(&self, message: &str) -> Result<String> {
        Ok(self.handlebars.render("invalid", &json!({ "message": message }))?)
    }
}

/// Encode a value as a JS string literal that cannot close a `<script>`.
fn js_string(value: &str) -> Result<String> {
    let encoded = serde_json::to_string(value)
        .map_err(|e| Error::Internal(format!("Failed to encode script value: {e}")))?;
    Ok(encoded.replace('<', "\\u003c").replace('>', "\\u003e"))
}

const IFRAME_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{{title}}</title>
    <script src="https://cdn.jsdelivr.net/npm/hls.js@latest"></script>
    <style>
        body { margin: 0; padding: 0; background: #000; font-family: Arial, sans-serif; overflow: hidden; }
        .player-container { position: relative; width: 100vw; height: 100vh; display: flex; align-items: center; justify-content: center; }
        video { width: 100%; height: 100%; object-fit: contain; }
        .player-overlay { position: absolute; top: 20px; left: 20px; background: rgba(0, 0, 0, 0.7); color: white; padding: 10px 15px; border-radius: 5px; font-size: 14px; z-index: 10; }
        .live-indicator { display: inline-flex; align-items: center; gap: 8px; }
        .live-dot { width: 8px; height: 8px; background: #ff0000; border-radius: 50%; animation: pulse 1.5s infinite; }
        @keyframes pulse { 0% { opacity: 1; } 50% { opacity: 0.5; } 100% { opacity: 1; } }
        .error-message { color: white; text-align: center; padding: 20px; }
    </style>
</head>
<body>
    <div class="player-container">
        <div class="player-overlay">
            <div class="live-indicator">
                {{#if is_live}}<div class="live-dot"></div><span>LIVE</span>{{else}}<span>VOD</span>{{/if}}
            </div>
            <div>{{title}}</div>
        </div>

        <video id="video" controls autoplay muted playsinline>
            <p class="error-message">Your browser does not support video playback.</p>
        </video>
    </div>

    <script>
        const video = document.getElementById('video');
        const container = document.querySelector('.player-container');
        const videoUrl = {{{video_url_js}}};
        const isLive = {{is_live}};

        function showError(message) {
            const box = document.createElement('div');
            box.className = 'error-message';
            box.textContent = message;
            container.replaceChildren(box);
        }

        if (!videoUrl) {
            showError('No video specified');
        } else {
            const isHls = {{is_hls_js}};

            if (isHls && window.Hls && Hls.isSupported()) {
                const hls = new Hls({
                    enableWorker: true,
                    lowLatencyMode: isLive,
                    backBufferLength: {{back_buffer}},
                    maxBufferLength: {{max_buffer}},
                    debug: false
                });
                hls.loadSource(videoUrl);
                hls.attachMedia(video);
                hls.on(Hls.Events.ERROR, function (event, data) {
                    if (data.fatal) {
                        showError('Failed to load stream: ' + (data.details || 'unknown error'));
                    }
                });
            } else {
                // Safari plays HLS natively; everything else is a plain file
                video.src = videoUrl;
            }

            video.addEventListener('error', function () {
                showError('Failed to load video');
            });

            video.play().catch(function () {
                // Autoplay may be blocked by browser policy
            });
        }
    </script>
</body>
</html>"#;

const SOCIAL_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Stream: {{stream}}</title>
    <meta property="og:title" content="Live stream: {{stream}}">
    <meta property="og:description" content="Watch the live stream">
    <meta property="og:type" content="video.other">
    <meta property="og:url" content="{{page_url}}">
    <meta property="og:video" content="{{video_url}}">
    <meta property="og:video:type" content="application/vnd.apple.mpegurl">
    <script src="https://cdn.jsdelivr.net/npm/hls.js@latest"></script>
    <style>
        body { margin: 0; background: #000; }
        .container { width: 100vw; height: 100vh; display: flex; align-items: center; justify-content: center; }
        video { width: 100%; height: 100%; object-fit: contain; }
    </style>
</head>
<body>
    <div class="container">
        <video id="video" controls autoplay muted playsinline>
            <source src="{{video_url}}" type="application/vnd.apple.mpegurl">
        </video>
    </div>
    <script>
        const video = document.getElementById('video');
        if (window.Hls && Hls.isSupported()) {
            const hls = new Hls();
            hls.loadSource({{{video_url_js}}});
            hls.attachMedia(video);
        }
    </script>
</body>
</html>"#;

const INVALID_REQUEST_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head><title>Invalid request</title></head>
<body style="background:#000;color:white;display:flex;align-items:center;justify-content:center;height:100vh;margin:0;font-family:Arial">
    <div style="text-align:center">
        <h2>Invalid request</h2>
        <p>{{message}}</p>
    </div>
</body>
</html>"#;
