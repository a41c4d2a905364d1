// Module: http
// Routes for the content proxy, the embedded players, stream status and health checks

pub mod content;
pub mod error;
pub mod health;
pub mod players;
pub mod streaming;

use std::{path::Path, sync::Arc};

use axum::{
    http::{header, HeaderValue, Method},
    routing::any,
    Router,
};
use streamhost_core::{
    repository::MediaCatalog,
    service::{PlayerPages, PlayerService},
    Config, UpstreamResolver,
};
use streamhost_proxy::ContentProxy;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

pub use error::{AppError, AppResult};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub catalog: Arc<dyn MediaCatalog>,
    pub resolver: Arc<UpstreamResolver>,
    pub proxy: Arc<ContentProxy>,
    pub players: PlayerService,
    pub pages: PlayerPages,
}

impl AppState {
    pub fn new(config: Arc<Config>, catalog: Arc<dyn MediaCatalog>) -> anyhow::Result<Self> {
        let resolver = Arc::new(UpstreamResolver::new(&config.media_server));
        let proxy = Arc::new(ContentProxy::new(&config.proxy)?);
        let players = PlayerService::new(catalog.clone(), resolver.clone());
        let pages = PlayerPages::new()?;

        Ok(Self {
            config,
            catalog,
            resolver,
            proxy,
            players,
            pages,
        })
    }
}

/// Create the HTTP router with all routes
pub fn create_router(state: AppState) -> Router {
    // Dashboard-facing routes honour the configured origins; `/content`
    // sets its own wildcard CORS headers.
    let api = Router::new()
        .merge(health::create_health_router())
        .merge(players::create_players_router())
        .merge(streaming::create_streaming_router())
        .merge(content::create_resolve_router())
        .route("/api", any(route_not_found))
        .route("/api/{*rest}", any(route_not_found))
        .layer(cors_layer(&state.config));

    let mut router = Router::new()
        .merge(content::create_content_router())
        .merge(api);

    router = match state.config.frontend_dir() {
        Some(dir) => {
            tracing::info!(dir = %dir, "Serving dashboard build");
            let index = Path::new(dir).join("index.html");
            router.fallback_service(ServeDir::new(dir).fallback(ServeFile::new(index)))
        }
        None => router.fallback(route_not_found),
    };

    router
        .layer(RequestBodyLimitLayer::new(state.config.server.body_limit_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(config: &Config) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .allowed_origins()
        .iter()
        .filter_map(|origin| HeaderValue::from_str(origin).ok())
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::HEAD,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::RANGE])
        .allow_credentials(true)
}

async fn route_not_found() -> AppError {
    AppError::not_found("Route not found")
}
