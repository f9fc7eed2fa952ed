mod v1;

use std::time::Duration;

use axum::Router;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderName, HeaderValue, Method};
use axum::routing::get;
use tower_http::cors::CorsLayer;
use tracing::warn;

use crate::config::{AppConfig, CorsConfig};
use crate::extractors::auth::VOICE_SECRET_HEADER;
use crate::handlers;
use crate::state::AppState;

pub fn api_routes(config: &AppConfig) -> Router<AppState> {
    Router::new().nest("/v1", v1::routes(config))
}

/// Public object URLs, served from whichever blob store is configured.
pub fn storage_routes() -> Router<AppState> {
    Router::new().route(
        "/object/public/{bucket}/{*path}",
        get(handlers::storage::serve_object),
    )
}

/// CORS for the dashboard origin. Credentials are allowed, so origins must
/// be listed explicitly.
pub fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .allow_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            AUTHORIZATION,
            CONTENT_TYPE,
            HeaderName::from_static(VOICE_SECRET_HEADER),
        ])
        .max_age(Duration::from_secs(config.max_age))
}
