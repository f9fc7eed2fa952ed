pub mod config;
pub mod database;
pub mod entity;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod seed;
pub mod services;
pub mod state;
pub mod utils;

use axum::Router;
use utoipa::openapi::security::{ApiKey, ApiKeyValue, HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_scalar::{Scalar, Servable as ScalarServable};
use utoipa_swagger_ui::SwaggerUi;

use crate::extractors::auth::VOICE_SECRET_HEADER;
use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Print Shop API",
        version = "1.0.0",
        description = "Catalog, media and site configuration API for the print shop website"
    ),
    paths(
        handlers::category::list_categories,
        handlers::category::create_category,
        handlers::category::update_category,
        handlers::category::delete_category,
        handlers::catalog::list_items,
        handlers::catalog::create_item,
        handlers::catalog::get_item,
        handlers::catalog::update_item,
        handlers::catalog::delete_item,
        handlers::catalog::upload_thumbnail,
        handlers::assets::list_assets,
        handlers::assets::upload_asset,
        handlers::assets::remove_asset,
        handlers::assets::update_asset,
        handlers::hero::list_hero_media,
        handlers::hero::upload_hero_media,
        handlers::hero::delete_hero_media,
        handlers::hero::select_hero,
        handlers::site::save_theme,
        handlers::site::save_setting,
        handlers::site::save_tagline,
        handlers::review::list_reviews,
        handlers::review::create_review,
        handlers::review::update_review,
        handlers::review::delete_review,
        handlers::faq::list_faqs,
        handlers::faq::create_faq,
        handlers::faq::update_faq,
        handlers::faq::delete_faq,
        handlers::public::list_catalog,
        handlers::public::get_catalog_item,
        handlers::public::list_categories,
        handlers::public::list_reviews,
        handlers::public::get_hero,
        handlers::public::get_theme,
        handlers::public::get_tagline,
        handlers::public::get_setting,
        handlers::public::list_faqs,
        handlers::public::match_faq,
        handlers::integration::ingest_voice_note,
        handlers::sweep::trigger_sweep,
        handlers::storage::serve_object,
    ),
    tags(
        (name = "Categories", description = "Per-family category management"),
        (name = "Catalog", description = "Bundle and design CRUD"),
        (name = "Assets", description = "Gallery images, downloadable files and voice notes"),
        (name = "Hero", description = "Landing page hero media and slot selection"),
        (name = "Site", description = "Theme, tagline and free-form settings"),
        (name = "Reviews", description = "Customer review moderation"),
        (name = "FAQ", description = "FAQ management"),
        (name = "Public", description = "Anonymous read-only views for the website"),
        (name = "Integrations", description = "Inbound pushes from external tools"),
        (name = "Maintenance", description = "Storage housekeeping"),
        (name = "Storage", description = "Public object downloads"),
    ),
    modifiers(&SecurityAddon),
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_default();
        components.add_security_scheme(
            "jwt",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
        components.add_security_scheme(
            "voice_secret",
            SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new(VOICE_SECRET_HEADER))),
        );
    }
}

/// Build the application router.
pub fn build_router(state: AppState) -> Router {
    let api = ApiDoc::openapi();
    let cors = routes::cors_layer(&state.config.server.cors);

    Router::new()
        .nest("/api", routes::api_routes(&state.config))
        .nest("/storage/v1", routes::storage_routes())
        .with_state(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api.clone()))
        .merge(Scalar::with_url("/scalar", api))
        .layer(cors)
}
