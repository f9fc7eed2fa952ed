use axum::{
    Extension, Router,
    routing::{delete, get, patch, post, put},
};
use common::CatalogKind;

use crate::config::AppConfig;
use crate::handlers;
use crate::state::AppState;
use crate::utils::multipart::upload_body_limit;

pub fn routes(config: &AppConfig) -> Router<AppState> {
    let max_upload = config.storage.max_upload_size;
    Router::new()
        .nest("/categories", category_routes())
        .nest("/bundles", catalog_routes(CatalogKind::Bundle, max_upload))
        .nest("/designs", catalog_routes(CatalogKind::Design, max_upload))
        .nest("/assets", asset_routes(max_upload))
        .nest("/hero", hero_routes(max_upload))
        .route("/config/select", post(handlers::hero::select_hero))
        .route(
            "/theme",
            get(handlers::public::get_theme).post(handlers::site::save_theme),
        )
        .route("/settings/{key}", put(handlers::site::save_setting))
        .route("/tagline", post(handlers::site::save_tagline))
        .nest("/reviews", review_routes())
        .nest("/faqs", faq_routes())
        .route("/sweep", post(handlers::sweep::trigger_sweep))
        .nest("/public", public_routes())
        .nest("/integrations", integration_routes(max_upload))
}

fn category_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/{kind}",
            get(handlers::category::list_categories)
                .post(handlers::category::create_category)
                .delete(handlers::category::delete_category),
        )
        .route("/{kind}/{slug}", patch(handlers::category::update_category))
}

fn catalog_routes(kind: CatalogKind, max_upload: u64) -> Router<AppState> {
    let crud = Router::new()
        .route(
            "/",
            get(handlers::catalog::list_items).post(handlers::catalog::create_item),
        )
        .route(
            "/{id}",
            get(handlers::catalog::get_item)
                .patch(handlers::catalog::update_item)
                .delete(handlers::catalog::delete_item),
        );

    let upload = Router::new()
        .route("/{id}/thumbnail", post(handlers::catalog::upload_thumbnail))
        .layer(upload_body_limit(max_upload));

    crud.merge(upload).layer(Extension(kind))
}

fn asset_routes(max_upload: u64) -> Router<AppState> {
    let crud = Router::new()
        .route("/", get(handlers::assets::list_assets))
        .route(
            "/remove",
            post(handlers::assets::remove_asset).delete(handlers::assets::remove_asset),
        )
        .route("/{id}", patch(handlers::assets::update_asset));

    let upload = Router::new()
        .route("/upload", post(handlers::assets::upload_asset))
        .layer(upload_body_limit(max_upload));

    crud.merge(upload)
}

fn hero_routes(max_upload: u64) -> Router<AppState> {
    let crud = Router::new().route("/media/{id}", delete(handlers::hero::delete_hero_media));

    let upload = Router::new()
        .route(
            "/media",
            get(handlers::hero::list_hero_media).post(handlers::hero::upload_hero_media),
        )
        .layer(upload_body_limit(max_upload));

    crud.merge(upload)
}

fn review_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::review::list_reviews).post(handlers::review::create_review),
        )
        .route(
            "/{id}",
            patch(handlers::review::update_review).delete(handlers::review::delete_review),
        )
}

fn faq_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::faq::list_faqs).post(handlers::faq::create_faq),
        )
        .route(
            "/{id}",
            patch(handlers::faq::update_faq).delete(handlers::faq::delete_faq),
        )
}

fn public_catalog_routes(kind: CatalogKind) -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::public::list_catalog))
        .route("/{id}", get(handlers::public::get_catalog_item))
        .layer(Extension(kind))
}

fn public_routes() -> Router<AppState> {
    Router::new()
        .nest("/bundles", public_catalog_routes(CatalogKind::Bundle))
        .nest("/designs", public_catalog_routes(CatalogKind::Design))
        .route("/categories/{kind}", get(handlers::public::list_categories))
        .route("/reviews", get(handlers::public::list_reviews))
        .route("/hero", get(handlers::public::get_hero))
        .route("/tagline", get(handlers::public::get_tagline))
        .route("/settings/{key}", get(handlers::public::get_setting))
        .route("/faqs", get(handlers::public::list_faqs))
        .route("/faqs/match", post(handlers::public::match_faq))
}

fn integration_routes(max_upload: u64) -> Router<AppState> {
    Router::new()
        .route(
            "/voice-notes",
            post(handlers::integration::ingest_voice_note),
        )
        .layer(upload_body_limit(max_upload))
}
