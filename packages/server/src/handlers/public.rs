//! Unauthenticated read endpoints for the marketing site.
//!
//! These never fail because of the database: a failed read is logged at WARN
//! and answered with an empty list or the built-in default. Only a missing
//! catalog item is reported, as a 404.

use std::fmt::Display;

use axum::extract::{Path, Query, State};
use axum::{Extension, Json};
use common::faq::{Faq, FaqMatch, match_question};
use common::{AssetKind, CatalogKind, HeroSlot};
use sea_orm::*;
use serde_json::Value;
use tracing::{instrument, warn};

use crate::entity::{catalog_item, review};
use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::handlers::faq::ordered_faqs;
use crate::models::asset::AssetResponse;
use crate::models::catalog::*;
use crate::models::category::{PublicCategory, PublicCategoryListResponse};
use crate::models::faq::{FaqListResponse, FaqResponse, MatchFaqRequest};
use crate::models::hero::PublicHeroResponse;
use crate::models::review::{PublicReview, PublicReviewListResponse};
use crate::models::site::{SettingResponse, TaglineResponse, ThemeResponse, validate_setting_key};
use crate::services::assets::AssetService;
use crate::services::categories::CategoryService;
use crate::services::site_config;
use crate::state::AppState;

/// Log a failed read and substitute `fallback`.
fn or_fallback<T, E: Display>(what: &str, result: Result<T, E>, fallback: impl FnOnce() -> T) -> T {
    result.unwrap_or_else(|e| {
        warn!(resource = what, error = %e, "Public read failed, serving fallback");
        fallback()
    })
}

#[utoipa::path(
    get,
    path = "/api/v1/public/{family}",
    tag = "Public",
    operation_id = "listPublicCatalogItems",
    summary = "Active bundles or designs",
    params(
        ("family" = String, Path, description = "`bundles` or `designs`"),
        CatalogListQuery,
    ),
    responses((status = 200, description = "Active items in display order", body = PublicCatalogListResponse)),
)]
#[instrument(skip(state, query))]
pub async fn list_catalog(
    State(state): State<AppState>,
    Extension(kind): Extension<CatalogKind>,
    Query(query): Query<CatalogListQuery>,
) -> Json<PublicCatalogListResponse> {
    let mut select = catalog_item::Entity::find()
        .filter(catalog_item::Column::Kind.eq(kind))
        .filter(catalog_item::Column::IsActive.eq(true));
    if let Some(slug) = query.category.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        select = select.filter(catalog_item::Column::CategoryId.eq(slug));
    }
    let items = select
        .order_by_asc(catalog_item::Column::SortOrder)
        .order_by_asc(catalog_item::Column::Id)
        .all(&state.db)
        .await;

    let items = or_fallback(kind.as_str(), items, Vec::new);
    Json(PublicCatalogListResponse {
        items: items.into_iter().map(PublicCatalogItem::from).collect(),
    })
}

#[utoipa::path(
    get,
    path = "/api/v1/public/{family}/{id}",
    tag = "Public",
    operation_id = "getPublicCatalogItem",
    summary = "One active bundle or design with its images",
    params(
        ("family" = String, Path, description = "`bundles` or `designs`"),
        ("id" = i32, Path, description = "Item ID"),
    ),
    responses(
        (status = 200, description = "Item detail", body = PublicCatalogDetailResponse),
        (status = 404, description = "Absent or inactive (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn get_catalog_item(
    State(state): State<AppState>,
    Extension(kind): Extension<CatalogKind>,
    Path(id): Path<i32>,
) -> Result<Json<PublicCatalogDetailResponse>, AppError> {
    let item = catalog_item::Entity::find_by_id(id)
        .filter(catalog_item::Column::Kind.eq(kind))
        .filter(catalog_item::Column::IsActive.eq(true))
        .one(&state.db)
        .await;
    let Some(item) = or_fallback(kind.as_str(), item, || None) else {
        return Err(AppError::NotFound(format!("{kind} {id} not found")));
    };

    let image_kind = match kind {
        CatalogKind::Bundle => AssetKind::BundleImage,
        CatalogKind::Design => AssetKind::DesignImage,
    };
    let assets = AssetService::from_state(&state).list_owned(kind, id).await;
    let images = or_fallback("catalog images", assets, Vec::new)
        .into_iter()
        .filter(|a| a.kind == image_kind)
        .map(AssetResponse::from)
        .collect();

    Ok(Json(PublicCatalogDetailResponse {
        item: item.into(),
        images,
    }))
}

#[utoipa::path(
    get,
    path = "/api/v1/public/categories/{kind}",
    tag = "Public",
    operation_id = "listPublicCategories",
    summary = "Active categories of a family",
    params(("kind" = CatalogKind, Path, description = "Catalog family")),
    responses((status = 200, description = "Active categories", body = PublicCategoryListResponse)),
)]
#[instrument(skip(state))]
pub async fn list_categories(
    State(state): State<AppState>,
    Path(kind): Path<CatalogKind>,
) -> Json<PublicCategoryListResponse> {
    let categories = CategoryService::new(&state.db, kind).list_active().await;
    Json(PublicCategoryListResponse {
        categories: or_fallback("categories", categories, Vec::new)
            .into_iter()
            .map(PublicCategory::from)
            .collect(),
    })
}

#[utoipa::path(
    get,
    path = "/api/v1/public/reviews",
    tag = "Public",
    operation_id = "listPublicReviews",
    summary = "Published reviews",
    responses((status = 200, description = "Published reviews in display order", body = PublicReviewListResponse)),
)]
#[instrument(skip(state))]
pub async fn list_reviews(State(state): State<AppState>) -> Json<PublicReviewListResponse> {
    let reviews = review::Entity::find()
        .filter(review::Column::IsPublished.eq(true))
        .order_by_asc(review::Column::SortOrder)
        .order_by_asc(review::Column::Id)
        .all(&state.db)
        .await;
    Json(PublicReviewListResponse {
        reviews: or_fallback("reviews", reviews, Vec::new)
            .into_iter()
            .map(PublicReview::from)
            .collect(),
    })
}

#[utoipa::path(
    get,
    path = "/api/v1/public/hero",
    tag = "Public",
    operation_id = "getPublicHero",
    summary = "Hero media to display in each slot",
    description = "Per slot: the selected item, else the slot's default, else its oldest item, else a built-in fallback.",
    responses((status = 200, description = "Resolved hero media", body = PublicHeroResponse)),
)]
#[instrument(skip(state))]
pub async fn get_hero(State(state): State<AppState>) -> Json<PublicHeroResponse> {
    let (main, side) = or_fallback("hero", site_config::resolved_hero(&state.db).await, || {
        (
            site_config::fallback_hero(HeroSlot::Main),
            site_config::fallback_hero(HeroSlot::Side),
        )
    });
    Json(PublicHeroResponse { main, side })
}

#[utoipa::path(
    get,
    path = "/api/v1/theme",
    tag = "Public",
    operation_id = "getTheme",
    summary = "Current hero theme",
    responses((status = 200, description = "Theme, or the default gradient", body = ThemeResponse)),
)]
#[instrument(skip(state))]
pub async fn get_theme(State(state): State<AppState>) -> Json<ThemeResponse> {
    let theme = or_fallback("theme", site_config::current_theme(&state.db).await, || None);
    Json(theme.map(ThemeResponse::from).unwrap_or_else(ThemeResponse::fallback))
}

#[utoipa::path(
    get,
    path = "/api/v1/public/tagline",
    tag = "Public",
    operation_id = "getTagline",
    summary = "Current site tagline",
    responses((status = 200, description = "Tagline, or the default", body = TaglineResponse)),
)]
#[instrument(skip(state))]
pub async fn get_tagline(State(state): State<AppState>) -> Json<TaglineResponse> {
    let tagline = or_fallback("tagline", site_config::current_tagline(&state.db).await, || None);
    Json(tagline.map(TaglineResponse::from).unwrap_or_else(TaglineResponse::fallback))
}

#[utoipa::path(
    get,
    path = "/api/v1/public/settings/{key}",
    tag = "Public",
    operation_id = "getSetting",
    summary = "A site setting",
    description = "Unknown keys return a `null` value.",
    params(("key" = String, Path, description = "Setting key")),
    responses(
        (status = 200, description = "Setting value", body = SettingResponse),
        (status = 400, description = "Malformed key (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn get_setting(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<SettingResponse>, AppError> {
    validate_setting_key(&key)?;
    let setting = or_fallback("setting", site_config::get_setting(&state.db, &key).await, || None);
    Ok(Json(match setting {
        Some(model) => model.into(),
        None => SettingResponse {
            key,
            value: Value::Null,
            updated_at: None,
        },
    }))
}

#[utoipa::path(
    get,
    path = "/api/v1/public/faqs",
    tag = "Public",
    operation_id = "listPublicFaqs",
    summary = "FAQs in display order",
    responses((status = 200, description = "FAQs", body = FaqListResponse)),
)]
#[instrument(skip(state))]
pub async fn list_faqs(State(state): State<AppState>) -> Json<FaqListResponse> {
    let faqs = or_fallback("faqs", ordered_faqs(&state.db).await, Vec::new);
    Json(FaqListResponse {
        faqs: faqs.into_iter().map(FaqResponse::from).collect(),
    })
}

#[utoipa::path(
    post,
    path = "/api/v1/public/faqs/match",
    tag = "Public",
    operation_id = "matchFaq",
    summary = "Answer a free-text question from the FAQ",
    description = "A normalized substring match wins first; otherwise the FAQ sharing the most words with the question is used when at least a quarter of the question's words match. Anything else gets a fixed fallback answer.",
    request_body = MatchFaqRequest,
    responses(
        (status = 200, description = "Best answer", body = FaqMatch),
        (status = 400, description = "Malformed body (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload))]
pub async fn match_faq(
    State(state): State<AppState>,
    AppJson(payload): AppJson<MatchFaqRequest>,
) -> Json<FaqMatch> {
    let rows = or_fallback("faqs", ordered_faqs(&state.db).await, Vec::new);
    let faqs: Vec<Faq> = rows.iter().map(Faq::from).collect();
    Json(match_question(&faqs, &payload.question))
}
