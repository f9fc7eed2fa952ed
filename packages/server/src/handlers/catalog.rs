//! Dashboard CRUD for bundles and designs.
//!
//! Both families share these handlers; the router nests them under
//! `/bundles` and `/designs` with the family attached as an `Extension`.

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::{Extension, Json};
use chrono::Utc;
use common::{AssetKind, CatalogKind};
use sea_orm::*;
use tracing::{info, instrument};

use crate::entity::{catalog_item, category};
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::models::asset::AssetResponse;
use crate::models::catalog::*;
use crate::models::shared::{optional_text, required_text};
use crate::services::assets::{AssetService, find_catalog_item};
use crate::services::categories::CategoryService;
use crate::state::AppState;
use crate::utils::multipart::UploadForm;

fn is_image(kind: AssetKind) -> bool {
    matches!(kind, AssetKind::BundleImage | AssetKind::DesignImage)
}

#[utoipa::path(
    get,
    path = "/api/v1/{family}",
    tag = "Catalog",
    operation_id = "listCatalogItems",
    summary = "List bundles or designs",
    params(
        ("family" = String, Path, description = "`bundles` or `designs`"),
        CatalogListQuery,
    ),
    responses(
        (status = 200, description = "Items ordered by sort order", body = CatalogItemListResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _auth_user, query))]
pub async fn list_items(
    _auth_user: AuthUser,
    State(state): State<AppState>,
    Extension(kind): Extension<CatalogKind>,
    Query(query): Query<CatalogListQuery>,
) -> Result<Json<CatalogItemListResponse>, AppError> {
    let mut select = catalog_item::Entity::find().filter(catalog_item::Column::Kind.eq(kind));
    if let Some(slug) = query.category.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        select = select.filter(catalog_item::Column::CategoryId.eq(slug));
    }
    let items = select
        .order_by_asc(catalog_item::Column::SortOrder)
        .order_by_asc(catalog_item::Column::Id)
        .all(&state.db)
        .await?;

    Ok(Json(CatalogItemListResponse {
        items: items.into_iter().map(CatalogItemResponse::from).collect(),
    }))
}

#[utoipa::path(
    post,
    path = "/api/v1/{family}",
    tag = "Catalog",
    operation_id = "createCatalogItem",
    summary = "Create a bundle or design",
    description = "`category_id` must name an existing category of the same family; it defaults to `uncategorized`.",
    params(("family" = String, Path, description = "`bundles` or `designs`")),
    request_body = CreateCatalogItemRequest,
    responses(
        (status = 201, description = "Item created", body = CatalogItemResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(user = %auth_user.user_id, title = %payload.title))]
pub async fn create_item(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Extension(kind): Extension<CatalogKind>,
    AppJson(payload): AppJson<CreateCatalogItemRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let category_id = payload
        .category_id
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(category::FALLBACK_SLUG)
        .to_string();
    CategoryService::new(&state.db, kind)
        .require_existing(&category_id)
        .await?;

    let now = Utc::now();
    let model = catalog_item::ActiveModel {
        kind: Set(kind),
        title: Set(required_text("title", &payload.title, MAX_TITLE_LEN)?),
        blurb: Set(optional_text("blurb", payload.blurb.as_deref(), MAX_BLURB_LEN)?),
        price_from: Set(payload.price_from),
        category_id: Set(category_id),
        thumb_url: Set(None),
        thumb_storage_path: Set(None),
        sort_order: Set(payload.sort_order.unwrap_or(0)),
        is_active: Set(payload.is_active.unwrap_or(true)),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(&state.db)
    .await?;

    info!(id = model.id, kind = %kind, "Catalog item created");
    Ok((StatusCode::CREATED, Json(CatalogItemResponse::from(model))))
}

#[utoipa::path(
    get,
    path = "/api/v1/{family}/{id}",
    tag = "Catalog",
    operation_id = "getCatalogItem",
    summary = "Get an item with its images and files",
    params(
        ("family" = String, Path, description = "`bundles` or `designs`"),
        ("id" = i32, Path, description = "Item ID"),
    ),
    responses(
        (status = 200, description = "Item detail", body = CatalogItemDetailResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Item not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _auth_user))]
pub async fn get_item(
    _auth_user: AuthUser,
    State(state): State<AppState>,
    Extension(kind): Extension<CatalogKind>,
    Path(id): Path<i32>,
) -> Result<Json<CatalogItemDetailResponse>, AppError> {
    let item = find_catalog_item(&state.db, kind, id).await?;
    let assets = AssetService::from_state(&state).list_owned(kind, id).await?;
    let (images, files): (Vec<_>, Vec<_>) = assets.into_iter().partition(|a| is_image(a.kind));

    Ok(Json(CatalogItemDetailResponse {
        item: item.into(),
        images: images.into_iter().map(AssetResponse::from).collect(),
        files: files.into_iter().map(AssetResponse::from).collect(),
    }))
}

#[utoipa::path(
    patch,
    path = "/api/v1/{family}/{id}",
    tag = "Catalog",
    operation_id = "updateCatalogItem",
    summary = "Update a bundle or design",
    params(
        ("family" = String, Path, description = "`bundles` or `designs`"),
        ("id" = i32, Path, description = "Item ID"),
    ),
    request_body = UpdateCatalogItemRequest,
    responses(
        (status = 200, description = "Item updated", body = CatalogItemResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Item not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _auth_user, payload))]
pub async fn update_item(
    _auth_user: AuthUser,
    State(state): State<AppState>,
    Extension(kind): Extension<CatalogKind>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<UpdateCatalogItemRequest>,
) -> Result<Json<CatalogItemResponse>, AppError> {
    payload.validate()?;
    let existing = find_catalog_item(&state.db, kind, id).await?;

    let mut active = existing.into_active_model();
    if let Some(title) = payload.title {
        active.title = Set(required_text("title", &title, MAX_TITLE_LEN)?);
    }
    if let Some(blurb) = payload.blurb {
        active.blurb = Set(optional_text("blurb", blurb.as_deref(), MAX_BLURB_LEN)?);
    }
    if let Some(price) = payload.price_from {
        active.price_from = Set(price);
    }
    if let Some(slug) = payload.category_id {
        let slug = slug.trim().to_string();
        CategoryService::new(&state.db, kind).require_existing(&slug).await?;
        active.category_id = Set(slug);
    }
    if let Some(pos) = payload.sort_order {
        active.sort_order = Set(pos);
    }
    if let Some(is_active) = payload.is_active {
        active.is_active = Set(is_active);
    }
    active.updated_at = Set(Utc::now());

    let model = active.update(&state.db).await?;
    Ok(Json(CatalogItemResponse::from(model)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/{family}/{id}",
    tag = "Catalog",
    operation_id = "deleteCatalogItem",
    summary = "Delete an item with its assets",
    description = "Asset rows and the item row are deleted in one transaction. Storage objects are removed afterwards; removal failures are logged and left to the orphan sweep.",
    params(
        ("family" = String, Path, description = "`bundles` or `designs`"),
        ("id" = i32, Path, description = "Item ID"),
    ),
    responses(
        (status = 200, description = "Item deleted", body = DeleteCatalogItemResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Item not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _auth_user))]
pub async fn delete_item(
    _auth_user: AuthUser,
    State(state): State<AppState>,
    Extension(kind): Extension<CatalogKind>,
    Path(id): Path<i32>,
) -> Result<Json<DeleteCatalogItemResponse>, AppError> {
    let removed_assets = AssetService::from_state(&state)
        .delete_catalog_item(kind, id)
        .await?;
    Ok(Json(DeleteCatalogItemResponse {
        ok: true,
        removed_assets,
    }))
}

#[utoipa::path(
    post,
    path = "/api/v1/{family}/{id}/thumbnail",
    tag = "Catalog",
    operation_id = "uploadCatalogThumbnail",
    summary = "Replace an item's thumbnail",
    description = "Multipart form with a `file` part. The previous thumbnail object is removed once the item points at the new one.",
    params(
        ("family" = String, Path, description = "`bundles` or `designs`"),
        ("id" = i32, Path, description = "Item ID"),
    ),
    request_body(content_type = "multipart/form-data", description = "`file` part with the new thumbnail"),
    responses(
        (status = 200, description = "Thumbnail replaced", body = CatalogItemResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Item not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _auth_user, multipart))]
pub async fn upload_thumbnail(
    _auth_user: AuthUser,
    State(state): State<AppState>,
    Extension(kind): Extension<CatalogKind>,
    Path(id): Path<i32>,
    multipart: Multipart,
) -> Result<Json<CatalogItemResponse>, AppError> {
    let mut form = UploadForm::read(multipart, state.config.storage.max_upload_size).await?;
    let file = form.take_file()?;
    let model = AssetService::from_state(&state)
        .replace_thumbnail(kind, id, &file)
        .await?;
    Ok(Json(CatalogItemResponse::from(model)))
}
