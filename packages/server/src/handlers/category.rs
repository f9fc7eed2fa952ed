use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use common::CatalogKind;
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::models::category::*;
use crate::services::categories::CategoryService;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/api/v1/categories/{kind}",
    tag = "Categories",
    operation_id = "listCategories",
    summary = "List categories with item counts",
    params(("kind" = CatalogKind, Path, description = "Catalog family")),
    responses(
        (status = 200, description = "Categories of the family", body = CategoryListResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _auth_user))]
pub async fn list_categories(
    _auth_user: AuthUser,
    State(state): State<AppState>,
    Path(kind): Path<CatalogKind>,
) -> Result<Json<CategoryListResponse>, AppError> {
    let categories = CategoryService::new(&state.db, kind).list_with_counts().await?;
    Ok(Json(CategoryListResponse { categories }))
}

#[utoipa::path(
    post,
    path = "/api/v1/categories/{kind}",
    tag = "Categories",
    operation_id = "createCategory",
    summary = "Create a category",
    description = "The slug is derived from the label unless given. A taken slug gets `-2`, `-3`, ... appended. `sort_order` defaults to one past the current maximum.",
    params(("kind" = CatalogKind, Path, description = "Catalog family")),
    request_body = CreateCategoryRequest,
    responses(
        (status = 201, description = "Category created", body = CategoryResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(user = %auth_user.user_id, label = %payload.label))]
pub async fn create_category(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(kind): Path<CatalogKind>,
    AppJson(payload): AppJson<CreateCategoryRequest>,
) -> Result<impl IntoResponse, AppError> {
    let model = CategoryService::new(&state.db, kind).create(payload).await?;
    Ok((StatusCode::CREATED, Json(CategoryResponse::from(model))))
}

#[utoipa::path(
    patch,
    path = "/api/v1/categories/{kind}/{slug}",
    tag = "Categories",
    operation_id = "updateCategory",
    summary = "Update a category",
    params(
        ("kind" = CatalogKind, Path, description = "Catalog family"),
        ("slug" = String, Path, description = "Category slug"),
    ),
    request_body = UpdateCategoryRequest,
    responses(
        (status = 200, description = "Category updated", body = CategoryResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Category not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _auth_user, payload))]
pub async fn update_category(
    _auth_user: AuthUser,
    State(state): State<AppState>,
    Path((kind, slug)): Path<(CatalogKind, String)>,
    AppJson(payload): AppJson<UpdateCategoryRequest>,
) -> Result<Json<CategoryResponse>, AppError> {
    let model = CategoryService::new(&state.db, kind).update(&slug, payload).await?;
    Ok(Json(CategoryResponse::from(model)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/categories/{kind}",
    tag = "Categories",
    operation_id = "deleteCategory",
    summary = "Delete a category and reassign its items",
    description = "Items filed under the category move to `reassign_to` (default `uncategorized`) in the same transaction as the delete. The `uncategorized` category cannot be deleted.",
    params(("kind" = CatalogKind, Path, description = "Catalog family")),
    request_body = DeleteCategoryRequest,
    responses(
        (status = 200, description = "Category deleted", body = DeleteCategoryResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Category not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _auth_user, payload), fields(slug = %payload.id))]
pub async fn delete_category(
    _auth_user: AuthUser,
    State(state): State<AppState>,
    Path(kind): Path<CatalogKind>,
    AppJson(payload): AppJson<DeleteCategoryRequest>,
) -> Result<Json<DeleteCategoryResponse>, AppError> {
    let reassigned = CategoryService::new(&state.db, kind)
        .delete(&payload.id, payload.reassign_to.as_deref())
        .await?;
    Ok(Json(DeleteCategoryResponse {
        ok: true,
        reassigned,
    }))
}
