use axum::Json;
use axum::extract::{Multipart, Path, Query, State};
use axum::response::IntoResponse;
use common::AssetKind;
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::models::asset::*;
use crate::services::assets::{AssetService, NewAsset};
use crate::state::AppState;
use crate::utils::multipart::UploadForm;

#[utoipa::path(
    get,
    path = "/api/v1/assets",
    tag = "Assets",
    operation_id = "listAssets",
    summary = "List assets",
    description = "Optionally filtered by kind and owner. Ordered by `sort_order`, then id.",
    params(AssetListQuery),
    responses(
        (status = 200, description = "Assets", body = AssetListResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _auth_user))]
pub async fn list_assets(
    _auth_user: AuthUser,
    State(state): State<AppState>,
    Query(query): Query<AssetListQuery>,
) -> Result<Json<AssetListResponse>, AppError> {
    let items = AssetService::from_state(&state).list(&query).await?;
    Ok(Json(AssetListResponse {
        items: items.into_iter().map(AssetResponse::from).collect(),
    }))
}

#[utoipa::path(
    post,
    path = "/api/v1/assets/upload",
    tag = "Assets",
    operation_id = "uploadAsset",
    summary = "Upload a file",
    description = "Multipart form: `file` (required), `kind` (required), `owner_id` (required for bundle and design kinds, rejected otherwise), `caption`, `sort_order`, `tags` (comma separated). \
        The object is written first; if the row insert then fails the object is removed again.",
    request_body(content_type = "multipart/form-data", description = "File plus metadata fields"),
    responses(
        (status = 200, description = "Asset created", body = AssetCreatedResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Owner not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, multipart), fields(user = %auth_user.user_id))]
pub async fn upload_asset(
    auth_user: AuthUser,
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let mut form = UploadForm::read(multipart, state.config.storage.max_upload_size).await?;
    let kind = form
        .parse::<AssetKind>("kind")?
        .ok_or_else(|| AppError::Validation("Missing 'kind' field".into()))?;
    let new = NewAsset {
        kind,
        owner_id: form.parse::<i32>("owner_id")?,
        caption: form.text("caption").map(str::to_string),
        tags: form.list("tags"),
        sort_order: form.parse::<i32>("sort_order")?,
        created_by: auth_user.user_id,
        file: form.take_file()?,
    };

    let model = AssetService::from_state(&state).create(new).await?;
    Ok(Json(AssetCreatedResponse {
        item: AssetResponse::from(model),
    }))
}

#[utoipa::path(
    post,
    path = "/api/v1/assets/remove",
    tag = "Assets",
    operation_id = "removeAsset",
    summary = "Delete an asset",
    description = "Identify the asset by `id`, or by `url` plus `owner_id` (omit it for standalone media and voice notes) and optional `kind`. \
        An unknown id is a 404; an unknown natural key succeeds with `already_deleted: true`. \
        Failure to remove the storage object is logged and does not fail the request. Also served as `DELETE`.",
    request_body = RemoveAssetRequest,
    responses(
        (status = 200, description = "Asset deleted", body = RemoveAssetResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Asset not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _auth_user, payload))]
pub async fn remove_asset(
    _auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<RemoveAssetRequest>,
) -> Result<Json<RemoveAssetResponse>, AppError> {
    let target = payload.into_target()?;
    let result = AssetService::from_state(&state).delete(target).await?;
    Ok(Json(result))
}

#[utoipa::path(
    patch,
    path = "/api/v1/assets/{id}",
    tag = "Assets",
    operation_id = "updateAsset",
    summary = "Update caption, tags or sort order",
    params(("id" = i32, Path, description = "Asset ID")),
    request_body = UpdateAssetRequest,
    responses(
        (status = 200, description = "Asset updated", body = AssetResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Asset not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _auth_user, payload))]
pub async fn update_asset(
    _auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<UpdateAssetRequest>,
) -> Result<Json<AssetResponse>, AppError> {
    let model = AssetService::from_state(&state).update(id, payload).await?;
    Ok(Json(AssetResponse::from(model)))
}
