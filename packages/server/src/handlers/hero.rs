use axum::Json;
use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use common::HeroSlot;
use sea_orm::*;
use tracing::instrument;

use crate::entity::hero_media;
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::models::hero::*;
use crate::models::shared::OkResponse;
use crate::services::assets::{AssetService, NewHeroMedia};
use crate::services::site_config;
use crate::state::AppState;
use crate::utils::multipart::UploadForm;

#[utoipa::path(
    get,
    path = "/api/v1/hero/media",
    tag = "Hero",
    operation_id = "listHeroMedia",
    summary = "List hero media and the current selection",
    responses(
        (status = 200, description = "Hero media of both slots", body = HeroMediaListResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _auth_user))]
pub async fn list_hero_media(
    _auth_user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<HeroMediaListResponse>, AppError> {
    let (items, config) = tokio::try_join!(
        hero_media::Entity::find()
            .order_by_asc(hero_media::Column::Slot)
            .order_by_asc(hero_media::Column::Id)
            .all(&state.db),
        site_config::current_hero_config(&state.db),
    )?;

    Ok(Json(HeroMediaListResponse {
        items: items.into_iter().map(HeroMediaResponse::from).collect(),
        config: config.map(HeroConfigResponse::from),
    }))
}

#[utoipa::path(
    post,
    path = "/api/v1/hero/media",
    tag = "Hero",
    operation_id = "uploadHeroMedia",
    summary = "Upload a hero video or image",
    description = "Multipart form: `file` (required), `slot` (`main` or `side`, required), `label`, `is_default`. \
        Video MIME types are stored as `video`, everything else as `image`.",
    request_body(content_type = "multipart/form-data", description = "File plus slot and label"),
    responses(
        (status = 201, description = "Hero media created", body = HeroMediaCreatedResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _auth_user, multipart))]
pub async fn upload_hero_media(
    _auth_user: AuthUser,
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let mut form = UploadForm::read(multipart, state.config.storage.max_upload_size).await?;
    let slot = form
        .parse::<HeroSlot>("slot")?
        .ok_or_else(|| AppError::Validation("Missing 'slot' field".into()))?;
    let new = NewHeroMedia {
        slot,
        label: form.text("label").map(str::to_string),
        is_default: form.parse::<bool>("is_default")?.unwrap_or(false),
        file: form.take_file()?,
    };

    let model = AssetService::from_state(&state).create_hero_media(new).await?;
    Ok((
        StatusCode::CREATED,
        Json(HeroMediaCreatedResponse {
            item: HeroMediaResponse::from(model),
        }),
    ))
}

#[utoipa::path(
    delete,
    path = "/api/v1/hero/media/{id}",
    tag = "Hero",
    operation_id = "deleteHeroMedia",
    summary = "Delete a hero media item",
    params(("id" = i32, Path, description = "Hero media ID")),
    responses(
        (status = 200, description = "Deleted", body = OkResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Hero media not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _auth_user))]
pub async fn delete_hero_media(
    _auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<OkResponse>, AppError> {
    AssetService::from_state(&state).delete_hero_media(id).await?;
    Ok(Json(OkResponse::new()))
}

#[utoipa::path(
    post,
    path = "/api/v1/config/select",
    tag = "Hero",
    operation_id = "selectHeroMedia",
    summary = "Select the hero media shown in a slot",
    description = "Canonical body is `{slot, item_id}`. The other slot's selection is kept. The item must exist and belong to the slot.",
    request_body = SelectHeroRequest,
    responses(
        (status = 200, description = "Selection saved", body = SelectHeroResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(user = %auth_user.user_id))]
pub async fn select_hero(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<SelectHeroRequest>,
) -> Result<Json<SelectHeroResponse>, AppError> {
    let patch = payload.into_patch()?;
    let config = site_config::select_hero(&state.db, patch, &auth_user.user_id).await?;
    Ok(Json(SelectHeroResponse {
        ok: true,
        config: config.into(),
    }))
}
