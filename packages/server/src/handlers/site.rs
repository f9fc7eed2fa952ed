use axum::Json;
use axum::extract::{Path, State};
use serde_json::Value;
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::models::shared::required_text;
use crate::models::site::*;
use crate::services::site_config;
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/api/v1/theme",
    tag = "Site",
    operation_id = "saveTheme",
    summary = "Replace the hero theme",
    description = "Solid kinds need `solid_color`; gradient kinds need `from` and `to`. The previous theme row is replaced.",
    request_body = ThemeRequest,
    responses(
        (status = 200, description = "Theme saved", body = SaveThemeResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(user = %auth_user.user_id, kind = %payload.kind))]
pub async fn save_theme(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<ThemeRequest>,
) -> Result<Json<SaveThemeResponse>, AppError> {
    let theme = payload.validate()?;
    let model = site_config::save_theme(&state.db, theme, &auth_user.user_id).await?;
    Ok(Json(SaveThemeResponse {
        ok: true,
        theme: model.into(),
    }))
}

#[utoipa::path(
    put,
    path = "/api/v1/settings/{key}",
    tag = "Site",
    operation_id = "saveSetting",
    summary = "Store a site setting",
    description = "The body is the JSON value to store. `social` holds the social links.",
    params(("key" = String, Path, description = "Setting key")),
    request_body = Object,
    responses(
        (status = 200, description = "Setting saved", body = SaveSettingResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, value), fields(user = %auth_user.user_id))]
pub async fn save_setting(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(key): Path<String>,
    AppJson(value): AppJson<Value>,
) -> Result<Json<SaveSettingResponse>, AppError> {
    validate_setting_key(&key)?;
    let model = site_config::save_setting(&state.db, &key, value, &auth_user.user_id).await?;
    Ok(Json(SaveSettingResponse {
        ok: true,
        setting: model.into(),
    }))
}

#[utoipa::path(
    post,
    path = "/api/v1/tagline",
    tag = "Site",
    operation_id = "saveTagline",
    summary = "Update the site tagline",
    request_body = TaglineRequest,
    responses(
        (status = 200, description = "Tagline saved", body = SaveTaglineResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(user = %auth_user.user_id))]
pub async fn save_tagline(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<TaglineRequest>,
) -> Result<Json<SaveTaglineResponse>, AppError> {
    let tagline = required_text("tagline", &payload.tagline, MAX_TAGLINE_LEN)?;
    let model = site_config::save_tagline(&state.db, tagline, &auth_user.user_id).await?;
    Ok(Json(SaveTaglineResponse {
        ok: true,
        tagline: model.into(),
    }))
}
