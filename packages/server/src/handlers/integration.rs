use axum::Json;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use common::AssetKind;
use tracing::{info, instrument};

use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::IntegrationCaller;
use crate::models::asset::{AssetCreatedResponse, AssetResponse};
use crate::services::assets::{AssetService, NewAsset};
use crate::state::AppState;
use crate::utils::multipart::UploadForm;

#[utoipa::path(
    post,
    path = "/api/v1/integrations/voice-notes",
    tag = "Integrations",
    operation_id = "ingestVoiceNote",
    summary = "Store a voice note pushed by the voice integration",
    description = "Authenticated by the `x-voice-secret` header. Multipart form: `file` (required) and `title` (stored as the caption).",
    request_body(content_type = "multipart/form-data", description = "Audio file plus optional title"),
    responses(
        (status = 201, description = "Voice note stored", body = AssetCreatedResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Missing or wrong secret (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("voice_secret" = [])),
)]
#[instrument(skip(state, caller, multipart))]
pub async fn ingest_voice_note(
    caller: IntegrationCaller,
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let mut form = UploadForm::read(multipart, state.config.storage.max_upload_size).await?;
    let new = NewAsset {
        kind: AssetKind::VoiceNote,
        owner_id: None,
        caption: form.text("title").map(str::to_string),
        tags: Vec::new(),
        sort_order: None,
        created_by: caller.user_id,
        file: form.take_file()?,
    };

    let model = AssetService::from_state(&state).create(new).await?;
    info!(id = model.id, size = model.size, "Voice note ingested");
    Ok((
        StatusCode::CREATED,
        Json(AssetCreatedResponse {
            item: AssetResponse::from(model),
        }),
    ))
}
