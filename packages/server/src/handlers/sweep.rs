use std::time::Duration;

use axum::Json;
use axum::extract::State;
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::models::sweep::SweepReport;
use crate::services::sweep::run_sweep;
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/api/v1/sweep",
    tag = "Maintenance",
    operation_id = "runOrphanSweep",
    summary = "Remove unreferenced storage objects now",
    description = "Lists every configured bucket and removes objects that no asset, thumbnail or hero media row points at and that are older than the configured grace period.",
    responses(
        (status = 200, description = "Sweep finished", body = SweepReport),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(user = %auth_user.user_id))]
pub async fn trigger_sweep(
    auth_user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<SweepReport>, AppError> {
    let report = run_sweep(
        &state.db,
        state.blob_store.as_ref(),
        &state.config.storage,
        Duration::from_secs(state.config.sweep.grace_secs),
    )
    .await
    .map_err(|e| AppError::Internal(e.to_string()))?;
    Ok(Json(report))
}
