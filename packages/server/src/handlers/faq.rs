use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use chrono::Utc;
use sea_orm::*;
use serde_json::Value;
use tracing::instrument;

use crate::entity::faq;
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::models::faq::*;
use crate::models::shared::OkResponse;
use crate::state::AppState;

/// FAQs in display and matching order.
pub async fn ordered_faqs<C: ConnectionTrait>(conn: &C) -> Result<Vec<faq::Model>, DbErr> {
    faq::Entity::find()
        .order_by_asc(faq::Column::SortOrder)
        .order_by_asc(faq::Column::Id)
        .all(conn)
        .await
}

#[utoipa::path(
    get,
    path = "/api/v1/faqs",
    tag = "FAQ",
    operation_id = "listFaqs",
    summary = "List FAQs",
    responses(
        (status = 200, description = "FAQs ordered by sort order", body = FaqListResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _auth_user))]
pub async fn list_faqs(
    _auth_user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<FaqListResponse>, AppError> {
    let faqs = ordered_faqs(&state.db).await?;
    Ok(Json(FaqListResponse {
        faqs: faqs.into_iter().map(FaqResponse::from).collect(),
    }))
}

#[utoipa::path(
    post,
    path = "/api/v1/faqs",
    tag = "FAQ",
    operation_id = "createFaq",
    summary = "Create an FAQ",
    description = "`questions` lists the phrasings matched against visitor questions; the first is displayed.",
    request_body = CreateFaqRequest,
    responses(
        (status = 201, description = "FAQ created", body = FaqResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _auth_user, payload))]
pub async fn create_faq(
    _auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateFaqRequest>,
) -> Result<impl IntoResponse, AppError> {
    let valid = payload.validate()?;
    let model = faq::ActiveModel {
        questions: Set(Value::from(valid.questions)),
        answer: Set(valid.answer),
        sort_order: Set(valid.sort_order.unwrap_or(0)),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(&state.db)
    .await?;
    Ok((StatusCode::CREATED, Json(FaqResponse::from(model))))
}

#[utoipa::path(
    patch,
    path = "/api/v1/faqs/{id}",
    tag = "FAQ",
    operation_id = "updateFaq",
    summary = "Update an FAQ",
    params(("id" = i32, Path, description = "FAQ ID")),
    request_body = UpdateFaqRequest,
    responses(
        (status = 200, description = "FAQ updated", body = FaqResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "FAQ not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _auth_user, payload))]
pub async fn update_faq(
    _auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<UpdateFaqRequest>,
) -> Result<Json<FaqResponse>, AppError> {
    let (questions, answer, sort_order) = payload.validate()?;
    let existing = faq::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("FAQ {id} not found")))?;

    let mut active = existing.into_active_model();
    if let Some(questions) = questions {
        active.questions = Set(Value::from(questions));
    }
    if let Some(answer) = answer {
        active.answer = Set(answer);
    }
    if let Some(pos) = sort_order {
        active.sort_order = Set(pos);
    }
    let model = active.update(&state.db).await?;
    Ok(Json(FaqResponse::from(model)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/faqs/{id}",
    tag = "FAQ",
    operation_id = "deleteFaq",
    summary = "Delete an FAQ",
    params(("id" = i32, Path, description = "FAQ ID")),
    responses(
        (status = 200, description = "Deleted", body = OkResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "FAQ not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _auth_user))]
pub async fn delete_faq(
    _auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<OkResponse>, AppError> {
    let result = faq::Entity::delete_by_id(id).exec(&state.db).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound(format!("FAQ {id} not found")));
    }
    Ok(Json(OkResponse::new()))
}
