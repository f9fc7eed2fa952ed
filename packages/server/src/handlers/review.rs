use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use chrono::Utc;
use sea_orm::*;
use tracing::instrument;

use crate::entity::review;
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::models::review::*;
use crate::models::shared::{OkResponse, required_text};
use crate::state::AppState;

async fn find_review(db: &DatabaseConnection, id: i32) -> Result<review::Model, AppError> {
    review::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Review {id} not found")))
}

#[utoipa::path(
    get,
    path = "/api/v1/reviews",
    tag = "Reviews",
    operation_id = "listReviews",
    summary = "List all reviews, published or not",
    responses(
        (status = 200, description = "Reviews", body = ReviewListResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _auth_user))]
pub async fn list_reviews(
    _auth_user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<ReviewListResponse>, AppError> {
    let reviews = review::Entity::find()
        .order_by_asc(review::Column::SortOrder)
        .order_by_asc(review::Column::Id)
        .all(&state.db)
        .await?;
    Ok(Json(ReviewListResponse {
        reviews: reviews.into_iter().map(ReviewResponse::from).collect(),
    }))
}

#[utoipa::path(
    post,
    path = "/api/v1/reviews",
    tag = "Reviews",
    operation_id = "createReview",
    summary = "Create a review",
    request_body = CreateReviewRequest,
    responses(
        (status = 201, description = "Review created", body = ReviewResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _auth_user, payload))]
pub async fn create_review(
    _auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateReviewRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let model = review::ActiveModel {
        name: Set(required_text("name", &payload.name, MAX_NAME_LEN)?),
        quote: Set(required_text("quote", &payload.quote, MAX_QUOTE_LEN)?),
        stars: Set(payload.stars),
        sort_order: Set(payload.sort_order.unwrap_or(0)),
        is_published: Set(payload.is_published.unwrap_or(true)),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(&state.db)
    .await?;
    Ok((StatusCode::CREATED, Json(ReviewResponse::from(model))))
}

#[utoipa::path(
    patch,
    path = "/api/v1/reviews/{id}",
    tag = "Reviews",
    operation_id = "updateReview",
    summary = "Update a review",
    params(("id" = i32, Path, description = "Review ID")),
    request_body = UpdateReviewRequest,
    responses(
        (status = 200, description = "Review updated", body = ReviewResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Review not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _auth_user, payload))]
pub async fn update_review(
    _auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<UpdateReviewRequest>,
) -> Result<Json<ReviewResponse>, AppError> {
    payload.validate()?;
    let mut active = find_review(&state.db, id).await?.into_active_model();
    if let Some(name) = payload.name {
        active.name = Set(required_text("name", &name, MAX_NAME_LEN)?);
    }
    if let Some(quote) = payload.quote {
        active.quote = Set(required_text("quote", &quote, MAX_QUOTE_LEN)?);
    }
    if let Some(stars) = payload.stars {
        active.stars = Set(stars);
    }
    if let Some(pos) = payload.sort_order {
        active.sort_order = Set(pos);
    }
    if let Some(published) = payload.is_published {
        active.is_published = Set(published);
    }
    let model = active.update(&state.db).await?;
    Ok(Json(ReviewResponse::from(model)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/reviews/{id}",
    tag = "Reviews",
    operation_id = "deleteReview",
    summary = "Delete a review",
    params(("id" = i32, Path, description = "Review ID")),
    responses(
        (status = 200, description = "Deleted", body = OkResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Review not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _auth_user))]
pub async fn delete_review(
    _auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<OkResponse>, AppError> {
    let result = review::Entity::delete_by_id(id).exec(&state.db).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound(format!("Review {id} not found")));
    }
    Ok(Json(OkResponse::new()))
}
