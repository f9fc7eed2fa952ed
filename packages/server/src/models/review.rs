use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::shared::{required_text, validate_optional_position};
use crate::entity::review;
use crate::error::AppError;

pub const MAX_NAME_LEN: usize = 128;
pub const MAX_QUOTE_LEN: usize = 2000;

fn validate_stars(stars: i32) -> Result<(), AppError> {
    if !(1..=5).contains(&stars) {
        return Err(AppError::Validation("stars must be between 1 and 5".into()));
    }
    Ok(())
}

#[derive(Serialize, ToSchema, Debug)]
pub struct ReviewResponse {
    pub id: i32,
    pub name: String,
    pub quote: String,
    #[schema(example = 5)]
    pub stars: i32,
    pub sort_order: i32,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
}

impl From<review::Model> for ReviewResponse {
    fn from(model: review::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            quote: model.quote,
            stars: model.stars,
            sort_order: model.sort_order,
            is_published: model.is_published,
            created_at: model.created_at,
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct ReviewListResponse {
    pub reviews: Vec<ReviewResponse>,
}

#[derive(Deserialize, ToSchema, Debug)]
pub struct CreateReviewRequest {
    pub name: String,
    pub quote: String,
    pub stars: i32,
    #[serde(alias = "sortOrder")]
    pub sort_order: Option<i32>,
    #[serde(alias = "isPublished")]
    pub is_published: Option<bool>,
}

impl CreateReviewRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        required_text("name", &self.name, MAX_NAME_LEN)?;
        required_text("quote", &self.quote, MAX_QUOTE_LEN)?;
        validate_stars(self.stars)?;
        validate_optional_position(self.sort_order)
    }
}

#[derive(Deserialize, ToSchema, Debug, Default)]
pub struct UpdateReviewRequest {
    pub name: Option<String>,
    pub quote: Option<String>,
    pub stars: Option<i32>,
    #[serde(alias = "sortOrder")]
    pub sort_order: Option<i32>,
    #[serde(alias = "isPublished")]
    pub is_published: Option<bool>,
}

impl UpdateReviewRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        if let Some(name) = &self.name {
            required_text("name", name, MAX_NAME_LEN)?;
        }
        if let Some(quote) = &self.quote {
            required_text("quote", quote, MAX_QUOTE_LEN)?;
        }
        if let Some(stars) = self.stars {
            validate_stars(stars)?;
        }
        validate_optional_position(self.sort_order)
    }
}

#[derive(Serialize, ToSchema, Debug)]
pub struct PublicReview {
    pub id: i32,
    pub name: String,
    pub quote: String,
    pub stars: i32,
}

impl From<review::Model> for PublicReview {
    fn from(model: review::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            quote: model.quote,
            stars: model.stars,
        }
    }
}

#[derive(Serialize, ToSchema, Default)]
pub struct PublicReviewListResponse {
    pub reviews: Vec<PublicReview>,
}
