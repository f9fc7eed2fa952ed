use chrono::{DateTime, Utc};
use common::CatalogKind;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use super::asset::AssetResponse;
use super::shared::{double_option, optional_text, required_text, validate_optional_position};
use crate::entity::catalog_item;
use crate::error::AppError;

pub const MAX_TITLE_LEN: usize = 256;
pub const MAX_BLURB_LEN: usize = 4000;

/// Dashboard view of a bundle or design.
#[derive(Serialize, ToSchema, Debug)]
pub struct CatalogItemResponse {
    pub id: i32,
    pub kind: CatalogKind,
    #[schema(example = "Dragon desk set")]
    pub title: String,
    pub blurb: Option<String>,
    /// Starting price in cents.
    #[schema(example = 2500)]
    pub price_from: Option<i32>,
    /// Category slug.
    #[schema(example = "uncategorized")]
    pub category_id: String,
    pub thumb_url: Option<String>,
    pub sort_order: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<catalog_item::Model> for CatalogItemResponse {
    fn from(model: catalog_item::Model) -> Self {
        Self {
            id: model.id,
            kind: model.kind,
            title: model.title,
            blurb: model.blurb,
            price_from: model.price_from,
            category_id: model.category_id,
            thumb_url: model.thumb_url,
            sort_order: model.sort_order,
            is_active: model.is_active,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct CatalogItemListResponse {
    pub items: Vec<CatalogItemResponse>,
}

/// Item with its images and downloadable files.
#[derive(Serialize, ToSchema)]
pub struct CatalogItemDetailResponse {
    pub item: CatalogItemResponse,
    pub images: Vec<AssetResponse>,
    pub files: Vec<AssetResponse>,
}

#[derive(Deserialize, ToSchema, Debug)]
pub struct CreateCatalogItemRequest {
    pub title: String,
    pub blurb: Option<String>,
    #[serde(alias = "priceFrom")]
    pub price_from: Option<i32>,
    /// Category slug. Defaults to `uncategorized`.
    #[serde(alias = "category", alias = "categoryId")]
    pub category_id: Option<String>,
    #[serde(alias = "sortOrder")]
    pub sort_order: Option<i32>,
    #[serde(alias = "isActive")]
    pub is_active: Option<bool>,
}

impl CreateCatalogItemRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        required_text("title", &self.title, MAX_TITLE_LEN)?;
        optional_text("blurb", self.blurb.as_deref(), MAX_BLURB_LEN)?;
        validate_price(self.price_from)?;
        validate_optional_position(self.sort_order)?;
        Ok(())
    }
}

#[derive(Deserialize, ToSchema, Debug, Default)]
pub struct UpdateCatalogItemRequest {
    pub title: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub blurb: Option<Option<String>>,
    #[serde(default, alias = "priceFrom", deserialize_with = "double_option")]
    #[schema(value_type = Option<i32>)]
    pub price_from: Option<Option<i32>>,
    #[serde(alias = "category", alias = "categoryId")]
    pub category_id: Option<String>,
    #[serde(alias = "sortOrder")]
    pub sort_order: Option<i32>,
    #[serde(alias = "isActive")]
    pub is_active: Option<bool>,
}

impl UpdateCatalogItemRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        if let Some(title) = &self.title {
            required_text("title", title, MAX_TITLE_LEN)?;
        }
        if let Some(Some(blurb)) = &self.blurb {
            optional_text("blurb", Some(blurb), MAX_BLURB_LEN)?;
        }
        if let Some(price) = self.price_from {
            validate_price(price)?;
        }
        validate_optional_position(self.sort_order)?;
        Ok(())
    }
}

fn validate_price(price: Option<i32>) -> Result<(), AppError> {
    if let Some(p) = price
        && p < 0
    {
        return Err(AppError::Validation("price_from must be >= 0".into()));
    }
    Ok(())
}

#[derive(Serialize, ToSchema)]
pub struct DeleteCatalogItemResponse {
    pub ok: bool,
    /// Number of asset rows removed with the item.
    pub removed_assets: u64,
}

#[derive(Deserialize, IntoParams, Debug, Default)]
#[into_params(parameter_in = Query)]
pub struct CatalogListQuery {
    /// Only items in this category slug.
    pub category: Option<String>,
}

/// Public view of an active item.
#[derive(Serialize, ToSchema, Debug)]
pub struct PublicCatalogItem {
    pub id: i32,
    pub title: String,
    pub blurb: Option<String>,
    pub price_from: Option<i32>,
    pub category_id: String,
    pub thumb_url: Option<String>,
}

impl From<catalog_item::Model> for PublicCatalogItem {
    fn from(model: catalog_item::Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            blurb: model.blurb,
            price_from: model.price_from,
            category_id: model.category_id,
            thumb_url: model.thumb_url,
        }
    }
}

#[derive(Serialize, ToSchema, Default)]
pub struct PublicCatalogListResponse {
    pub items: Vec<PublicCatalogItem>,
}

#[derive(Serialize, ToSchema)]
pub struct PublicCatalogDetailResponse {
    pub item: PublicCatalogItem,
    pub images: Vec<AssetResponse>,
}
