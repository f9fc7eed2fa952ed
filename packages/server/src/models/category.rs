use chrono::{DateTime, Utc};
use common::CatalogKind;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::shared::{double_option, optional_text, required_text, validate_optional_position};
use crate::entity::category;
use crate::error::AppError;

pub const MAX_LABEL_LEN: usize = 64;
pub const MAX_ICON_LEN: usize = 32;

#[derive(Serialize, ToSchema, Debug)]
pub struct CategoryResponse {
    pub id: i32,
    pub kind: CatalogKind,
    #[schema(example = "desk-toys")]
    pub slug: String,
    #[schema(example = "Desk Toys")]
    pub label: String,
    pub icon: Option<String>,
    pub sort_order: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<category::Model> for CategoryResponse {
    fn from(model: category::Model) -> Self {
        Self {
            id: model.id,
            kind: model.kind,
            slug: model.slug,
            label: model.label,
            icon: model.icon,
            sort_order: model.sort_order,
            is_active: model.is_active,
            created_at: model.created_at,
        }
    }
}

/// Dashboard listing entry.
#[derive(Serialize, ToSchema, Debug)]
pub struct CategoryWithCount {
    pub category: CategoryResponse,
    /// Items of the same kind filed under this category.
    pub item_count: u64,
}

#[derive(Serialize, ToSchema)]
pub struct CategoryListResponse {
    pub categories: Vec<CategoryWithCount>,
}

#[derive(Deserialize, ToSchema, Debug)]
pub struct CreateCategoryRequest {
    pub label: String,
    /// Derived from `label` when absent.
    pub slug: Option<String>,
    pub icon: Option<String>,
    #[serde(alias = "sortOrder")]
    pub sort_order: Option<i32>,
}

impl CreateCategoryRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        required_text("label", &self.label, MAX_LABEL_LEN)?;
        optional_text("icon", self.icon.as_deref(), MAX_ICON_LEN)?;
        validate_optional_position(self.sort_order)?;
        Ok(())
    }
}

#[derive(Deserialize, ToSchema, Debug, Default)]
pub struct UpdateCategoryRequest {
    pub label: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub icon: Option<Option<String>>,
    #[serde(alias = "sortOrder")]
    pub sort_order: Option<i32>,
    #[serde(alias = "isActive")]
    pub is_active: Option<bool>,
}

impl UpdateCategoryRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        if let Some(label) = &self.label {
            required_text("label", label, MAX_LABEL_LEN)?;
        }
        if let Some(Some(icon)) = &self.icon {
            optional_text("icon", Some(icon), MAX_ICON_LEN)?;
        }
        validate_optional_position(self.sort_order)?;
        Ok(())
    }
}

/// Body of `DELETE /categories/{kind}`.
#[derive(Deserialize, ToSchema, Debug)]
pub struct DeleteCategoryRequest {
    /// Slug of the category to delete.
    #[serde(alias = "slug")]
    pub id: String,
    /// Slug that dependent items move to. Defaults to `uncategorized`.
    #[serde(alias = "reassignTo")]
    pub reassign_to: Option<String>,
}

#[derive(Serialize, ToSchema, Debug)]
pub struct DeleteCategoryResponse {
    pub ok: bool,
    /// Number of items moved to the target category.
    pub reassigned: u64,
}

#[derive(Serialize, ToSchema, Debug)]
pub struct PublicCategory {
    pub slug: String,
    pub label: String,
    pub icon: Option<String>,
}

impl From<category::Model> for PublicCategory {
    fn from(model: category::Model) -> Self {
        Self {
            slug: model.slug,
            label: model.label,
            icon: model.icon,
        }
    }
}

#[derive(Serialize, ToSchema, Default)]
pub struct PublicCategoryListResponse {
    pub categories: Vec<PublicCategory>,
}
