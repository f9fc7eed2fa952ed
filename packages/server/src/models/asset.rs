use chrono::{DateTime, Utc};
use common::AssetKind;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use super::shared::{double_option, json_strings};
use crate::entity::asset;
use crate::error::AppError;

/// Public projection of an asset row.
#[derive(Serialize, ToSchema, Debug, Clone)]
pub struct AssetResponse {
    #[schema(example = 42)]
    pub id: i32,
    pub kind: AssetKind,
    /// Owning bundle or design id.
    pub owner_id: Option<i32>,
    #[schema(example = "https://cdn.example.com/storage/v1/object/public/bundles/gallery/3/5f1c.png")]
    pub url: String,
    pub caption: Option<String>,
    pub tags: Vec<String>,
    #[schema(example = "image/png")]
    pub mime_type: Option<String>,
    #[schema(example = "photo.png")]
    pub filename: Option<String>,
    pub size: i64,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
}

impl From<asset::Model> for AssetResponse {
    fn from(model: asset::Model) -> Self {
        Self {
            id: model.id,
            kind: model.kind,
            owner_id: model.owner_id,
            tags: json_strings(&model.tags),
            url: model.url,
            caption: model.caption,
            mime_type: model.mime_type,
            filename: model.filename,
            size: model.size,
            sort_order: model.sort_order,
            created_at: model.created_at,
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct AssetCreatedResponse {
    pub item: AssetResponse,
}

#[derive(Serialize, ToSchema)]
pub struct AssetListResponse {
    pub items: Vec<AssetResponse>,
}

#[derive(Deserialize, IntoParams, Debug, Default)]
#[into_params(parameter_in = Query)]
pub struct AssetListQuery {
    pub kind: Option<AssetKind>,
    pub owner_id: Option<i32>,
}

/// How to find the asset to delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetTarget {
    /// By primary key. A missing row is a 404.
    Id(i32),
    /// By owner and public URL, optionally narrowed by kind. A missing row is
    /// reported as already deleted. `owner_id: None` matches standalone media
    /// and voice notes.
    NaturalKey {
        owner_id: Option<i32>,
        url: String,
        kind: Option<AssetKind>,
    },
}

/// Body of `POST|DELETE /assets/remove`: either `{id}` or `{url, owner_id?, kind?}`.
#[derive(Deserialize, ToSchema, Debug)]
pub struct RemoveAssetRequest {
    pub id: Option<i32>,
    #[serde(alias = "ownerId", alias = "bundle_id", alias = "design_id")]
    pub owner_id: Option<i32>,
    pub url: Option<String>,
    pub kind: Option<AssetKind>,
}

impl RemoveAssetRequest {
    pub fn into_target(self) -> Result<AssetTarget, AppError> {
        if let Some(id) = self.id {
            return Ok(AssetTarget::Id(id));
        }
        match self.url {
            Some(url) if !url.trim().is_empty() => Ok(AssetTarget::NaturalKey {
                owner_id: self.owner_id,
                url: url.trim().to_string(),
                kind: self.kind,
            }),
            _ => Err(AppError::Validation("Provide either 'id' or 'url'".into())),
        }
    }
}

#[derive(Serialize, ToSchema, Debug, PartialEq, Eq)]
pub struct RemoveAssetResponse {
    pub ok: bool,
    /// True when no row matched the natural key.
    pub already_deleted: bool,
}

#[derive(Deserialize, ToSchema, Debug, Default)]
pub struct UpdateAssetRequest {
    /// Set to `null` to clear.
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub caption: Option<Option<String>>,
    pub tags: Option<Vec<String>>,
    pub sort_order: Option<i32>,
}
