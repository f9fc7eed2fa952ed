use common::CatalogKind;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A bundle or a design, distinguished by `kind`.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "catalog_item")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(indexed)]
    pub kind: CatalogKind,

    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub blurb: Option<String>,
    /// Starting price in cents.
    pub price_from: Option<i32>,

    /// Slug of a category of the same kind.
    #[sea_orm(indexed)]
    pub category_id: String,

    #[sea_orm(column_type = "Text")]
    pub thumb_url: Option<String>,
    pub thumb_storage_path: Option<String>,

    pub sort_order: i32,
    #[sea_orm(default_value = true)]
    pub is_active: bool,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
