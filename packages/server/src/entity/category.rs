use common::CatalogKind;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Slug of the catch-all category. Exists for every kind and cannot be deleted.
pub const FALLBACK_SLUG: &str = "uncategorized";

/// Label used when the fallback category has to be (re)created.
pub const FALLBACK_LABEL: &str = "Uncategorized";

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "category")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// `(kind, slug)` is unique, see `seed::ensure_indexes`.
    #[sea_orm(indexed)]
    pub kind: CatalogKind,
    pub slug: String,

    pub label: String,
    pub icon: Option<String>,
    pub sort_order: i32,

    #[sea_orm(default_value = true)]
    pub is_active: bool,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
