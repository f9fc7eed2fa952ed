use common::AssetKind;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// An uploaded file: gallery media, catalog item images and files, voice notes.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "asset")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(indexed)]
    pub kind: AssetKind,

    /// Owning catalog item for bundle/design kinds, `None` for standalone kinds.
    #[sea_orm(indexed)]
    pub owner_id: Option<i32>,

    #[sea_orm(column_type = "Text")]
    pub url: String,

    /// Object path inside `bucket`. Legacy rows only carry `url`.
    pub storage_path: Option<String>,
    pub bucket: Option<String>,

    pub mime_type: Option<String>,
    /// Original upload filename.
    pub filename: Option<String>,
    pub size: i64,

    pub sort_order: i32,
    pub caption: Option<String>,

    /// JSON array of tag strings.
    #[sea_orm(column_type = "JsonBinary")]
    pub tags: Json,

    /// User (or integration identity) that uploaded the file.
    pub created_by: Option<String>,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
