use common::{HeroMediaKind, HeroSlot};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A video or image that can be shown in one of the landing page hero slots.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "hero_media")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(indexed)]
    pub slot: HeroSlot,
    pub label: String,
    pub kind: HeroMediaKind,

    #[sea_orm(column_type = "Text")]
    pub url: String,
    pub storage_path: Option<String>,
    pub mime_type: Option<String>,

    #[sea_orm(default_value = false)]
    pub is_default: bool,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
