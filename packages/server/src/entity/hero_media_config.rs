use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Row id used when the selection row is first created.
pub const SINGLETON_ID: i32 = 1;

/// Current hero selection. The most recently updated row is authoritative.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "hero_media_config")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i32,

    pub selected_main_id: Option<i32>,
    pub selected_side_id: Option<i32>,

    pub updated_by: Option<String>,
    #[sea_orm(indexed)]
    pub updated_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
