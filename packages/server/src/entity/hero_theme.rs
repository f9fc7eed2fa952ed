use common::ThemeKind;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Hero background theme. Writes replace the table contents, so it holds
/// at most one row.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "hero_theme")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub kind: ThemeKind,
    pub solid_color: Option<String>,
    pub from_color: Option<String>,
    pub to_color: Option<String>,

    pub updated_by: Option<String>,
    pub updated_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
