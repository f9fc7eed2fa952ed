use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "faq")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Ordered JSON array of question variants.
    #[sea_orm(column_type = "JsonBinary")]
    pub questions: Json,

    #[sea_orm(column_type = "Text")]
    pub answer: String,

    pub sort_order: i32,
    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
