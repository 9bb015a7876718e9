use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "caption_examples")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub created_datetime_utc: DateTimeUtc,
    pub modified_datetime_utc: Option<DateTimeUtc>,
    #[sea_orm(column_type = "Text")]
    pub image_description: String,
    #[sea_orm(column_type = "Text")]
    pub caption: String,
    #[sea_orm(column_type = "Text")]
    pub explanation: String,
    pub priority: i32,
    pub image_id: Option<Uuid>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
