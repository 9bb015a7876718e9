use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "images")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub url: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub image_description: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::caption::Entity")]
    Captions,
}

impl Related<super::caption::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Captions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
