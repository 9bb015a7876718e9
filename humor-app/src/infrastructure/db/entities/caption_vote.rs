use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One row per (caption, profile); a UNIQUE index enforces it.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "caption_votes")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub caption_id: Uuid,
    pub profile_id: Uuid,
    pub vote_value: i16,
    pub created_datetime_utc: DateTimeUtc,
    pub modified_datetime_utc: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::caption::Entity",
        from = "Column::CaptionId",
        to = "super::caption::Column::Id",
        on_delete = "Cascade"
    )]
    Caption,
    #[sea_orm(
        belongs_to = "super::profile::Entity",
        from = "Column::ProfileId",
        to = "super::profile::Column::Id",
        on_delete = "Cascade"
    )]
    Profile,
}

impl Related<super::caption::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Caption.def()
    }
}

impl Related<super::profile::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Profile.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
