use super::entities::{caption_example, CaptionExample};
use crate::domain;
use sea_orm::{entity::*, query::*, DatabaseConnection, DbErr};

#[derive(Clone)]
pub struct CaptionExampleRepository {
    db: DatabaseConnection,
}

impl CaptionExampleRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list(&self) -> Result<Vec<domain::CaptionExample>, DbErr> {
        let rows = CaptionExample::find()
            .order_by_asc(caption_example::Column::Id)
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|r| domain::CaptionExample {
                id: r.id,
                created_at: r.created_datetime_utc,
                modified_at: r.modified_datetime_utc,
                image_description: r.image_description,
                caption: r.caption,
                explanation: r.explanation,
                priority: r.priority,
                image_id: r.image_id,
            })
            .collect())
    }
}
