use super::entities::{caption, image, profile, Caption, Image, Profile};
use crate::domain::{self, CaptionAuthor, CaptionDetails, CaptionImage};
use sea_orm::{entity::*, query::*, DatabaseConnection, DbErr};
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

#[derive(Clone)]
pub struct CaptionRepository {
    db: DatabaseConnection,
}

impl CaptionRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn find_public(&self) -> Result<Vec<CaptionDetails>, DbErr> {
        let rows = Caption::find()
            .filter(caption::Column::IsPublic.eq(true))
            .all(&self.db)
            .await?;
        self.resolve(rows).await
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<CaptionDetails>, DbErr> {
        match Caption::find_by_id(id).one(&self.db).await? {
            Some(row) => Ok(self.resolve(vec![row]).await?.pop()),
            None => Ok(None),
        }
    }

    pub async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<CaptionDetails>, DbErr> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let rows = Caption::find()
            .filter(caption::Column::Id.is_in(ids.iter().copied()))
            .all(&self.db)
            .await?;
        self.resolve(rows).await
    }

    /// Attaches author and image to each caption with one query per table.
    async fn resolve(&self, rows: Vec<caption::Model>) -> Result<Vec<CaptionDetails>, DbErr> {
        let profile_ids: HashSet<Uuid> = rows.iter().filter_map(|r| r.profile_id).collect();
        let image_ids: HashSet<Uuid> = rows.iter().filter_map(|r| r.image_id).collect();

        let authors: HashMap<Uuid, CaptionAuthor> = if profile_ids.is_empty() {
            HashMap::new()
        } else {
            Profile::find()
                .filter(profile::Column::Id.is_in(profile_ids))
                .all(&self.db)
                .await?
                .into_iter()
                .map(|p| {
                    (
                        p.id,
                        CaptionAuthor {
                            first_name: p.first_name,
                            last_name: p.last_name,
                            email: p.email,
                        },
                    )
                })
                .collect()
        };

        let images: HashMap<Uuid, CaptionImage> = if image_ids.is_empty() {
            HashMap::new()
        } else {
            Image::find()
                .filter(image::Column::Id.is_in(image_ids))
                .all(&self.db)
                .await?
                .into_iter()
                .map(|i| {
                    (
                        i.id,
                        CaptionImage {
                            url: i.url,
                            description: i.image_description,
                        },
                    )
                })
                .collect()
        };

        Ok(rows
            .into_iter()
            .map(|r| CaptionDetails {
                author: r.profile_id.and_then(|id| authors.get(&id).cloned()),
                image: r.image_id.and_then(|id| images.get(&id).cloned()),
                caption: domain::Caption {
                    id: r.id,
                    created_at: r.created_datetime_utc,
                    content: r.content,
                    is_public: r.is_public,
                    profile_id: r.profile_id,
                    image_id: r.image_id,
                    is_featured: r.is_featured,
                    like_count: r.like_count,
                },
            })
            .collect())
    }
}
