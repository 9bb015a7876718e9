use super::entities::{profile, Profile};
use crate::domain;
use sea_orm::{entity::*, query::*, DatabaseConnection, DbErr};
use uuid::Uuid;

#[derive(Clone)]
pub struct ProfileRepository {
    db: DatabaseConnection,
}

impl ProfileRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<domain::Profile>, DbErr> {
        Ok(Profile::find_by_id(id).one(&self.db).await?.map(to_domain))
    }

    pub async fn find_by_google_sub(&self, sub: &str) -> Result<Option<profile::Model>, DbErr> {
        Profile::find()
            .filter(profile::Column::GoogleSub.eq(sub))
            .one(&self.db)
            .await
    }

    /// Creates the profile on first sign-in, refreshes name and email after that.
    pub async fn upsert(&self, data: &domain::Profile) -> Result<domain::Profile, DbErr> {
        let now = chrono::Utc::now();
        let model = if let Some(existing) = self.find_by_google_sub(&data.google_sub).await? {
            let mut active: profile::ActiveModel = existing.into();
            active.email = Set(data.email.clone());
            active.first_name = Set(data.first_name.clone());
            active.last_name = Set(data.last_name.clone());
            active.modified_datetime_utc = Set(Some(now));
            active.update(&self.db).await?
        } else {
            let active = profile::ActiveModel {
                id: Set(data.id),
                google_sub: Set(data.google_sub.clone()),
                email: Set(data.email.clone()),
                first_name: Set(data.first_name.clone()),
                last_name: Set(data.last_name.clone()),
                created_datetime_utc: Set(Some(now)),
                modified_datetime_utc: Set(Some(now)),
            };
            active.insert(&self.db).await?
        };
        Ok(to_domain(model))
    }
}

fn to_domain(model: profile::Model) -> domain::Profile {
    domain::Profile {
        id: model.id,
        google_sub: model.google_sub,
        email: model.email,
        first_name: model.first_name,
        last_name: model.last_name,
        created_at: model.created_datetime_utc,
        modified_at: model.modified_datetime_utc,
    }
}
