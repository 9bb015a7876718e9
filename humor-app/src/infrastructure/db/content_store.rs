use super::{CaptionExampleRepository, CaptionRepository, ProfileRepository, VoteRepository};
use crate::application::ContentStore;
use crate::domain::{
    CaptionDetails, CaptionExample, CaptionVote, PageWindow, Profile, VoteValue,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{DatabaseConnection, DbErr};
use uuid::Uuid;

/// PostgreSQL-backed store, one repository per table.
#[derive(Clone)]
pub struct SeaOrmStore {
    pub captions: CaptionRepository,
    pub votes: VoteRepository,
    pub profiles: ProfileRepository,
    pub examples: CaptionExampleRepository,
}

impl SeaOrmStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            captions: CaptionRepository::new(db.clone()),
            votes: VoteRepository::new(db.clone()),
            profiles: ProfileRepository::new(db.clone()),
            examples: CaptionExampleRepository::new(db),
        }
    }
}

#[async_trait]
impl ContentStore for SeaOrmStore {
    async fn find_profile(&self, id: Uuid) -> Result<Option<Profile>, DbErr> {
        self.profiles.find_by_id(id).await
    }

    async fn find_vote(
        &self,
        caption_id: Uuid,
        profile_id: Uuid,
    ) -> Result<Option<CaptionVote>, DbErr> {
        self.votes.find(caption_id, profile_id).await
    }

    async fn insert_vote(
        &self,
        caption_id: Uuid,
        profile_id: Uuid,
        value: VoteValue,
        at: DateTime<Utc>,
    ) -> Result<(), DbErr> {
        self.votes.create(caption_id, profile_id, value, at).await?;
        Ok(())
    }

    async fn update_vote(
        &self,
        vote_id: Uuid,
        value: VoteValue,
        at: DateTime<Utc>,
    ) -> Result<(), DbErr> {
        self.votes.change_value(vote_id, value, at).await?;
        Ok(())
    }

    async fn delete_vote(&self, vote_id: Uuid) -> Result<(), DbErr> {
        self.votes.delete(vote_id).await
    }

    async fn voted_caption_ids(&self, profile_id: Uuid) -> Result<Vec<Uuid>, DbErr> {
        self.votes.caption_ids_for_profile(profile_id).await
    }

    async fn public_captions(&self) -> Result<Vec<CaptionDetails>, DbErr> {
        self.captions.find_public().await
    }

    async fn find_caption(&self, id: Uuid) -> Result<Option<CaptionDetails>, DbErr> {
        self.captions.find_by_id(id).await
    }

    async fn captions_by_ids(&self, ids: &[Uuid]) -> Result<Vec<CaptionDetails>, DbErr> {
        self.captions.find_by_ids(ids).await
    }

    async fn caption_votes(&self, caption_ids: &[Uuid]) -> Result<Vec<CaptionVote>, DbErr> {
        self.votes.for_captions(caption_ids).await
    }

    async fn votes_by_profile(
        &self,
        profile_id: Uuid,
        window: PageWindow,
    ) -> Result<(Vec<CaptionVote>, u64), DbErr> {
        self.votes.page_for_profile(profile_id, window).await
    }

    async fn caption_examples(&self) -> Result<Vec<CaptionExample>, DbErr> {
        self.examples.list().await
    }
}
