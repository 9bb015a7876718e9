use crate::domain::{
    CaptionDetails, CaptionExample, CaptionVote, PageWindow, Profile, VoteValue,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::DbErr;
use uuid::Uuid;

/// Everything the use cases need from the content store.
#[async_trait]
pub trait ContentStore: Send + Sync {
    async fn find_profile(&self, id: Uuid) -> Result<Option<Profile>, DbErr>;

    async fn find_vote(&self, caption_id: Uuid, profile_id: Uuid)
        -> Result<Option<CaptionVote>, DbErr>;

    async fn insert_vote(
        &self,
        caption_id: Uuid,
        profile_id: Uuid,
        value: VoteValue,
        at: DateTime<Utc>,
    ) -> Result<(), DbErr>;

    async fn update_vote(&self, vote_id: Uuid, value: VoteValue, at: DateTime<Utc>)
        -> Result<(), DbErr>;

    async fn delete_vote(&self, vote_id: Uuid) -> Result<(), DbErr>;

    async fn voted_caption_ids(&self, profile_id: Uuid) -> Result<Vec<Uuid>, DbErr>;

    async fn public_captions(&self) -> Result<Vec<CaptionDetails>, DbErr>;

    async fn find_caption(&self, id: Uuid) -> Result<Option<CaptionDetails>, DbErr>;

    async fn captions_by_ids(&self, ids: &[Uuid]) -> Result<Vec<CaptionDetails>, DbErr>;

    /// All votes cast on any of `caption_ids`.
    async fn caption_votes(&self, caption_ids: &[Uuid]) -> Result<Vec<CaptionVote>, DbErr>;

    /// One page of a profile's votes, newest first, plus the total count.
    async fn votes_by_profile(
        &self,
        profile_id: Uuid,
        window: PageWindow,
    ) -> Result<(Vec<CaptionVote>, u64), DbErr>;

    async fn caption_examples(&self) -> Result<Vec<CaptionExample>, DbErr>;
}
