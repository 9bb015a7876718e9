use super::entities::{caption_vote, CaptionVote};
use crate::domain::{self, PageWindow, VoteValue};
use chrono::{DateTime, Utc};
use sea_orm::{entity::*, query::*, DatabaseConnection, DbErr, PaginatorTrait};
use uuid::Uuid;

#[derive(Clone)]
pub struct VoteRepository {
    db: DatabaseConnection,
}

impl VoteRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn find(
        &self,
        caption_id: Uuid,
        profile_id: Uuid,
    ) -> Result<Option<domain::CaptionVote>, DbErr> {
        CaptionVote::find()
            .filter(caption_vote::Column::CaptionId.eq(caption_id))
            .filter(caption_vote::Column::ProfileId.eq(profile_id))
            .one(&self.db)
            .await?
            .map(to_domain)
            .transpose()
    }

    pub async fn create(
        &self,
        caption_id: Uuid,
        profile_id: Uuid,
        value: VoteValue,
        at: DateTime<Utc>,
    ) -> Result<caption_vote::Model, DbErr> {
        let active = caption_vote::ActiveModel {
            id: Set(Uuid::new_v4()),
            caption_id: Set(caption_id),
            profile_id: Set(profile_id),
            vote_value: Set(value.as_i16()),
            created_datetime_utc: Set(at),
            modified_datetime_utc: Set(None),
        };
        active.insert(&self.db).await
    }

    pub async fn change_value(
        &self,
        vote_id: Uuid,
        value: VoteValue,
        at: DateTime<Utc>,
    ) -> Result<caption_vote::Model, DbErr> {
        let vote = CaptionVote::find_by_id(vote_id)
            .one(&self.db)
            .await?
            .ok_or(DbErr::RecordNotFound("Vote not found".to_string()))?;

        let mut active: caption_vote::ActiveModel = vote.into();
        active.vote_value = Set(value.as_i16());
        active.modified_datetime_utc = Set(Some(at));
        active.update(&self.db).await
    }

    pub async fn delete(&self, vote_id: Uuid) -> Result<(), DbErr> {
        CaptionVote::delete_by_id(vote_id).exec(&self.db).await?;
        Ok(())
    }

    pub async fn caption_ids_for_profile(&self, profile_id: Uuid) -> Result<Vec<Uuid>, DbErr> {
        CaptionVote::find()
            .select_only()
            .column(caption_vote::Column::CaptionId)
            .filter(caption_vote::Column::ProfileId.eq(profile_id))
            .into_tuple::<Uuid>()
            .all(&self.db)
            .await
    }

    pub async fn for_captions(
        &self,
        caption_ids: &[Uuid],
    ) -> Result<Vec<domain::CaptionVote>, DbErr> {
        if caption_ids.is_empty() {
            return Ok(Vec::new());
        }
        CaptionVote::find()
            .filter(caption_vote::Column::CaptionId.is_in(caption_ids.iter().copied()))
            .all(&self.db)
            .await?
            .into_iter()
            .map(to_domain)
            .collect()
    }

    /// Newest first, windowed, together with the exact total.
    pub async fn page_for_profile(
        &self,
        profile_id: Uuid,
        window: PageWindow,
    ) -> Result<(Vec<domain::CaptionVote>, u64), DbErr> {
        let query = CaptionVote::find().filter(caption_vote::Column::ProfileId.eq(profile_id));

        let total = query.clone().count(&self.db).await?;
        let rows = query
            .order_by_desc(caption_vote::Column::CreatedDatetimeUtc)
            .offset(window.offset())
            .limit(window.limit())
            .all(&self.db)
            .await?;

        let votes = rows
            .into_iter()
            .map(to_domain)
            .collect::<Result<Vec<_>, _>>()?;
        Ok((votes, total))
    }
}

fn to_domain(model: caption_vote::Model) -> Result<domain::CaptionVote, DbErr> {
    let value = VoteValue::try_from(model.vote_value).map_err(DbErr::Custom)?;
    Ok(domain::CaptionVote {
        id: model.id,
        caption_id: model.caption_id,
        profile_id: model.profile_id,
        value,
        created_at: model.created_datetime_utc,
        modified_at: model.modified_datetime_utc,
    })
}
