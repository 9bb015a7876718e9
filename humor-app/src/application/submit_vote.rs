use super::ContentStore;
use crate::domain::{SessionUser, VoteValue, VoteWrite};
use humor_errors::AppError;
use std::sync::Arc;
use uuid::Uuid;

pub struct SubmitVote {
    store: Arc<dyn ContentStore>,
}

impl SubmitVote {
    pub fn new(store: Arc<dyn ContentStore>) -> Self {
        Self { store }
    }

    /// Records `value` for the viewer on `caption_id`. Repeating the stored
    /// value withdraws the vote, the opposite value replaces it.
    pub async fn execute(
        &self,
        viewer: Option<&SessionUser>,
        caption_id: Uuid,
        value: VoteValue,
    ) -> Result<VoteWrite, AppError> {
        let viewer = viewer.ok_or(AppError::NotAuthenticated)?;

        let profile = self
            .store
            .find_profile(viewer.id)
            .await
            .map_err(|e| {
                tracing::error!("Error loading profile {}: {}", viewer.id, e);
                AppError::ProfileNotFound
            })?
            .ok_or(AppError::ProfileNotFound)?;

        let existing = self
            .store
            .find_vote(caption_id, profile.id)
            .await
            .map_err(|e| {
                tracing::error!("Error checking existing vote: {}", e);
                AppError::VoteLookupFailed(e.to_string())
            })?;

        let write = VoteWrite::plan(existing.as_ref(), value);
        let now = chrono::Utc::now();

        let result = match write {
            VoteWrite::Insert(value) => {
                self.store
                    .insert_vote(caption_id, profile.id, value, now)
                    .await
            }
            VoteWrite::Update { vote_id, value } => {
                self.store.update_vote(vote_id, value, now).await
            }
            VoteWrite::Withdraw { vote_id } => self.store.delete_vote(vote_id).await,
        };

        if let Err(e) = result {
            tracing::error!("{} on caption {}: {}", write.failure_message(), caption_id, e);
            return Err(AppError::VoteWriteFailed(
                write.failure_message().to_string(),
            ));
        }

        tracing::debug!(?write, %caption_id, profile_id = %profile.id, "vote recorded");
        Ok(write)
    }

    pub async fn user_vote(
        &self,
        viewer: Option<&SessionUser>,
        caption_id: Uuid,
    ) -> Result<Option<VoteValue>, AppError> {
        let Some(viewer) = viewer else {
            return Ok(None);
        };

        let vote = self
            .store
            .find_vote(caption_id, viewer.id)
            .await
            .map_err(|e| AppError::VoteLookupFailed(e.to_string()))?;
        Ok(vote.map(|v| v.value))
    }
}
