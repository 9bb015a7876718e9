use super::ContentStore;
use crate::domain::{
    Caption, CaptionDetails, CaptionExample, CaptionVote, PageWindow, Profile, SessionUser,
    VoteValue,
};
use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use sea_orm::DbErr;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::Mutex;
use uuid::Uuid;

/// In-process `ContentStore` for use-case tests.
pub struct MemoryStore {
    profiles: Mutex<Vec<Profile>>,
    captions: Mutex<Vec<CaptionDetails>>,
    votes: Mutex<Vec<CaptionVote>>,
    clock: AtomicI64,
    fail_lookups: AtomicBool,
    fail_writes: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            profiles: Mutex::new(Vec::new()),
            captions: Mutex::new(Vec::new()),
            votes: Mutex::new(Vec::new()),
            clock: AtomicI64::new(0),
            fail_lookups: AtomicBool::new(false),
            fail_writes: AtomicBool::new(false),
        }
    }

    pub fn add_profile(&self, email: &str) -> SessionUser {
        let profile = Profile::new(
            format!("google-{}", email),
            Some(email.to_string()),
            None,
            None,
        );
        let user = SessionUser::from(&profile);
        self.profiles.lock().unwrap().push(profile);
        user
    }

    pub fn add_caption(&self, content: &str, is_public: bool) -> Uuid {
        let id = Uuid::new_v4();
        self.captions.lock().unwrap().push(CaptionDetails {
            caption: Caption {
                id,
                created_at: self.tick(),
                content: Some(content.to_string()),
                is_public,
                profile_id: None,
                image_id: None,
                is_featured: false,
                like_count: 0,
            },
            author: None,
            image: None,
        });
        id
    }

    /// Drops the caption while leaving any votes on it in place.
    pub fn remove_caption(&self, caption_id: Uuid) {
        self.captions
            .lock()
            .unwrap()
            .retain(|c| c.caption.id != caption_id);
    }

    pub fn add_vote(&self, caption_id: Uuid, profile_id: Uuid, value: VoteValue) {
        let at = self.tick();
        self.votes.lock().unwrap().push(CaptionVote {
            id: Uuid::new_v4(),
            caption_id,
            profile_id,
            value,
            created_at: at,
            modified_at: None,
        });
    }

    pub fn votes_for(&self, caption_id: Uuid) -> Vec<CaptionVote> {
        self.votes
            .lock()
            .unwrap()
            .iter()
            .filter(|v| v.caption_id == caption_id)
            .cloned()
            .collect()
    }

    pub fn fail_lookups(&self, fail: bool) {
        self.fail_lookups.store(fail, Ordering::SeqCst);
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Strictly increasing timestamps so ordering by time is deterministic.
    fn tick(&self) -> DateTime<Utc> {
        let n = self.clock.fetch_add(1, Ordering::SeqCst);
        DateTime::<Utc>::UNIX_EPOCH + TimeDelta::seconds(1_700_000_000 + n)
    }

    fn check_lookup(&self) -> Result<(), DbErr> {
        if self.fail_lookups.load(Ordering::SeqCst) {
            Err(DbErr::Custom("lookup unavailable".to_string()))
        } else {
            Ok(())
        }
    }

    fn check_write(&self) -> Result<(), DbErr> {
        if self.fail_writes.load(Ordering::SeqCst) {
            Err(DbErr::Custom("write rejected".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl ContentStore for MemoryStore {
    async fn find_profile(&self, id: Uuid) -> Result<Option<Profile>, DbErr> {
        Ok(self
            .profiles
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == id)
            .cloned())
    }

    async fn find_vote(
        &self,
        caption_id: Uuid,
        profile_id: Uuid,
    ) -> Result<Option<CaptionVote>, DbErr> {
        self.check_lookup()?;
        Ok(self
            .votes
            .lock()
            .unwrap()
            .iter()
            .find(|v| v.caption_id == caption_id && v.profile_id == profile_id)
            .cloned())
    }

    async fn insert_vote(
        &self,
        caption_id: Uuid,
        profile_id: Uuid,
        value: VoteValue,
        at: DateTime<Utc>,
    ) -> Result<(), DbErr> {
        self.check_write()?;
        let mut votes = self.votes.lock().unwrap();
        if votes
            .iter()
            .any(|v| v.caption_id == caption_id && v.profile_id == profile_id)
        {
            return Err(DbErr::Custom("duplicate vote".to_string()));
        }
        votes.push(CaptionVote {
            id: Uuid::new_v4(),
            caption_id,
            profile_id,
            value,
            created_at: at,
            modified_at: None,
        });
        Ok(())
    }

    async fn update_vote(
        &self,
        vote_id: Uuid,
        value: VoteValue,
        at: DateTime<Utc>,
    ) -> Result<(), DbErr> {
        self.check_write()?;
        let mut votes = self.votes.lock().unwrap();
        let vote = votes
            .iter_mut()
            .find(|v| v.id == vote_id)
            .ok_or_else(|| DbErr::RecordNotFound("vote".to_string()))?;
        vote.value = value;
        vote.modified_at = Some(at);
        Ok(())
    }

    async fn delete_vote(&self, vote_id: Uuid) -> Result<(), DbErr> {
        self.check_write()?;
        self.votes.lock().unwrap().retain(|v| v.id != vote_id);
        Ok(())
    }

    async fn voted_caption_ids(&self, profile_id: Uuid) -> Result<Vec<Uuid>, DbErr> {
        self.check_lookup()?;
        Ok(self
            .votes
            .lock()
            .unwrap()
            .iter()
            .filter(|v| v.profile_id == profile_id)
            .map(|v| v.caption_id)
            .collect())
    }

    async fn public_captions(&self) -> Result<Vec<CaptionDetails>, DbErr> {
        Ok(self
            .captions
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.caption.is_public)
            .cloned()
            .collect())
    }

    async fn find_caption(&self, id: Uuid) -> Result<Option<CaptionDetails>, DbErr> {
        Ok(self
            .captions
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.caption.id == id)
            .cloned())
    }

    async fn captions_by_ids(&self, ids: &[Uuid]) -> Result<Vec<CaptionDetails>, DbErr> {
        Ok(self
            .captions
            .lock()
            .unwrap()
            .iter()
            .filter(|c| ids.contains(&c.caption.id))
            .cloned()
            .collect())
    }

    async fn caption_votes(&self, caption_ids: &[Uuid]) -> Result<Vec<CaptionVote>, DbErr> {
        self.check_lookup()?;
        Ok(self
            .votes
            .lock()
            .unwrap()
            .iter()
            .filter(|v| caption_ids.contains(&v.caption_id))
            .cloned()
            .collect())
    }

    async fn votes_by_profile(
        &self,
        profile_id: Uuid,
        window: PageWindow,
    ) -> Result<(Vec<CaptionVote>, u64), DbErr> {
        let mut votes: Vec<CaptionVote> = self
            .votes
            .lock()
            .unwrap()
            .iter()
            .filter(|v| v.profile_id == profile_id)
            .cloned()
            .collect();
        votes.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        let total = votes.len() as u64;
        let page = votes
            .into_iter()
            .skip(window.offset() as usize)
            .take(window.limit() as usize)
            .collect();
        Ok((page, total))
    }

    async fn caption_examples(&self) -> Result<Vec<CaptionExample>, DbErr> {
        Ok(Vec::new())
    }
}
