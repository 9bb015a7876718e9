use super::ContentStore;
use crate::domain::{
    CaptionDetails, CaptionExample, CaptionWithVotes, PageWindow, SessionUser, VotedHistoryPage,
};
use humor_errors::AppError;
use rand::Rng;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use uuid::Uuid;

pub struct BrowseCaptions {
    store: Arc<dyn ContentStore>,
}

impl BrowseCaptions {
    pub fn new(store: Arc<dyn ContentStore>) -> Self {
        Self { store }
    }

    /// A public caption the viewer has not voted on, chosen uniformly at random.
    pub async fn random_unvoted(
        &self,
        viewer: Option<&SessionUser>,
    ) -> Result<CaptionWithVotes, AppError> {
        let viewer = viewer.ok_or(AppError::NotAuthenticated)?;

        let voted: HashSet<Uuid> = match self.store.voted_caption_ids(viewer.id).await {
            Ok(ids) => ids.into_iter().collect(),
            Err(e) => {
                tracing::error!("Error fetching voted captions: {}", e);
                HashSet::new()
            }
        };

        let captions = self.store.public_captions().await.map_err(|e| {
            tracing::error!("Error fetching captions: {}", e);
            AppError::Database(e.to_string())
        })?;

        if captions.is_empty() {
            return Err(AppError::NoData(
                "No public captions available. This might be due to access policies restricting access."
                    .to_string(),
            ));
        }

        let available = captions.len();
        // Keep the thread-local rng out of any await point.
        let picked = {
            let mut rng = rand::thread_rng();
            choose_unvoted(captions, &voted, &mut rng)
        };
        let details = picked.ok_or_else(|| {
            AppError::NoData(format!(
                "You've voted on all {} available captions!",
                available
            ))
        })?;

        let vote_score = match self.scores(&[details.caption.id]).await {
            Ok(scores) => scores.get(&details.caption.id).copied().unwrap_or(0),
            Err(e) => {
                tracing::warn!("Score lookup failed for {}: {}", details.caption.id, e);
                0
            }
        };
        Ok(CaptionWithVotes {
            vote_score,
            details,
            user_vote: None,
        })
    }

    pub async fn by_id(
        &self,
        viewer: Option<&SessionUser>,
        caption_id: Uuid,
    ) -> Result<CaptionWithVotes, AppError> {
        let viewer = viewer.ok_or(AppError::NotAuthenticated)?;

        let details = self
            .store
            .find_caption(caption_id)
            .await
            .map_err(|e| {
                tracing::error!("Error fetching caption {}: {}", caption_id, e);
                AppError::NotFound
            })?
            .ok_or(AppError::NotFound)?;

        let votes = self.store.caption_votes(&[caption_id]).await.map_err(|e| {
            tracing::error!("Error fetching votes for caption {}: {}", caption_id, e);
            AppError::NotFound
        })?;

        let vote_score = votes.iter().map(|v| i64::from(v.value)).sum();
        let user_vote = votes
            .iter()
            .find(|v| v.profile_id == viewer.id)
            .map(|v| v.value);

        Ok(CaptionWithVotes {
            details,
            vote_score,
            user_vote,
        })
    }

    /// The viewer's votes, newest first, one page at a time.
    pub async fn voted_history(
        &self,
        viewer: Option<&SessionUser>,
        page: u64,
        per_page: u64,
    ) -> Result<VotedHistoryPage, AppError> {
        let viewer = viewer.ok_or(AppError::NotAuthenticated)?;
        let window = PageWindow::new(page, per_page);

        let (votes, total_count) = self
            .store
            .votes_by_profile(viewer.id, window)
            .await
            .map_err(|e| {
                tracing::error!("Error fetching voted history: {}", e);
                AppError::Database(e.to_string())
            })?;

        if votes.is_empty() {
            return Err(AppError::NoData(
                "You haven't voted on any captions yet!".to_string(),
            ));
        }

        let ids: Vec<Uuid> = votes.iter().map(|v| v.caption_id).collect();
        let mut captions: HashMap<Uuid, CaptionDetails> = self
            .store
            .captions_by_ids(&ids)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?
            .into_iter()
            .map(|c| (c.caption.id, c))
            .collect();
        let scores = self.scores(&ids).await?;

        let captions = votes
            .into_iter()
            .filter_map(|vote| {
                let details = captions.remove(&vote.caption_id)?;
                Some(CaptionWithVotes {
                    vote_score: scores.get(&vote.caption_id).copied().unwrap_or(0),
                    details,
                    user_vote: Some(vote.value),
                })
            })
            .collect();

        Ok(VotedHistoryPage {
            captions,
            total_count,
            current_page: window.page,
            total_pages: window.total_pages(total_count),
            error: None,
        })
    }

    pub async fn caption_examples(
        &self,
        viewer: Option<&SessionUser>,
    ) -> Result<Vec<CaptionExample>, AppError> {
        viewer.ok_or(AppError::NotAuthenticated)?;
        self.store.caption_examples().await.map_err(|e| {
            tracing::error!("Error fetching caption examples: {}", e);
            AppError::Database(e.to_string())
        })
    }

    async fn scores(&self, caption_ids: &[Uuid]) -> Result<HashMap<Uuid, i64>, AppError> {
        let votes = self
            .store
            .caption_votes(caption_ids)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        let mut scores: HashMap<Uuid, i64> = HashMap::new();
        for vote in votes {
            *scores.entry(vote.caption_id).or_default() += i64::from(vote.value);
        }
        Ok(scores)
    }
}

/// Picks uniformly among the captions whose id is not in `voted`.
pub fn choose_unvoted<R: Rng + ?Sized>(
    captions: Vec<CaptionDetails>,
    voted: &HashSet<Uuid>,
    rng: &mut R,
) -> Option<CaptionDetails> {
    let mut unvoted: Vec<CaptionDetails> = captions
        .into_iter()
        .filter(|c| !voted.contains(&c.caption.id))
        .collect();
    if unvoted.is_empty() {
        return None;
    }
    let index = rng.gen_range(0..unvoted.len());
    Some(unvoted.swap_remove(index))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::memory_store::MemoryStore;
    use crate::domain::VoteValue;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn details(id: Uuid) -> CaptionDetails {
        CaptionDetails {
            caption: crate::domain::Caption {
                id,
                created_at: chrono::Utc::now(),
                content: None,
                is_public: true,
                profile_id: None,
                image_id: None,
                is_featured: false,
                like_count: 0,
            },
            author: None,
            image: None,
        }
    }

    #[test]
    fn test_choose_unvoted_never_returns_voted() {
        let ids: Vec<Uuid> = (0..12).map(|_| Uuid::new_v4()).collect();
        let voted: HashSet<Uuid> = ids.iter().take(9).copied().collect();
        let mut rng = StdRng::seed_from_u64(7);

        let mut seen = HashSet::new();
        for _ in 0..200 {
            let captions = ids.iter().copied().map(details).collect();
            let picked = choose_unvoted(captions, &voted, &mut rng).unwrap();
            assert!(!voted.contains(&picked.caption.id));
            seen.insert(picked.caption.id);
        }
        assert_eq!(seen.len(), 3);
    }

    #[test]
    fn test_choose_unvoted_when_all_voted() {
        let ids: Vec<Uuid> = (0..3).map(|_| Uuid::new_v4()).collect();
        let voted: HashSet<Uuid> = ids.iter().copied().collect();
        let mut rng = StdRng::seed_from_u64(1);
        let captions = ids.iter().copied().map(details).collect();
        assert!(choose_unvoted(captions, &voted, &mut rng).is_none());
    }

    #[tokio::test]
    async fn test_random_unvoted_skips_voted_and_hidden() {
        let store = Arc::new(MemoryStore::new());
        let viewer = store.add_profile("viewer@example.com");
        let voted = store.add_caption("voted", true);
        let hidden = store.add_caption("hidden", false);
        let fresh = store.add_caption("fresh", true);
        store.add_vote(voted, viewer.id, VoteValue::Up);
        let other = store.add_profile("other@example.com");
        store.add_vote(fresh, other.id, VoteValue::Down);

        let browse = BrowseCaptions::new(store.clone());
        for _ in 0..20 {
            let caption = browse.random_unvoted(Some(&viewer)).await.unwrap();
            assert_eq!(caption.id(), fresh);
            assert_ne!(caption.id(), hidden);
            assert_eq!(caption.vote_score, -1);
            assert_eq!(caption.user_vote, None);
        }
    }

    #[tokio::test]
    async fn test_random_unvoted_exhausted() {
        let store = Arc::new(MemoryStore::new());
        let viewer = store.add_profile("viewer@example.com");
        let a = store.add_caption("a", true);
        let b = store.add_caption("b", true);
        store.add_vote(a, viewer.id, VoteValue::Up);
        store.add_vote(b, viewer.id, VoteValue::Down);

        let browse = BrowseCaptions::new(store);
        let err = browse.random_unvoted(Some(&viewer)).await.unwrap_err();
        assert_eq!(
            err,
            AppError::NoData("You've voted on all 2 available captions!".to_string())
        );
    }

    #[tokio::test]
    async fn test_random_unvoted_requires_login_and_data() {
        let store = Arc::new(MemoryStore::new());
        let viewer = store.add_profile("viewer@example.com");
        let browse = BrowseCaptions::new(store);

        assert_eq!(
            browse.random_unvoted(None).await.unwrap_err(),
            AppError::NotAuthenticated
        );
        assert!(matches!(
            browse.random_unvoted(Some(&viewer)).await.unwrap_err(),
            AppError::NoData(_)
        ));
    }

    #[tokio::test]
    async fn test_by_id_includes_viewer_vote() {
        let store = Arc::new(MemoryStore::new());
        let viewer = store.add_profile("viewer@example.com");
        let other = store.add_profile("other@example.com");
        let caption = store.add_caption("hello", true);
        store.add_vote(caption, viewer.id, VoteValue::Down);
        store.add_vote(caption, other.id, VoteValue::Down);

        let browse = BrowseCaptions::new(store);
        let found = browse.by_id(Some(&viewer), caption).await.unwrap();
        assert_eq!(found.vote_score, -2);
        assert_eq!(found.user_vote, Some(VoteValue::Down));
        assert_eq!(found.details.text(), "hello");

        let missing = browse.by_id(Some(&viewer), Uuid::new_v4()).await.unwrap_err();
        assert_eq!(missing.user_message(), "Failed to fetch caption");
    }

    #[tokio::test]
    async fn test_voted_history_pages_newest_first() {
        let store = Arc::new(MemoryStore::new());
        let viewer = store.add_profile("viewer@example.com");
        let mut ids = Vec::new();
        for i in 0..5 {
            let id = store.add_caption(&format!("caption {}", i), true);
            store.add_vote(id, viewer.id, VoteValue::Up);
            ids.push(id);
        }

        let browse = BrowseCaptions::new(store);
        let first = browse.voted_history(Some(&viewer), 1, 2).await.unwrap();
        assert_eq!(first.total_count, 5);
        assert_eq!(first.total_pages, 3);
        assert_eq!(first.current_page, 1);
        let first_ids: Vec<Uuid> = first.captions.iter().map(|c| c.id()).collect();
        assert_eq!(first_ids, vec![ids[4], ids[3]]);
        assert!(first.captions.iter().all(|c| c.user_vote == Some(VoteValue::Up)));

        let last = browse.voted_history(Some(&viewer), 3, 2).await.unwrap();
        assert_eq!(last.captions.len(), 1);
        assert_eq!(last.captions[0].id(), ids[0]);

        let beyond = browse.voted_history(Some(&viewer), 4, 2).await.unwrap_err();
        assert!(matches!(beyond, AppError::NoData(_)));
    }

    #[tokio::test]
    async fn test_voted_history_skips_vanished_captions() {
        let store = Arc::new(MemoryStore::new());
        let viewer = store.add_profile("viewer@example.com");
        let mut ids = Vec::new();
        for i in 0..3 {
            let id = store.add_caption(&format!("caption {}", i), true);
            store.add_vote(id, viewer.id, VoteValue::Down);
            ids.push(id);
        }
        store.remove_caption(ids[1]);

        let browse = BrowseCaptions::new(store);
        let page = browse.voted_history(Some(&viewer), 1, 20).await.unwrap();
        assert_eq!(page.total_count, 3);
        assert_eq!(page.total_pages, 1);
        let shown: Vec<Uuid> = page.captions.iter().map(|c| c.id()).collect();
        assert_eq!(shown, vec![ids[2], ids[0]]);
    }

    #[tokio::test]
    async fn test_voted_history_huge_page_is_empty() {
        let store = Arc::new(MemoryStore::new());
        let viewer = store.add_profile("viewer@example.com");
        let id = store.add_caption("only", true);
        store.add_vote(id, viewer.id, VoteValue::Up);

        let browse = BrowseCaptions::new(store);
        let err = browse
            .voted_history(Some(&viewer), u64::MAX, u64::MAX)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NoData(_)));
    }

    #[tokio::test]
    async fn test_random_unvoted_scores_zero_when_votes_unreadable() {
        let store = Arc::new(MemoryStore::new());
        let viewer = store.add_profile("viewer@example.com");
        let other = store.add_profile("other@example.com");
        let id = store.add_caption("liked", true);
        store.add_vote(id, other.id, VoteValue::Up);
        store.fail_lookups(true);

        let browse = BrowseCaptions::new(store);
        let caption = browse.random_unvoted(Some(&viewer)).await.unwrap();
        assert_eq!(caption.id(), id);
        assert_eq!(caption.vote_score, 0);
    }

    #[tokio::test]
    async fn test_voted_history_empty() {
        let store = Arc::new(MemoryStore::new());
        let viewer = store.add_profile("viewer@example.com");
        let browse = BrowseCaptions::new(store);
        let err = browse.voted_history(Some(&viewer), 1, 20).await.unwrap_err();
        assert_eq!(err.user_message(), "You haven't voted on any captions yet!");
    }
}
