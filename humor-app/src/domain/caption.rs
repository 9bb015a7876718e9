use super::vote::{VoteState, VoteValue};
use serde::{Deserialize, Serialize};

pub const MISSING_CAPTION_TEXT: &str = "(No caption text)";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Caption {
    pub id: uuid::Uuid,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub content: Option<String>,
    pub is_public: bool,
    pub profile_id: Option<uuid::Uuid>,
    pub image_id: Option<uuid::Uuid>,
    pub is_featured: bool,
    /// Cached counter maintained elsewhere. Not derived from votes.
    pub like_count: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptionAuthor {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
}

impl CaptionAuthor {
    pub fn display_name(&self) -> Option<String> {
        let name = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" ");
        if name.is_empty() {
            self.email.clone()
        } else {
            Some(name)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptionImage {
    pub url: Option<String>,
    pub description: Option<String>,
}

/// A caption with its one-to-one associations already resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptionDetails {
    pub caption: Caption,
    pub author: Option<CaptionAuthor>,
    pub image: Option<CaptionImage>,
}

impl CaptionDetails {
    pub fn text(&self) -> &str {
        self.caption
            .content
            .as_deref()
            .filter(|c| !c.is_empty())
            .unwrap_or(MISSING_CAPTION_TEXT)
    }

    pub fn image_url(&self) -> Option<&str> {
        self.image.as_ref().and_then(|i| i.url.as_deref())
    }

    pub fn image_alt(&self) -> &str {
        self.image
            .as_ref()
            .and_then(|i| i.description.as_deref())
            .unwrap_or("Caption image")
    }
}

/// What the voting views render: details plus score and the viewer's vote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptionWithVotes {
    pub details: CaptionDetails,
    pub vote_score: i64,
    pub user_vote: Option<VoteValue>,
}

impl CaptionWithVotes {
    pub fn id(&self) -> uuid::Uuid {
        self.details.caption.id
    }

    pub fn vote_state(&self) -> VoteState {
        VoteState::new(self.user_vote, self.vote_score)
    }
}
