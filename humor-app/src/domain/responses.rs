use super::caption::CaptionWithVotes;
use humor_errors::AppError;
use serde::{Deserialize, Serialize};

/// Outcome of `submit_vote` as seen by the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteSubmission {
    pub success: bool,
    pub error: Option<String>,
}

impl VoteSubmission {
    pub fn ok() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    pub fn failed(err: &AppError) -> Self {
        let message = match err {
            AppError::NotAuthenticated => "You must be logged in to vote".to_string(),
            other => other.user_message(),
        };
        Self {
            success: false,
            error: Some(message),
        }
    }
}

impl From<Result<(), AppError>> for VoteSubmission {
    fn from(result: Result<(), AppError>) -> Self {
        match result {
            Ok(()) => Self::ok(),
            Err(e) => Self::failed(&e),
        }
    }
}

/// A single caption fetch: either a caption or a user-facing reason why not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptionLookup {
    pub caption: Option<CaptionWithVotes>,
    pub error: Option<String>,
}

impl From<Result<CaptionWithVotes, AppError>> for CaptionLookup {
    fn from(result: Result<CaptionWithVotes, AppError>) -> Self {
        match result {
            Ok(caption) => Self {
                caption: Some(caption),
                error: None,
            },
            Err(e) => Self {
                caption: None,
                error: Some(e.user_message()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vote_submission_messages() {
        let s = VoteSubmission::from(Err(AppError::NotAuthenticated));
        assert!(!s.success);
        assert_eq!(s.error.as_deref(), Some("You must be logged in to vote"));

        let s = VoteSubmission::from(Err(AppError::VoteWriteFailed(
            "Failed to update vote".to_string(),
        )));
        assert_eq!(s.error.as_deref(), Some("Failed to update vote"));

        assert_eq!(VoteSubmission::from(Ok(())), VoteSubmission::ok());
    }

    #[test]
    fn test_caption_lookup_error() {
        let lookup = CaptionLookup::from(Err(AppError::NoData(
            "You've voted on all 2 available captions!".to_string(),
        )));
        assert!(lookup.caption.is_none());
        assert_eq!(
            lookup.error.as_deref(),
            Some("You've voted on all 2 available captions!")
        );
    }
}
