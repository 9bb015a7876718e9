use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum AppError {
    #[error("You must be logged in")]
    NotAuthenticated,

    #[error("Could not find user profile")]
    ProfileNotFound,

    #[error("Error checking existing vote: {0}")]
    VoteLookupFailed(String),

    /// Carries the user-facing text for the write that failed
    /// (insert, update or delete).
    #[error("{0}")]
    VoteWriteFailed(String),

    #[error("Too many votes, wait {0} seconds")]
    TooManyVotes(u64),

    #[error("{0}")]
    NoData(String),

    #[error("Caption not found")]
    NotFound,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Sign-in failed: {0}")]
    Auth(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Openings of the messages `NoData` is built with.
const NO_DATA_PREFIXES: [&str; 3] = [
    "No public captions available",
    "You've voted on all ",
    "You haven't voted on any captions yet",
];

impl FromStr for AppError {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.starts_with("You must be logged in") {
            Ok(AppError::NotAuthenticated)
        } else if s.starts_with("Could not find user profile") {
            Ok(AppError::ProfileNotFound)
        } else if let Some(rest) = s.strip_prefix("Error checking existing vote: ") {
            Ok(AppError::VoteLookupFailed(rest.to_string()))
        } else if s.starts_with("Failed to") && s.ends_with("vote") {
            Ok(AppError::VoteWriteFailed(s.to_string()))
        } else if let Some(secs) = s
            .strip_prefix("Too many votes, wait ")
            .and_then(|rest| rest.strip_suffix(" seconds"))
            .and_then(|n| n.parse().ok())
        {
            Ok(AppError::TooManyVotes(secs))
        } else if NO_DATA_PREFIXES.iter().any(|p| s.starts_with(p)) {
            Ok(AppError::NoData(s.to_string()))
        } else if let Some(rest) = s.strip_prefix("Database error: ") {
            Ok(AppError::Database(rest.to_string()))
        } else if let Some(rest) = s.strip_prefix("Sign-in failed: ") {
            Ok(AppError::Auth(rest.to_string()))
        } else if s == "Caption not found" {
            Ok(AppError::NotFound)
        } else {
            Ok(AppError::Internal(s.to_string()))
        }
    }
}

impl AppError {
    pub fn user_message(&self) -> String {
        match self {
            Self::NotAuthenticated => "You must be logged in".to_string(),
            Self::ProfileNotFound => "Could not find user profile".to_string(),
            Self::VoteLookupFailed(_) => "Error checking existing vote".to_string(),
            Self::VoteWriteFailed(msg) => msg.clone(),
            Self::TooManyVotes(secs) => {
                format!("Too many votes. Try again in {} seconds.", secs)
            }
            Self::NoData(msg) => msg.clone(),
            Self::NotFound => "Failed to fetch caption".to_string(),
            Self::Database(msg) => format!("Database error: {}", msg),
            Self::Auth(_) => "Sign-in failed. Please try again.".to_string(),
            Self::Config(_) | Self::Internal(_) => {
                "Something went wrong. Please try again later.".to_string()
            }
        }
    }

    pub fn is_auth_required(&self) -> bool {
        matches!(self, Self::NotAuthenticated)
    }
}

#[cfg(feature = "ssr")]
mod ssr_impl {
    use super::AppError;
    use axum::http::StatusCode;
    use axum::response::{IntoResponse, Response};
    use axum::Json;

    #[derive(serde::Serialize)]
    struct ErrorResponse {
        message: String,
    }

    impl IntoResponse for AppError {
        fn into_response(self) -> Response {
            let status = match &self {
                AppError::NotAuthenticated => StatusCode::UNAUTHORIZED,
                AppError::ProfileNotFound | AppError::NotFound => StatusCode::NOT_FOUND,
                AppError::NoData(_) => StatusCode::NOT_FOUND,
                AppError::TooManyVotes(_) => StatusCode::TOO_MANY_REQUESTS,
                AppError::Auth(_) => StatusCode::BAD_GATEWAY,
                AppError::VoteLookupFailed(_)
                | AppError::VoteWriteFailed(_)
                | AppError::Database(_)
                | AppError::Config(_)
                | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            };
            let message = self.user_message();
            (status, Json(ErrorResponse { message })).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_trips_display() {
        let errors = [
            AppError::NotAuthenticated,
            AppError::ProfileNotFound,
            AppError::VoteLookupFailed("timeout".to_string()),
            AppError::VoteWriteFailed("Failed to remove vote".to_string()),
            AppError::Database("relation missing".to_string()),
            AppError::NotFound,
            AppError::TooManyVotes(42),
            AppError::NoData("You've voted on all 7 available captions!".to_string()),
            AppError::NoData("You haven't voted on any captions yet!".to_string()),
        ];
        for err in errors {
            let parsed: AppError = err.to_string().parse().unwrap();
            assert_eq!(parsed, err);
        }
    }

    #[test]
    fn test_unknown_message_is_internal() {
        let parsed: AppError = "boom".parse().unwrap();
        assert_eq!(parsed, AppError::Internal("boom".to_string()));
    }

    #[test]
    fn test_user_messages() {
        assert_eq!(
            AppError::VoteLookupFailed("io".to_string()).user_message(),
            "Error checking existing vote"
        );
        assert_eq!(
            AppError::NoData("You've voted on all 3 available captions!".to_string())
                .user_message(),
            "You've voted on all 3 available captions!"
        );
        assert!(AppError::NotAuthenticated.is_auth_required());
    }
}
