mod caption_card;
mod error_display;
mod error_flash;
mod expandable_text;
mod loading_spinner;
mod require_login;
mod vote_controls;

pub use caption_card::CaptionCard;
pub use error_display::{server_error_message, ErrorDisplay};
pub use error_flash::ErrorFlash;
pub use expandable_text::{truncate_chars, ExpandableText, TRUNCATE_AT};
pub use loading_spinner::LoadingSpinner;
pub use require_login::RequireLogin;
pub use vote_controls::{
    get_user_vote, submission_from, submit_vote, GetUserVoteFn, SubmitVoteFn, VoteControls,
};
