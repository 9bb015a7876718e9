mod caption;
mod caption_example;
mod history;
mod profile;
mod reconciler;
mod responses;
mod vote;
mod voting_queue;

pub use caption::{
    Caption, CaptionAuthor, CaptionDetails, CaptionImage, CaptionWithVotes, MISSING_CAPTION_TEXT,
};
pub use caption_example::CaptionExample;
pub use history::{PageWindow, VotedHistoryPage, DEFAULT_PER_PAGE};
pub use profile::{Profile, SessionUser};
pub use reconciler::{PendingVote, VoteReconciler, LOGIN_REQUIRED_MESSAGE, VOTE_ERROR_DISPLAY};
pub use responses::{CaptionLookup, VoteSubmission};
pub use vote::{next_vote, tally, CaptionVote, VoteState, VoteTransition, VoteValue, VoteWrite};
pub use voting_queue::{QueueEntry, QueuedVote, VotingQueue};
