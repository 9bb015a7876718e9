mod captions;
mod gated_content;
mod home;
mod voted_history;

pub use captions::{
    get_caption_by_id, get_random_unvoted_caption, CaptionsPage, GetCaptionByIdFn,
    GetRandomUnvotedCaptionFn,
};
pub use gated_content::{list_caption_examples, GatedContentPage, ListCaptionExamplesFn};
pub use home::HomePage;
pub use voted_history::{get_voted_caption_history, GetVotedHistoryFn, VotedHistory};
