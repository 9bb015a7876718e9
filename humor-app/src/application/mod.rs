mod browse_captions;
mod store;
mod submit_vote;

#[cfg(test)]
pub(crate) mod memory_store;

pub use browse_captions::{choose_unvoted, BrowseCaptions};
pub use store::ContentStore;
pub use submit_vote::SubmitVote;
