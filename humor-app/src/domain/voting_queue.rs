use super::caption::CaptionWithVotes;
use super::vote::{VoteState, VoteValue};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueEntry {
    pub caption: CaptionWithVotes,
    pub state: VoteState,
}

/// Undo record for a vote applied to a queue entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueuedVote {
    pub index: usize,
    pub caption_id: uuid::Uuid,
    pub action: VoteValue,
    pub previous: VoteState,
}

/// Browsing history of the captions page: captions already shown, the one in
/// view, and at most one caption fetched ahead of time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VotingQueue {
    entries: Vec<QueueEntry>,
    current: usize,
    preloaded: Option<CaptionWithVotes>,
    /// Set when a fetch ahead came back with nothing new for the current end
    /// of history. Cleared once the view moves.
    preload_exhausted: bool,
}

impl VotingQueue {
    pub fn new(initial: Option<CaptionWithVotes>) -> Self {
        let mut queue = Self::default();
        if let Some(caption) = initial {
            queue.entries.push(entry(caption));
        }
        queue
    }

    pub fn current(&self) -> Option<&QueueEntry> {
        self.entries.get(self.current)
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn can_go_back(&self) -> bool {
        self.current > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.current + 1 < self.entries.len()
    }

    pub fn is_at_end(&self) -> bool {
        !self.entries.is_empty() && self.current + 1 == self.entries.len()
    }

    pub fn go_back(&mut self) -> bool {
        if self.can_go_back() {
            self.current -= 1;
            self.preload_exhausted = false;
            true
        } else {
            false
        }
    }

    pub fn go_forward(&mut self) -> bool {
        if self.can_go_forward() {
            self.current += 1;
            self.preload_exhausted = false;
            true
        } else {
            false
        }
    }

    /// Toggles `action` on the caption in view.
    pub fn apply_vote(&mut self, action: VoteValue) -> Option<QueuedVote> {
        let index = self.current;
        let entry = self.entries.get_mut(index)?;
        let previous = entry.state;
        entry.state = previous.transition(action).next;
        Some(QueuedVote {
            index,
            caption_id: entry.caption.id(),
            action,
            previous,
        })
    }

    pub fn revert_vote(&mut self, vote: QueuedVote) {
        if let Some(entry) = self.entries.get_mut(vote.index) {
            if entry.caption.id() == vote.caption_id {
                entry.state = vote.previous;
            }
        }
    }

    /// True when the view sits on the last entry, nothing is fetched ahead
    /// and the last fetch ahead did not come back empty-handed.
    pub fn needs_preload(&self) -> bool {
        (self.entries.is_empty() || self.is_at_end())
            && self.preloaded.is_none()
            && !self.preload_exhausted
    }

    pub fn preloaded(&self) -> Option<&CaptionWithVotes> {
        self.preloaded.as_ref()
    }

    pub fn contains(&self, caption_id: uuid::Uuid) -> bool {
        self.entries.iter().any(|e| e.caption.id() == caption_id)
    }

    /// Stores the caption fetched ahead. Captions already in history are
    /// ignored since a random fetch can return the one still in view; that
    /// also stops further preloading until the view moves.
    pub fn set_preloaded(&mut self, caption: CaptionWithVotes) -> bool {
        if self.contains(caption.id()) {
            self.preload_exhausted = true;
            return false;
        }
        self.preloaded = Some(caption);
        true
    }

    pub fn take_preloaded(&mut self) -> Option<CaptionWithVotes> {
        self.preloaded.take()
    }

    /// Appends a freshly loaded caption and moves the view onto it.
    pub fn push(&mut self, caption: CaptionWithVotes) {
        self.entries.push(entry(caption));
        self.current = self.entries.len() - 1;
        self.preload_exhausted = false;
    }
}

fn entry(caption: CaptionWithVotes) -> QueueEntry {
    let state = caption.vote_state();
    QueueEntry { caption, state }
}
