use super::vote::{VoteState, VoteValue};
use chrono::{DateTime, Utc};
use std::time::Duration;

/// How long a vote error stays on screen before it clears itself.
pub const VOTE_ERROR_DISPLAY: Duration = Duration::from_secs(3);

pub const LOGIN_REQUIRED_MESSAGE: &str = "Please log in to vote";

/// Handle for one optimistic vote whose write has not come back yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingVote {
    ticket: u64,
    pub caption_id: uuid::Uuid,
    pub action: VoteValue,
    pub previous: VoteState,
}

impl PendingVote {
    pub fn ticket(&self) -> u64 {
        self.ticket
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct VoteError {
    message: String,
    raised_at: DateTime<Utc>,
}

/// Displayed vote state for one caption, kept in step with in-flight writes.
///
/// `begin` applies the transition straight away and hands back a
/// [`PendingVote`]. The caller sends the write and later calls `confirm` or
/// `reject` with that handle. A rejection restores the state captured at
/// `begin` and raises an error that expires after [`VOTE_ERROR_DISPLAY`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoteReconciler {
    caption_id: uuid::Uuid,
    state: VoteState,
    in_flight: Vec<u64>,
    next_ticket: u64,
    error: Option<VoteError>,
}

impl VoteReconciler {
    pub fn new(caption_id: uuid::Uuid, initial: VoteState) -> Self {
        Self {
            caption_id,
            state: initial,
            in_flight: Vec::new(),
            next_ticket: 0,
            error: None,
        }
    }

    pub fn caption_id(&self) -> uuid::Uuid {
        self.caption_id
    }

    pub fn state(&self) -> VoteState {
        self.state
    }

    pub fn is_pending(&self) -> bool {
        !self.in_flight.is_empty()
    }

    pub fn begin(&mut self, action: VoteValue) -> PendingVote {
        let previous = self.state;
        self.state = previous.transition(action).next;
        self.error = None;

        let ticket = self.next_ticket;
        self.next_ticket += 1;
        self.in_flight.push(ticket);

        PendingVote {
            ticket,
            caption_id: self.caption_id,
            action,
            previous,
        }
    }

    pub fn confirm(&mut self, pending: PendingVote) {
        self.in_flight.retain(|t| *t != pending.ticket);
    }

    pub fn reject(&mut self, pending: PendingVote, message: impl Into<String>, now: DateTime<Utc>) {
        self.in_flight.retain(|t| *t != pending.ticket);
        self.state = pending.previous;
        self.raise(message, now);
    }

    /// Settles a pending vote from the server's `(success, error)` answer.
    pub fn settle(
        &mut self,
        pending: PendingVote,
        outcome: &super::VoteSubmission,
        now: DateTime<Utc>,
    ) {
        if outcome.success {
            self.confirm(pending);
        } else {
            let message = outcome
                .error
                .clone()
                .unwrap_or_else(|| "Failed to submit vote".to_string());
            self.reject(pending, message, now);
        }
    }

    /// Shows an error without touching the vote, e.g. when signed out.
    pub fn refuse(&mut self, message: impl Into<String>, now: DateTime<Utc>) {
        self.raise(message, now);
    }

    pub fn error(&self, now: DateTime<Utc>) -> Option<&str> {
        self.error
            .as_ref()
            .filter(|e| !expired(e.raised_at, now))
            .map(|e| e.message.as_str())
    }

    /// Drops the error once its display time is over. Returns true if it did.
    pub fn clear_expired(&mut self, now: DateTime<Utc>) -> bool {
        match &self.error {
            Some(e) if expired(e.raised_at, now) => {
                self.error = None;
                true
            }
            _ => false,
        }
    }

    fn raise(&mut self, message: impl Into<String>, now: DateTime<Utc>) {
        self.error = Some(VoteError {
            message: message.into(),
            raised_at: now,
        });
    }
}

fn expired(raised_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    (now - raised_at)
        .to_std()
        .map(|elapsed| elapsed >= VOTE_ERROR_DISPLAY)
        .unwrap_or(false)
}
