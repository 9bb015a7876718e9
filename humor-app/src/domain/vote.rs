use serde::{Deserialize, Serialize};

/// A single vote direction. Stored as `+1` / `-1` in `caption_votes.vote_value`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i16", into = "i16")]
pub enum VoteValue {
    Up,
    Down,
}

impl VoteValue {
    pub fn as_i16(self) -> i16 {
        match self {
            Self::Up => 1,
            Self::Down => -1,
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Up => "Upvote",
            Self::Down => "Downvote",
        }
    }
}

impl From<VoteValue> for i16 {
    fn from(value: VoteValue) -> Self {
        value.as_i16()
    }
}

impl From<VoteValue> for i64 {
    fn from(value: VoteValue) -> Self {
        i64::from(value.as_i16())
    }
}

impl TryFrom<i16> for VoteValue {
    type Error = String;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Up),
            -1 => Ok(Self::Down),
            other => Err(format!("invalid vote value: {}", other)),
        }
    }
}

/// What a viewer currently sees for one caption: their own vote and the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VoteState {
    pub vote: Option<VoteValue>,
    pub score: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoteTransition {
    pub next: VoteState,
    pub delta: i64,
}

impl VoteState {
    pub fn new(vote: Option<VoteValue>, score: i64) -> Self {
        Self { vote, score }
    }

    /// Applies a user action. Repeating the current vote withdraws it,
    /// the opposite vote swings the score by two.
    pub fn transition(self, action: VoteValue) -> VoteTransition {
        let (vote, delta) = next_vote(self.vote, action);
        VoteTransition {
            next: VoteState {
                vote,
                score: self.score + delta,
            },
            delta,
        }
    }
}

/// Next displayed vote and the score delta for `action` on top of `current`.
pub fn next_vote(current: Option<VoteValue>, action: VoteValue) -> (Option<VoteValue>, i64) {
    let a = i64::from(action);
    match current {
        None => (Some(action), a),
        Some(v) if v == action => (None, -a),
        Some(_) => (Some(action), 2 * a),
    }
}

/// Sum of all vote values for a caption.
pub fn tally<I>(votes: I) -> i64
where
    I: IntoIterator<Item = VoteValue>,
{
    votes.into_iter().map(i64::from).sum()
}

/// A stored vote row as the write path needs to see it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptionVote {
    pub id: uuid::Uuid,
    pub caption_id: uuid::Uuid,
    pub profile_id: uuid::Uuid,
    pub value: VoteValue,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub modified_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// The single store write that realises a vote action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteWrite {
    Insert(VoteValue),
    Update { vote_id: uuid::Uuid, value: VoteValue },
    Withdraw { vote_id: uuid::Uuid },
}

impl VoteWrite {
    pub fn plan(existing: Option<&CaptionVote>, action: VoteValue) -> Self {
        match existing {
            Some(vote) if vote.value == action => Self::Withdraw { vote_id: vote.id },
            Some(vote) => Self::Update {
                vote_id: vote.id,
                value: action,
            },
            None => Self::Insert(action),
        }
    }

    pub fn failure_message(&self) -> &'static str {
        match self {
            Self::Insert(_) => "Failed to submit vote",
            Self::Update { .. } => "Failed to update vote",
            Self::Withdraw { .. } => "Failed to remove vote",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    #[test]
    fn test_new_vote_adds_action() {
        let t = VoteState::new(None, 5).transition(VoteValue::Up);
        assert_eq!(t.next, VoteState::new(Some(VoteValue::Up), 6));
        assert_eq!(t.delta, 1);
    }

    #[test]
    fn test_same_vote_withdraws() {
        let t = VoteState::new(Some(VoteValue::Up), 5).transition(VoteValue::Up);
        assert_eq!(t.next, VoteState::new(None, 4));
        assert_eq!(t.delta, -1);
    }

    #[test]
    fn test_opposite_vote_swings_by_two() {
        let t = VoteState::new(Some(VoteValue::Up), 5).transition(VoteValue::Down);
        assert_eq!(t.next, VoteState::new(Some(VoteValue::Down), 3));
        assert_eq!(t.delta, -2);

        let t = VoteState::new(Some(VoteValue::Down), 0).transition(VoteValue::Up);
        assert_eq!(t.next, VoteState::new(Some(VoteValue::Up), 2));
    }

    #[test]
    fn test_repeated_action_toggles() {
        for action in [VoteValue::Up, VoteValue::Down] {
            let mut state = VoteState::new(None, 10);
            for n in 1..=9 {
                state = state.transition(action).next;
                if n % 2 == 1 {
                    assert_eq!(state.vote, Some(action));
                    assert_eq!(state.score, 10 + i64::from(action));
                } else {
                    assert_eq!(state.vote, None);
                    assert_eq!(state.score, 10);
                }
            }
        }
    }

    #[test]
    fn test_score_is_net_of_deltas() {
        let actions = [
            VoteValue::Up,
            VoteValue::Down,
            VoteValue::Down,
            VoteValue::Up,
            VoteValue::Up,
            VoteValue::Down,
            VoteValue::Up,
        ];
        let start = VoteState::new(None, -3);
        let mut state = start;
        let mut applied = 0;
        for action in actions {
            let t = state.transition(action);
            applied += t.delta;
            state = t.next;
        }
        assert_eq!(state.score, start.score + applied);
        // Only the viewer's own vote ever moves the score, so the
        // net effect is bounded by one vote either way.
        assert_eq!(state.score - start.score, state.vote.map(i64::from).unwrap_or(0));
    }

    #[test]
    fn test_vote_value_serde_as_integer() {
        assert_eq!(serde_json::to_string(&VoteValue::Down).unwrap(), "-1");
        let v: VoteValue = serde_json::from_str("1").unwrap();
        assert_eq!(v, VoteValue::Up);
        assert!(serde_json::from_str::<VoteValue>("0").is_err());
    }

    #[test]
    fn test_tally() {
        assert_eq!(tally([VoteValue::Up, VoteValue::Up, VoteValue::Down]), 1);
        assert_eq!(tally(Vec::new()), 0);
    }

    fn stored(value: VoteValue) -> CaptionVote {
        CaptionVote {
            id: Uuid::new_v4(),
            caption_id: Uuid::new_v4(),
            profile_id: Uuid::new_v4(),
            value,
            created_at: Utc::now(),
            modified_at: None,
        }
    }

    #[test]
    fn test_write_plan() {
        assert_eq!(
            VoteWrite::plan(None, VoteValue::Down),
            VoteWrite::Insert(VoteValue::Down)
        );

        let existing = stored(VoteValue::Up);
        assert_eq!(
            VoteWrite::plan(Some(&existing), VoteValue::Up),
            VoteWrite::Withdraw {
                vote_id: existing.id
            }
        );
        assert_eq!(
            VoteWrite::plan(Some(&existing), VoteValue::Down),
            VoteWrite::Update {
                vote_id: existing.id,
                value: VoteValue::Down
            }
        );
    }
}
