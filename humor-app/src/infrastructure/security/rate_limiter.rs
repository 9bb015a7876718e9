use dashmap::DashMap;
use humor_errors::AppError;
use std::sync::Arc;
use std::time::{Duration, Instant};
use uuid::Uuid;

const MAX_VOTES_PER_MINUTE: u32 = 30;
const MAX_VOTES_PER_HOUR: u32 = 600;
const CLEANUP_INTERVAL_SECS: u64 = 300;

const MINUTE: Duration = Duration::from_secs(60);
const HOUR: Duration = Duration::from_secs(3600);

#[derive(Clone)]
struct VoteRecord {
    minute_count: u32,
    hour_count: u32,
    minute_start: Instant,
    hour_start: Instant,
}

impl VoteRecord {
    fn starting(now: Instant) -> Self {
        Self {
            minute_count: 0,
            hour_count: 0,
            minute_start: now,
            hour_start: now,
        }
    }
}

/// Fixed-window vote throttle keyed by profile id.
#[derive(Clone)]
pub struct RateLimiter {
    votes: Arc<DashMap<Uuid, VoteRecord>>,
    last_cleanup: Arc<std::sync::Mutex<Instant>>,
    per_minute: u32,
    per_hour: u32,
}

impl RateLimiter {
    pub fn new() -> Self {
        Self::with_limits(MAX_VOTES_PER_MINUTE, MAX_VOTES_PER_HOUR)
    }

    pub fn with_limits(per_minute: u32, per_hour: u32) -> Self {
        Self {
            votes: Arc::new(DashMap::new()),
            last_cleanup: Arc::new(std::sync::Mutex::new(Instant::now())),
            per_minute,
            per_hour,
        }
    }

    pub fn check_vote(&self, profile_id: Uuid) -> Result<(), AppError> {
        self.check_vote_at(profile_id, Instant::now())
    }

    pub fn check_vote_at(&self, profile_id: Uuid, now: Instant) -> Result<(), AppError> {
        self.maybe_cleanup(now);

        let mut record = self
            .votes
            .entry(profile_id)
            .or_insert_with(|| VoteRecord::starting(now));

        if now.saturating_duration_since(record.minute_start) >= MINUTE {
            record.minute_count = 0;
            record.minute_start = now;
        }

        if now.saturating_duration_since(record.hour_start) >= HOUR {
            record.hour_count = 0;
            record.hour_start = now;
        }

        if record.minute_count >= self.per_minute {
            let elapsed = now.saturating_duration_since(record.minute_start);
            return Err(AppError::TooManyVotes(
                MINUTE.saturating_sub(elapsed).as_secs().max(1),
            ));
        }

        if record.hour_count >= self.per_hour {
            let elapsed = now.saturating_duration_since(record.hour_start);
            return Err(AppError::TooManyVotes(
                HOUR.saturating_sub(elapsed).as_secs().max(1),
            ));
        }

        record.minute_count += 1;
        record.hour_count += 1;

        Ok(())
    }

    fn maybe_cleanup(&self, now: Instant) {
        let Ok(mut last_cleanup) = self.last_cleanup.lock() else {
            return;
        };
        if now.saturating_duration_since(*last_cleanup) > Duration::from_secs(CLEANUP_INTERVAL_SECS)
        {
            self.votes
                .retain(|_, v| now.saturating_duration_since(v.hour_start) < HOUR);
            *last_cleanup = now;
        }
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new()
    }
}
