use chrono::{DateTime, Duration, Utc};

/// Failed-login lockout rules.
///
/// An account locks once `threshold` consecutive failures accumulate and
/// stays locked for `duration`. Expiry is evaluated lazily against the clock
/// at the next login attempt, so no background job is involved.
#[derive(Debug, Clone)]
pub struct LockoutPolicy {
    pub threshold: u32,
    pub duration: Duration,
}

impl Default for LockoutPolicy {
    fn default() -> Self {
        Self {
            threshold: 5,
            duration: Duration::minutes(15),
        }
    }
}

impl LockoutPolicy {
    /// Decides what one more failed attempt does to an account that already
    /// has `failed_attempts` on record.
    ///
    /// Reaching the threshold locks the account and resets the counter, so
    /// once the lock expires the account gets a fresh allowance of attempts.
    pub fn apply_failure(&self, failed_attempts: i32, now: DateTime<Utc>) -> FailureOutcome {
        let next = failed_attempts.saturating_add(1);
        if next >= self.threshold as i32 {
            FailureOutcome::LockedUntil(now + self.duration)
        } else {
            FailureOutcome::Count(next)
        }
    }

    /// [`Self::apply_failure`] expressed as a state transition, for stores
    /// that hold a whole [`LockoutState`] per account.
    pub fn next_state(&self, current: LockoutState, now: DateTime<Utc>) -> LockoutState {
        match self.apply_failure(current.failed_attempts, now) {
            FailureOutcome::Count(failed_attempts) => LockoutState {
                failed_attempts,
                lockout_expiry: current.lockout_expiry,
            },
            FailureOutcome::LockedUntil(expiry) => LockoutState {
                failed_attempts: 0,
                lockout_expiry: Some(expiry),
            },
        }
    }
}

/// What a recorded failure did to the account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureOutcome {
    /// Below the threshold. The new consecutive-failure count.
    Count(i32),
    /// Threshold reached. The account is locked until the given instant.
    LockedUntil(DateTime<Utc>),
}

/// Lockout bookkeeping as persisted on an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockoutState {
    pub failed_attempts: i32,
    pub lockout_expiry: Option<DateTime<Utc>>,
}

impl LockoutState {
    pub fn is_locked(&self, now: DateTime<Utc>) -> bool {
        self.lockout_expiry.is_some_and(|expiry| expiry > now)
    }
}
