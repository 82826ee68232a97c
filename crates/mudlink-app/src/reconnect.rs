//! Reconnect scheduling.
//!
//! The policy decides, on every socket close, whether and when to try again.
//! A [`RetryState`] counts attempts since the last successful open.

use std::time::Duration;

/// Delay policy applied after a socket closes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconnectPolicy {
    /// Retry forever after the same delay.
    Fixed {
        /// Delay before every attempt.
        delay: Duration,
    },
    /// Retry after `step * attempt`, giving up after `max_attempts`.
    Linear {
        /// Delay added per attempt.
        step: Duration,
        /// Attempts before giving up for good.
        max_attempts: u32,
    },
}

impl Default for ReconnectPolicy {
    fn default() -> Self {
        Self::Linear { step: Duration::from_secs(3), max_attempts: 5 }
    }
}

/// Outcome of a close event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    /// Schedule exactly one reconnect after `delay`.
    Retry {
        /// Delay before the attempt.
        delay: Duration,
    },
    /// Stop reconnecting.
    GiveUp {
        /// True the first time the cap is hit, so the notice is shown once.
        first: bool,
    },
}

/// Attempts made since the last successful open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RetryState {
    attempts: u32,
    gave_up: bool,
}

impl RetryState {
    /// Decide what to do after a close.
    pub fn on_close(&mut self, policy: ReconnectPolicy) -> RetryDecision {
        match policy {
            ReconnectPolicy::Fixed { delay } => {
                self.attempts = self.attempts.saturating_add(1);
                RetryDecision::Retry { delay }
            },
            ReconnectPolicy::Linear { step, max_attempts } => {
                if self.attempts < max_attempts {
                    self.attempts += 1;
                    RetryDecision::Retry { delay: step.saturating_mul(self.attempts) }
                } else {
                    let first = !self.gave_up;
                    self.gave_up = true;
                    RetryDecision::GiveUp { first }
                }
            },
        }
    }

    /// Forget previous attempts (socket opened, or manual reconnect).
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Attempts since the last reset.
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// True once the linear cap has been reached.
    pub fn has_given_up(&self) -> bool {
        self.gave_up
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_delay_grows_then_gives_up_once() {
        let policy = ReconnectPolicy::Linear { step: Duration::from_secs(3), max_attempts: 2 };
        let mut state = RetryState::default();

        assert_eq!(state.on_close(policy), RetryDecision::Retry { delay: Duration::from_secs(3) });
        assert_eq!(state.on_close(policy), RetryDecision::Retry { delay: Duration::from_secs(6) });
        assert_eq!(state.on_close(policy), RetryDecision::GiveUp { first: true });
        assert_eq!(state.on_close(policy), RetryDecision::GiveUp { first: false });
    }

    #[test]
    fn fixed_never_gives_up() {
        let policy = ReconnectPolicy::Fixed { delay: Duration::from_secs(5) };
        let mut state = RetryState::default();
        for _ in 0..100 {
            assert_eq!(state.on_close(policy), RetryDecision::Retry { delay: Duration::from_secs(5) });
        }
        assert!(!state.has_given_up());
    }

    #[test]
    fn reset_restores_budget() {
        let policy = ReconnectPolicy::Linear { step: Duration::from_secs(1), max_attempts: 1 };
        let mut state = RetryState::default();
        let _ = state.on_close(policy);
        let _ = state.on_close(policy);
        assert!(state.has_given_up());

        state.reset();
        assert_eq!(state.attempts(), 0);
        assert_eq!(state.on_close(policy), RetryDecision::Retry { delay: Duration::from_secs(1) });
    }
}
