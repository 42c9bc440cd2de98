use std::time::Duration;

use constants::timing::{
    HANDOFF_BACKOFF, HANDOFF_CHECK_INTERVAL, HANDOFF_MAX_ATTEMPTS, HANDOFF_TOLERANCE_PX,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CorrectionEnd {
    /// The container sits within tolerance of the target.
    Settled,
    /// The attempt budget ran out; the tween still finishes the job.
    Exhausted,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CorrectionStep {
    /// Write the target now and measure again after `check_after`.
    Write { check_after: Duration },
    Done(CorrectionEnd),
}

/// Bounded retry with backoff for the instant scroll-position writes.
#[derive(Debug, Clone, Copy)]
pub struct CorrectionPolicy {
    pub max_attempts: u32,
    pub interval: Duration,
    pub backoff: f32,
    pub tolerance: f32,
}

impl Default for CorrectionPolicy {
    fn default() -> Self {
        Self {
            max_attempts: HANDOFF_MAX_ATTEMPTS,
            interval: HANDOFF_CHECK_INTERVAL,
            backoff: HANDOFF_BACKOFF,
            tolerance: HANDOFF_TOLERANCE_PX,
        }
    }
}

impl CorrectionPolicy {
    /// Decide what to do given the writes made so far and the distance from
    /// the target measured after the last one (`None` before any write).
    pub fn next(&self, attempts: u32, last_error: Option<f32>) -> CorrectionStep {
        if last_error.is_some_and(|error| error.abs() <= self.tolerance) {
            return CorrectionStep::Done(CorrectionEnd::Settled);
        }
        if attempts >= self.max_attempts {
            return CorrectionStep::Done(CorrectionEnd::Exhausted);
        }
        CorrectionStep::Write {
            check_after: self.interval.mul_f32(self.backoff.powi(attempts as i32)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_write_is_immediate_with_base_interval() {
        let policy = CorrectionPolicy::default();
        assert_eq!(
            policy.next(0, None),
            CorrectionStep::Write {
                check_after: HANDOFF_CHECK_INTERVAL
            }
        );
    }

    #[test]
    fn close_enough_settles() {
        let policy = CorrectionPolicy::default();
        assert_eq!(
            policy.next(1, Some(12.0)),
            CorrectionStep::Done(CorrectionEnd::Settled)
        );
        assert_eq!(
            policy.next(1, Some(-50.0)),
            CorrectionStep::Done(CorrectionEnd::Settled)
        );
    }

    #[test]
    fn backoff_grows_until_budget_is_spent() {
        let policy = CorrectionPolicy::default();
        let mut last_wait = Duration::ZERO;
        for attempts in 0..policy.max_attempts {
            match policy.next(attempts, Some(400.0)) {
                CorrectionStep::Write { check_after } => {
                    assert!(check_after > last_wait);
                    last_wait = check_after;
                }
                other => panic!("unexpected {other:?} at attempt {attempts}"),
            }
        }
        assert_eq!(
            policy.next(policy.max_attempts, Some(400.0)),
            CorrectionStep::Done(CorrectionEnd::Exhausted)
        );
    }
}
