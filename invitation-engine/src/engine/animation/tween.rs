use std::time::Duration;

use super::ease::{Ease, lerp};
use crate::error::{InvitationError, InvitationResult};

#[derive(Clone, Copy, Debug)]
pub struct Tween {
    from: f32,
    to: f32,
    duration: Duration,
    ease: Ease,
    elapsed: Duration,
}

impl Tween {
    pub fn new(from: f32, to: f32, duration: Duration, ease: Ease) -> InvitationResult<Self> {
        if !from.is_finite() || !to.is_finite() {
            return Err(InvitationError::tween(format!(
                "non-finite endpoints {from} -> {to}"
            )));
        }
        if duration.is_zero() {
            return Err(InvitationError::tween("zero duration"));
        }
        Ok(Self {
            from,
            to,
            duration,
            ease,
            elapsed: Duration::ZERO,
        })
    }

    /// Advance by `dt` and return the new value.
    pub fn advance(&mut self, dt: Duration) -> f32 {
        self.elapsed = (self.elapsed + dt).min(self.duration);
        self.value()
    }

    pub fn value(&self) -> f32 {
        let t = self.elapsed.as_secs_f32() / self.duration.as_secs_f32();
        lerp(self.from, self.to, self.ease.apply(t))
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }
}

/// Opacity of a fade that starts at `start` and lasts `duration`,
/// sampled at timeline position `at`.
pub fn fade_at(at: Duration, start: Duration, duration: Duration, ease: Ease) -> f32 {
    if at <= start {
        return 0.0;
    }
    let t = (at - start).as_secs_f32() / duration.as_secs_f32().max(f32::EPSILON);
    ease.apply(t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tween_lands_on_target() {
        let mut tween = Tween::new(0.0, 300.0, Duration::from_millis(1500), Ease::OutCubic)
            .expect("valid tween");
        let mut last = 0.0;
        while !tween.is_finished() {
            let value = tween.advance(Duration::from_millis(16));
            assert!(value >= last);
            last = value;
        }
        assert_eq!(tween.value(), 300.0);
    }

    #[test]
    fn tween_rejects_bad_input() {
        assert!(Tween::new(f32::NAN, 1.0, Duration::from_secs(1), Ease::Linear).is_err());
        assert!(Tween::new(0.0, f32::INFINITY, Duration::from_secs(1), Ease::Linear).is_err());
        assert!(Tween::new(0.0, 1.0, Duration::ZERO, Ease::Linear).is_err());
    }

    #[test]
    fn fade_respects_start_offset() {
        let start = Duration::from_millis(400);
        let duration = Duration::from_millis(300);
        assert_eq!(fade_at(Duration::from_millis(300), start, duration, Ease::Linear), 0.0);
        let mid = fade_at(Duration::from_millis(550), start, duration, Ease::Linear);
        assert!((mid - 0.5).abs() < 1e-4);
        assert_eq!(fade_at(Duration::from_secs(2), start, duration, Ease::Linear), 1.0);
    }
}
