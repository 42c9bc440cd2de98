use std::time::Duration;

use bevy::prelude::*;
use constants::timing::{INPUT_THROTTLE, SWIPE_THRESHOLD_PX};

/// Normalises wheel and touch gestures into single section steps.
///
/// The time-based throttle is kept independently of the controller's own
/// transition flag; both must be clear for a gesture to count.
#[derive(Resource, Debug, Clone, Default)]
pub struct NavigationInput {
    last_trigger: Option<Duration>,
    touch_start_y: Option<f32>,
}

impl NavigationInput {
    fn throttled(&self, now: Duration) -> bool {
        self.last_trigger
            .is_some_and(|last| now.saturating_sub(last) < INPUT_THROTTLE)
    }

    /// `delta_y` follows the browser convention: positive scrolls down.
    pub fn wheel(&mut self, delta_y: f32, now: Duration, busy: bool) -> Option<i32> {
        if delta_y == 0.0 || self.throttled(now) || busy {
            return None;
        }
        self.last_trigger = Some(now);
        Some(if delta_y > 0.0 { 1 } else { -1 })
    }

    pub fn touch_start(&mut self, y: f32) {
        self.touch_start_y = Some(y);
    }

    pub fn touch_cancel(&mut self) {
        self.touch_start_y = None;
    }

    /// A swipe upward (finger moving toward the top) advances to the next section.
    pub fn touch_end(&mut self, y: f32, now: Duration, busy: bool) -> Option<i32> {
        let start = self.touch_start_y.take()?;
        if self.throttled(now) || busy {
            return None;
        }

        let distance = start - y;
        if distance.abs() <= SWIPE_THRESHOLD_PX {
            return None;
        }
        self.last_trigger = Some(now);
        Some(if distance > 0.0 { 1 } else { -1 })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wheel_sign_maps_to_direction() {
        let mut input = NavigationInput::default();
        assert_eq!(input.wheel(3.0, Duration::from_secs(1), false), Some(1));
        assert_eq!(input.wheel(-3.0, Duration::from_secs(2), false), Some(-1));
        assert_eq!(input.wheel(0.0, Duration::from_secs(3), false), None);
    }

    #[test]
    fn throttle_suppresses_bursts() {
        let mut input = NavigationInput::default();
        let start = Duration::from_secs(1);
        assert_eq!(input.wheel(10.0, start, false), Some(1));
        assert_eq!(input.wheel(10.0, start + Duration::from_millis(200), false), None);
        assert_eq!(input.wheel(10.0, start + Duration::from_millis(499), false), None);
        assert_eq!(input.wheel(10.0, start + Duration::from_millis(500), false), Some(1));
    }

    #[test]
    fn busy_controller_blocks_even_after_throttle() {
        let mut input = NavigationInput::default();
        assert_eq!(input.wheel(10.0, Duration::from_secs(4), true), None);
        assert_eq!(input.wheel(10.0, Duration::from_secs(4), false), Some(1));
    }

    #[test]
    fn swipe_needs_more_than_threshold() {
        let mut input = NavigationInput::default();
        let now = Duration::from_secs(1);

        input.touch_start(300.0);
        assert_eq!(input.touch_end(260.0, now, false), None);

        input.touch_start(300.0);
        assert_eq!(input.touch_end(250.0, now, false), None);

        input.touch_start(300.0);
        assert_eq!(input.touch_end(240.0, now, false), Some(1));

        input.touch_start(100.0);
        assert_eq!(
            input.touch_end(200.0, now + Duration::from_secs(1), false),
            Some(-1)
        );
    }

    #[test]
    fn touch_end_without_start_is_ignored() {
        let mut input = NavigationInput::default();
        assert_eq!(input.touch_end(10.0, Duration::from_secs(1), false), None);
        input.touch_start(400.0);
        input.touch_cancel();
        assert_eq!(input.touch_end(100.0, Duration::from_secs(1), false), None);
    }
}
