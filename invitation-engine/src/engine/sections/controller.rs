use std::time::Duration;

use bevy::prelude::*;
use constants::render_settings::{SECTION_Z_BACK, SECTION_Z_FRONT};
use constants::timing::{
    INTRO_DELAY, INTRO_FADE, INTRO_STAGGER, SECTION_FADE, SECTION_FADE_IN_AT, SECTION_STAGGER,
    SECTION_SWAP_AT,
};

use crate::engine::animation::ease::Ease;
use crate::engine::animation::tween::fade_at;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionPhase {
    Idle { current: usize },
    Transitioning { from: usize, to: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    Transitioning,
    AlreadyCurrent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeOutcome {
    Started { from: usize, to: usize },
    Ignored(IgnoreReason),
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Transition {
    from: usize,
    to: usize,
    elapsed: Duration,
}

/// Section state machine. `counts[i]` is the number of fade-marked elements
/// in section `i`; element order drives the stagger.
#[derive(Resource, Debug, Clone)]
pub struct SectionController {
    counts: Vec<usize>,
    current: usize,
    transition: Option<Transition>,
    intro_elapsed: Duration,
}

impl SectionController {
    pub fn new(counts: Vec<usize>) -> Self {
        let counts = if counts.is_empty() { vec![0] } else { counts };
        Self {
            counts,
            current: 0,
            transition: None,
            intro_elapsed: Duration::ZERO,
        }
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn is_transitioning(&self) -> bool {
        self.transition.is_some()
    }

    pub fn phase(&self) -> SectionPhase {
        match self.transition {
            Some(Transition { from, to, .. }) => SectionPhase::Transitioning { from, to },
            None => SectionPhase::Idle {
                current: self.current,
            },
        }
    }

    /// Start a transition to `target`, clamped into range. Requests that
    /// arrive mid-transition are dropped, not queued.
    pub fn change_section(&mut self, target: isize) -> ChangeOutcome {
        let last = self.len() as isize - 1;
        let target = target.clamp(0, last) as usize;

        if self.transition.is_some() {
            return ChangeOutcome::Ignored(IgnoreReason::Transitioning);
        }
        if target == self.current {
            return ChangeOutcome::Ignored(IgnoreReason::AlreadyCurrent);
        }

        self.transition = Some(Transition {
            from: self.current,
            to: target,
            elapsed: Duration::ZERO,
        });
        // A navigation supersedes whatever is left of the entry animation.
        self.intro_elapsed = self.intro_duration();
        ChangeOutcome::Started {
            from: self.current,
            to: target,
        }
    }

    /// Relative step from the current section.
    pub fn step(&mut self, direction: i32) -> ChangeOutcome {
        self.change_section(self.current as isize + direction as isize)
    }

    /// Advance timelines. Returns the new current index when a transition lands.
    pub fn advance(&mut self, dt: Duration) -> Option<usize> {
        self.intro_elapsed = (self.intro_elapsed + dt).min(self.intro_duration());

        let transition = self.transition.as_mut()?;
        transition.elapsed += dt;
        let (from, to, elapsed) = (transition.from, transition.to, transition.elapsed);
        if elapsed >= self.timeline_duration(from, to) {
            self.current = to;
            self.transition = None;
            return Some(to);
        }
        None
    }

    fn count(&self, section: usize) -> usize {
        self.counts.get(section).copied().unwrap_or(0)
    }

    fn fade_out_end(&self, section: usize) -> Duration {
        match self.count(section) {
            0 => Duration::ZERO,
            count => SECTION_STAGGER * (count as u32 - 1) + SECTION_FADE,
        }
    }

    fn fade_in_end(&self, section: usize) -> Duration {
        match self.count(section) {
            0 => SECTION_SWAP_AT,
            count => SECTION_FADE_IN_AT + SECTION_STAGGER * (count as u32 - 1) + SECTION_FADE,
        }
    }

    /// Length of the whole fade-out/fade-in timeline between two sections.
    pub fn timeline_duration(&self, from: usize, to: usize) -> Duration {
        self.fade_out_end(from)
            .max(self.fade_in_end(to))
            .max(SECTION_SWAP_AT)
    }

    fn intro_duration(&self) -> Duration {
        match self.count(0) {
            0 => Duration::ZERO,
            count => INTRO_DELAY + INTRO_STAGGER * (count as u32 - 1) + INTRO_FADE,
        }
    }

    /// Opacity of element `order` within `section` at the current instant.
    pub fn element_opacity(&self, section: usize, order: usize) -> f32 {
        let order = order as u32;
        match self.transition {
            None if section == self.current => fade_at(
                self.intro_elapsed,
                INTRO_DELAY + INTRO_STAGGER * order,
                INTRO_FADE,
                Ease::OutCubic,
            ),
            None => 0.0,
            Some(Transition { from, elapsed, .. }) if section == from => {
                1.0 - fade_at(elapsed, SECTION_STAGGER * order, SECTION_FADE, Ease::InOutCubic)
            }
            Some(Transition { to, elapsed, .. }) if section == to => {
                if elapsed < SECTION_SWAP_AT {
                    0.0
                } else {
                    fade_at(
                        elapsed,
                        SECTION_FADE_IN_AT + SECTION_STAGGER * order,
                        SECTION_FADE,
                        Ease::InOutCubic,
                    )
                }
            }
            Some(_) => 0.0,
        }
    }

    pub fn z_index(&self, section: usize) -> i32 {
        let front = match self.transition {
            None => section == self.current,
            Some(Transition { from, to, elapsed }) => {
                if elapsed < SECTION_SWAP_AT {
                    section == from
                } else {
                    section == to
                }
            }
        };
        if front { SECTION_Z_FRONT } else { SECTION_Z_BACK }
    }

    /// Sections outside the current transition are not painted.
    pub fn is_visible(&self, section: usize) -> bool {
        match self.transition {
            None => section == self.current,
            Some(Transition { from, to, .. }) => section == from || section == to,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::sections::input::NavigationInput;
    use constants::timing::INPUT_THROTTLE;

    fn three_sections() -> SectionController {
        SectionController::new(vec![3, 2, 3])
    }

    fn settle(controller: &mut SectionController) {
        for _ in 0..200 {
            controller.advance(Duration::from_millis(16));
        }
    }

    #[test]
    fn same_index_is_a_no_op() {
        let mut controller = three_sections();
        assert_eq!(
            controller.change_section(0),
            ChangeOutcome::Ignored(IgnoreReason::AlreadyCurrent)
        );
        assert!(!controller.is_transitioning());
    }

    #[test]
    fn requests_mid_transition_are_dropped() {
        let mut controller = three_sections();
        assert_eq!(
            controller.change_section(1),
            ChangeOutcome::Started { from: 0, to: 1 }
        );
        assert_eq!(
            controller.change_section(2),
            ChangeOutcome::Ignored(IgnoreReason::Transitioning)
        );
        settle(&mut controller);
        assert_eq!(controller.current(), 1);
    }

    #[test]
    fn out_of_range_targets_clamp() {
        let mut controller = three_sections();
        assert_eq!(
            controller.change_section(9),
            ChangeOutcome::Started { from: 0, to: 2 }
        );
        settle(&mut controller);
        assert_eq!(controller.current(), 2);
        assert_eq!(
            controller.change_section(-4),
            ChangeOutcome::Started { from: 2, to: 0 }
        );
        settle(&mut controller);
        assert_eq!(controller.current(), 0);
    }

    #[test]
    fn current_updates_only_when_timeline_completes() {
        let mut controller = three_sections();
        controller.change_section(1);
        let duration = controller.timeline_duration(0, 1);
        assert_eq!(controller.advance(duration - Duration::from_millis(1)), None);
        assert_eq!(controller.current(), 0);
        assert_eq!(controller.advance(Duration::from_millis(1)), Some(1));
        assert_eq!(controller.phase(), SectionPhase::Idle { current: 1 });
    }

    #[test]
    fn stacking_swaps_at_the_midpoint() {
        let mut controller = three_sections();
        controller.change_section(2);
        assert_eq!(controller.z_index(0), SECTION_Z_FRONT);
        assert_eq!(controller.z_index(2), SECTION_Z_BACK);
        assert!(controller.is_visible(2));
        assert!(!controller.is_visible(1));

        controller.advance(SECTION_SWAP_AT);
        assert_eq!(controller.z_index(0), SECTION_Z_BACK);
        assert_eq!(controller.z_index(2), SECTION_Z_FRONT);
    }

    #[test]
    fn fades_cross_over() {
        let mut controller = three_sections();
        settle(&mut controller);
        assert_eq!(controller.element_opacity(0, 2), 1.0);
        assert_eq!(controller.element_opacity(1, 0), 0.0);

        controller.change_section(1);
        controller.advance(Duration::from_millis(600));
        assert_eq!(controller.element_opacity(0, 0), 0.0);
        assert!(controller.element_opacity(1, 0) > 0.5);

        settle(&mut controller);
        assert_eq!(controller.element_opacity(1, 1), 1.0);
        assert_eq!(controller.element_opacity(0, 0), 0.0);
    }

    #[test]
    fn wheel_walks_down_without_overflow() {
        let mut controller = three_sections();
        let mut input = NavigationInput::default();
        let mut now = Duration::from_secs(5);

        for expected in [1, 2, 2] {
            if let Some(step) = input.wheel(120.0, now, controller.is_transitioning()) {
                controller.step(step);
            }
            settle(&mut controller);
            assert_eq!(controller.current(), expected);
            now += INPUT_THROTTLE + Duration::from_millis(100);
        }
    }

    #[test]
    fn swipe_threshold_gates_navigation() {
        let mut controller = three_sections();
        let mut input = NavigationInput::default();
        let now = Duration::from_secs(1);

        input.touch_start(400.0);
        let short = input.touch_end(360.0, now, controller.is_transitioning());
        assert_eq!(short, None);
        assert_eq!(controller.current(), 0);

        input.touch_start(400.0);
        let long = input.touch_end(340.0, now, controller.is_transitioning());
        assert_eq!(long, Some(1));
        controller.step(1);
        settle(&mut controller);
        assert_eq!(controller.current(), 1);
    }
}
