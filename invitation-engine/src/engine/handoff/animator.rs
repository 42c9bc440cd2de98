use std::time::Duration;

use bevy::prelude::*;
use constants::timing::HANDOFF_TWEEN;

use super::mailbox::ScrollHandoff;
use super::retry::{CorrectionEnd, CorrectionPolicy, CorrectionStep};
use crate::engine::animation::ease::Ease;
use crate::engine::animation::tween::Tween;
use crate::engine::camera::scroll_container::ScrollContainer;

/// Anything with a scrollable extent the handoff can drive.
pub trait ScrollSurface {
    /// Total scrollable extent in pixels. Zero until the content is measured.
    fn scroll_height(&self) -> f32;
    fn scroll_top(&self) -> f32;
    fn set_scroll_top(&mut self, top: f32);

    /// Largest scroll top the surface accepts.
    fn max_scroll_top(&self) -> f32 {
        self.scroll_height()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HandoffPoll {
    /// Nothing requested.
    Idle,
    /// A request is waiting for the container to report a height.
    Deferred,
    Started { target_top: f32 },
    Animating,
    /// `attempts` counts every instant write, the first one included.
    Finished { attempts: u32 },
    /// The tween could not be built; the request was dropped.
    Aborted,
}

#[derive(Debug, Clone, Copy)]
struct Correction {
    attempts: u32,
    check_in: Option<Duration>,
    /// A corrective write owns the position, so the tween stops writing.
    holding: bool,
}

#[derive(Debug, Clone, Copy)]
enum AnimatorState {
    Idle,
    Animating {
        target_top: f32,
        tween: Tween,
        correction: Correction,
    },
}

/// Consumer side of the handoff, owned by the destination page.
#[derive(Resource, Debug, Clone, Copy)]
pub struct HandoffAnimator {
    state: AnimatorState,
    policy: CorrectionPolicy,
}

impl Default for HandoffAnimator {
    fn default() -> Self {
        Self::new(CorrectionPolicy::default())
    }
}

impl HandoffAnimator {
    pub fn new(policy: CorrectionPolicy) -> Self {
        Self {
            state: AnimatorState::Idle,
            policy,
        }
    }

    pub fn is_animating(&self) -> bool {
        matches!(self.state, AnimatorState::Animating { .. })
    }

    /// Run one frame of the handoff against `surface`.
    pub fn poll(
        &mut self,
        mailbox: &mut ScrollHandoff,
        surface: &mut impl ScrollSurface,
        dt: Duration,
    ) -> HandoffPoll {
        match self.state {
            AnimatorState::Idle => self.start(mailbox, surface),
            AnimatorState::Animating {
                target_top,
                mut tween,
                mut correction,
            } => {
                let top = tween.advance(dt);
                self.correct(surface, target_top, &mut correction, dt);
                if !correction.holding {
                    surface.set_scroll_top(top);
                }
                if tween.is_finished() {
                    mailbox.finish();
                    self.state = AnimatorState::Idle;
                    return HandoffPoll::Finished {
                        attempts: correction.attempts,
                    };
                }
                self.state = AnimatorState::Animating {
                    target_top,
                    tween,
                    correction,
                };
                HandoffPoll::Animating
            }
        }
    }

    fn start(&mut self, mailbox: &mut ScrollHandoff, surface: &mut impl ScrollSurface) -> HandoffPoll {
        let Some(progress) = mailbox.target_scroll_progress() else {
            return HandoffPoll::Idle;
        };
        let height = surface.scroll_height();
        if height <= 0.0 {
            return HandoffPoll::Deferred;
        }
        if mailbox.begin().is_none() {
            return HandoffPoll::Idle;
        }

        let target_top = (height * progress).min(surface.max_scroll_top());
        let mut correction = Correction {
            attempts: 0,
            check_in: None,
            holding: false,
        };
        if let CorrectionStep::Write { check_after } = self.policy.next(0, None) {
            surface.set_scroll_top(target_top);
            correction.attempts = 1;
            correction.check_in = Some(check_after);
        }

        match Tween::new(surface.scroll_top(), target_top, HANDOFF_TWEEN, Ease::OutCubic) {
            Ok(tween) => {
                self.state = AnimatorState::Animating {
                    target_top,
                    tween,
                    correction,
                };
                HandoffPoll::Started { target_top }
            }
            Err(err) => {
                warn!("Scroll handoff abandoned: {}", err);
                mailbox.finish();
                self.state = AnimatorState::Idle;
                HandoffPoll::Aborted
            }
        }
    }

    fn correct(
        &self,
        surface: &mut impl ScrollSurface,
        target_top: f32,
        correction: &mut Correction,
        dt: Duration,
    ) {
        let Some(remaining) = correction.check_in else {
            return;
        };
        if remaining > dt {
            correction.check_in = Some(remaining - dt);
            return;
        }

        let error = surface.scroll_top() - target_top;
        match self.policy.next(correction.attempts, Some(error)) {
            CorrectionStep::Write { check_after } => {
                debug!(
                    "Scroll handoff off by {:.0}px, rewriting (attempt {})",
                    error,
                    correction.attempts + 1
                );
                surface.set_scroll_top(target_top);
                correction.attempts += 1;
                correction.check_in = Some(check_after);
                correction.holding = true;
            }
            CorrectionStep::Done(CorrectionEnd::Settled) => {
                correction.check_in = None;
                correction.holding = true;
            }
            CorrectionStep::Done(CorrectionEnd::Exhausted) => {
                debug!("Scroll handoff corrections exhausted, leaving it to the tween");
                correction.check_in = None;
                correction.holding = false;
            }
        }
    }
}

pub fn consume_scroll_handoff(
    time: Res<Time>,
    mut mailbox: ResMut<ScrollHandoff>,
    mut animator: ResMut<HandoffAnimator>,
    mut container: ResMut<ScrollContainer>,
) {
    match animator.poll(&mut *mailbox, &mut *container, time.delta()) {
        HandoffPoll::Started { target_top } => {
            info!("→ Scroll handoff to {:.0}px", target_top);
        }
        HandoffPoll::Finished { attempts } => {
            info!("✓ Scroll handoff settled after {} write(s)", attempts)
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use constants::timing::{HANDOFF_MAX_ATTEMPTS, HANDOFF_TOLERANCE_PX as HANDOFF_TOLERANCE};

    const FRAME: Duration = Duration::from_millis(16);

    /// Container that can be told to snap back to the top on the next writes.
    struct FakeContainer {
        height: f32,
        top: f32,
        ignored_writes: u32,
        writes: u32,
    }

    impl FakeContainer {
        fn new(height: f32) -> Self {
            Self {
                height,
                top: 0.0,
                ignored_writes: 0,
                writes: 0,
            }
        }
    }

    impl ScrollSurface for FakeContainer {
        fn scroll_height(&self) -> f32 {
            self.height
        }

        fn scroll_top(&self) -> f32 {
            self.top
        }

        fn set_scroll_top(&mut self, top: f32) {
            self.writes += 1;
            if self.ignored_writes > 0 {
                self.ignored_writes -= 1;
                return;
            }
            self.top = top.clamp(0.0, self.height);
        }
    }

    fn run_to_end(
        animator: &mut HandoffAnimator,
        mailbox: &mut ScrollHandoff,
        surface: &mut impl ScrollSurface,
    ) -> HandoffPoll {
        for _ in 0..500 {
            let poll = animator.poll(mailbox, surface, FRAME);
            if matches!(poll, HandoffPoll::Finished { .. } | HandoffPoll::Aborted) {
                return poll;
            }
        }
        panic!("handoff never finished");
    }

    #[test]
    fn waits_for_a_measured_height_then_settles() {
        let mut mailbox = ScrollHandoff::default();
        mailbox.set_target_scroll_progress(Some(0.85)).unwrap();
        let mut animator = HandoffAnimator::default();
        let mut surface = FakeContainer::new(0.0);

        for _ in 0..10 {
            assert_eq!(
                animator.poll(&mut mailbox, &mut surface, FRAME),
                HandoffPoll::Deferred
            );
        }
        assert_eq!(surface.writes, 0);
        assert_eq!(mailbox.target_scroll_progress(), Some(0.85));

        surface.height = 4000.0;
        assert_eq!(
            animator.poll(&mut mailbox, &mut surface, FRAME),
            HandoffPoll::Started { target_top: 3400.0 }
        );
        assert!(mailbox.is_in_flight());

        assert_eq!(
            run_to_end(&mut animator, &mut mailbox, &mut surface),
            HandoffPoll::Finished { attempts: 1 }
        );
        assert!((surface.top - 3400.0).abs() <= HANDOFF_TOLERANCE);
        assert_eq!(mailbox.target_scroll_progress(), None);
        assert!(!mailbox.is_in_flight());
        assert!(!animator.is_animating());
    }

    #[test]
    fn rewrites_when_the_container_fights_back() {
        let mut mailbox = ScrollHandoff::default();
        mailbox.set_target_scroll_progress(Some(0.5)).unwrap();
        let mut animator = HandoffAnimator::default();
        let mut surface = FakeContainer::new(2000.0);
        surface.ignored_writes = 1;

        let started = animator.poll(&mut mailbox, &mut surface, FRAME);
        assert_eq!(started, HandoffPoll::Started { target_top: 1000.0 });
        assert_eq!(surface.top, 0.0);

        // First check lands on the seventh frame, well before the tween is done.
        for _ in 0..7 {
            assert_eq!(
                animator.poll(&mut mailbox, &mut surface, FRAME),
                HandoffPoll::Animating
            );
        }
        assert_eq!(surface.top, 1000.0);
        assert!(animator.is_animating());

        // The corrected position is not dragged back along the tween.
        let writes = surface.writes;
        for _ in 0..5 {
            animator.poll(&mut mailbox, &mut surface, FRAME);
            assert_eq!(surface.top, 1000.0);
        }
        assert_eq!(surface.writes, writes);

        assert_eq!(
            run_to_end(&mut animator, &mut mailbox, &mut surface),
            HandoffPoll::Finished { attempts: 2 }
        );
        assert_eq!(surface.top, 1000.0);
    }

    #[test]
    fn corrections_stop_after_the_attempt_budget() {
        let mut mailbox = ScrollHandoff::default();
        mailbox.set_target_scroll_progress(Some(0.5)).unwrap();
        let mut animator = HandoffAnimator::default();
        let mut surface = FakeContainer::new(2000.0);
        surface.ignored_writes = u32::MAX;

        assert_eq!(
            run_to_end(&mut animator, &mut mailbox, &mut surface),
            HandoffPoll::Finished {
                attempts: HANDOFF_MAX_ATTEMPTS
            }
        );
        assert_eq!(surface.top, 0.0);
        assert!(!mailbox.is_in_flight());
    }

    #[test]
    fn target_is_clamped_to_the_last_viewport() {
        let mut mailbox = ScrollHandoff::default();
        mailbox.set_target_scroll_progress(Some(0.85)).unwrap();
        let mut animator = HandoffAnimator::default();
        let mut container = ScrollContainer::default();

        for _ in 0..5 {
            assert_eq!(
                animator.poll(&mut mailbox, &mut container, FRAME),
                HandoffPoll::Deferred
            );
        }

        container.measure(800.0);
        assert_eq!(
            animator.poll(&mut mailbox, &mut container, FRAME),
            HandoffPoll::Started { target_top: 2400.0 }
        );
        // Reachable on the first write, so no corrective rewrites are spent.
        assert_eq!(
            run_to_end(&mut animator, &mut mailbox, &mut container),
            HandoffPoll::Finished { attempts: 1 }
        );
        assert_eq!(container.scroll_top(), 2400.0);
        assert_eq!(container.progress(), 1.0);
    }

    #[test]
    fn producer_is_refused_mid_flight() {
        let mut mailbox = ScrollHandoff::default();
        mailbox.set_target_scroll_progress(Some(0.3)).unwrap();
        let mut animator = HandoffAnimator::default();
        let mut surface = FakeContainer::new(1000.0);

        animator.poll(&mut mailbox, &mut surface, FRAME);
        assert!(mailbox.set_target_scroll_progress(Some(0.9)).is_err());

        run_to_end(&mut animator, &mut mailbox, &mut surface);
        assert!(mailbox.set_target_scroll_progress(Some(0.9)).is_ok());
    }

    #[test]
    fn broken_surface_releases_the_slot() {
        let mut mailbox = ScrollHandoff::default();
        mailbox.set_target_scroll_progress(Some(0.3)).unwrap();
        let mut animator = HandoffAnimator::default();
        let mut surface = FakeContainer::new(1000.0);
        surface.top = f32::NAN;
        surface.ignored_writes = 1;

        assert_eq!(
            animator.poll(&mut mailbox, &mut surface, FRAME),
            HandoffPoll::Aborted
        );
        assert!(!mailbox.is_in_flight());
        assert_eq!(mailbox.target_scroll_progress(), None);
    }

    #[test]
    fn idle_without_a_request() {
        let mut mailbox = ScrollHandoff::default();
        let mut animator = HandoffAnimator::default();
        let mut surface = FakeContainer::new(1000.0);
        assert_eq!(
            animator.poll(&mut mailbox, &mut surface, FRAME),
            HandoffPoll::Idle
        );
    }
}
