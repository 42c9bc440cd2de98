use std::time::Duration;

use bevy::prelude::*;
use constants::timing::{
    COMPLETION_DWELL, CONTENT_FADE_IN, OVERLAY_FADE_OUT, PROGRESS_DAMPING,
};

use super::progress::LoadingStatus;
use crate::engine::animation::ease::{Ease, damp};

/// Page-level loading phase. One-directional: there is no path back to
/// `Probing` until the route changes.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, States)]
pub enum LoadingPhase {
    #[default]
    Probing,
    Completing,
    Revealed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionStage {
    /// Holding at 100% so the guest sees the bar fill.
    Dwell,
    /// Overlay fading out.
    FadeOut,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum SequencerState {
    Probing,
    Completing {
        stage: CompletionStage,
        elapsed: Duration,
    },
    Revealed {
        elapsed: Duration,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequencerEvent {
    CompletionStarted,
    FadeOutStarted,
    Revealed,
}

/// Aggregates probe flags into a progress value and decides when to reveal.
#[derive(Resource, Debug, Clone)]
pub struct LoadingSequencer {
    state: SequencerState,
    target: f32,
    displayed: f32,
}

impl Default for LoadingSequencer {
    fn default() -> Self {
        Self {
            state: SequencerState::Probing,
            target: 0.0,
            displayed: 0.0,
        }
    }
}

impl LoadingSequencer {
    /// Advance by one frame. At most one event is emitted per call.
    pub fn advance(&mut self, status: &LoadingStatus, dt: Duration) -> Option<SequencerEvent> {
        let dt_secs = dt.as_secs_f32();
        match self.state {
            SequencerState::Probing => {
                // The bar never regresses even if flags arrive out of order.
                self.target = self.target.max(status.percent());
                self.displayed = damp(self.displayed, self.target, PROGRESS_DAMPING, dt_secs);

                if status.all_loaded() {
                    self.target = 100.0;
                    self.state = SequencerState::Completing {
                        stage: CompletionStage::Dwell,
                        elapsed: Duration::ZERO,
                    };
                    return Some(SequencerEvent::CompletionStarted);
                }
                None
            }
            SequencerState::Completing { stage, elapsed } => {
                let elapsed = elapsed + dt;
                match stage {
                    CompletionStage::Dwell => {
                        self.displayed =
                            damp(self.displayed, self.target, PROGRESS_DAMPING * 2.0, dt_secs);
                        if elapsed >= COMPLETION_DWELL {
                            self.displayed = 100.0;
                            self.state = SequencerState::Completing {
                                stage: CompletionStage::FadeOut,
                                elapsed: Duration::ZERO,
                            };
                            return Some(SequencerEvent::FadeOutStarted);
                        }
                        self.state = SequencerState::Completing { stage, elapsed };
                        None
                    }
                    CompletionStage::FadeOut => {
                        if elapsed >= OVERLAY_FADE_OUT {
                            self.state = SequencerState::Revealed {
                                elapsed: Duration::ZERO,
                            };
                            return Some(SequencerEvent::Revealed);
                        }
                        self.state = SequencerState::Completing { stage, elapsed };
                        None
                    }
                }
            }
            SequencerState::Revealed { elapsed } => {
                self.state = SequencerState::Revealed {
                    elapsed: (elapsed + dt).min(CONTENT_FADE_IN),
                };
                None
            }
        }
    }

    pub fn phase(&self) -> LoadingPhase {
        match self.state {
            SequencerState::Probing => LoadingPhase::Probing,
            SequencerState::Completing { .. } => LoadingPhase::Completing,
            SequencerState::Revealed { .. } => LoadingPhase::Revealed,
        }
    }

    /// Width of the progress bar in percent.
    pub fn progress(&self) -> f32 {
        self.displayed
    }

    pub fn target_progress(&self) -> f32 {
        self.target
    }

    pub fn overlay_opacity(&self) -> f32 {
        match self.state {
            SequencerState::Probing => 1.0,
            SequencerState::Completing {
                stage: CompletionStage::Dwell,
                ..
            } => 1.0,
            SequencerState::Completing {
                stage: CompletionStage::FadeOut,
                elapsed,
            } => {
                let t = elapsed.as_secs_f32() / OVERLAY_FADE_OUT.as_secs_f32();
                1.0 - Ease::InOutCubic.apply(t)
            }
            SequencerState::Revealed { .. } => 0.0,
        }
    }

    pub fn content_opacity(&self) -> f32 {
        match self.state {
            SequencerState::Revealed { elapsed } => {
                Ease::OutCubic.apply(elapsed.as_secs_f32() / CONTENT_FADE_IN.as_secs_f32())
            }
            _ => 0.0,
        }
    }

    pub fn is_revealed(&self) -> bool {
        matches!(self.state, SequencerState::Revealed { .. })
    }
}

/// Run condition: the current page has finished loading. Reads the page-scoped
/// sequencer, which is replaced on the same frame a route mounts.
pub fn page_revealed(sequencer: Res<LoadingSequencer>) -> bool {
    sequencer.is_revealed()
}

/// Drive the sequencer one frame and mirror its phase into Bevy state.
pub fn drive_loading_sequencer(
    time: Res<Time>,
    status: Res<LoadingStatus>,
    mut sequencer: ResMut<LoadingSequencer>,
    mut next_phase: ResMut<NextState<LoadingPhase>>,
) {
    match sequencer.advance(&status, time.delta()) {
        Some(SequencerEvent::CompletionStarted) => {
            info!("→ All resources ready, transitioning to Completing");
            next_phase.set(LoadingPhase::Completing);
        }
        Some(SequencerEvent::FadeOutStarted) => {
            debug!("Loading overlay fading out");
        }
        Some(SequencerEvent::Revealed) => {
            info!("→ Overlay faded, transitioning to Revealed");
            next_phase.set(LoadingPhase::Revealed);
        }
        None => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::loading::probe::ResourceClass;

    const FRAME: Duration = Duration::from_millis(16);

    fn permutations() -> Vec<[ResourceClass; 3]> {
        use ResourceClass::*;
        vec![
            [Fonts, Images, Dom],
            [Fonts, Dom, Images],
            [Images, Fonts, Dom],
            [Images, Dom, Fonts],
            [Dom, Fonts, Images],
            [Dom, Images, Fonts],
        ]
    }

    #[test]
    fn every_interleaving_completes_and_reveals_once() {
        for order in permutations() {
            let mut status = LoadingStatus::default();
            let mut sequencer = LoadingSequencer::default();
            let mut events = Vec::new();
            let mut last_progress = 0.0;

            for class in order {
                for _ in 0..10 {
                    events.extend(sequencer.advance(&status, FRAME));
                    assert!(sequencer.progress() >= last_progress);
                    last_progress = sequencer.progress();
                }
                status.mark(class);
            }
            for _ in 0..300 {
                events.extend(sequencer.advance(&status, FRAME));
                assert!(sequencer.progress() >= last_progress, "{order:?}");
                last_progress = sequencer.progress();
            }

            let count = |wanted: SequencerEvent| events.iter().filter(|event| **event == wanted).count();
            assert_eq!(count(SequencerEvent::CompletionStarted), 1, "{order:?}");
            assert_eq!(count(SequencerEvent::FadeOutStarted), 1, "{order:?}");
            assert_eq!(count(SequencerEvent::Revealed), 1, "{order:?}");
            assert_eq!(sequencer.phase(), LoadingPhase::Revealed);
            assert_eq!(sequencer.progress(), 100.0);
        }
    }

    #[test]
    fn completion_dwells_before_fading() {
        let mut status = LoadingStatus::default();
        for class in ResourceClass::ALL {
            status.mark(class);
        }
        let mut sequencer = LoadingSequencer::default();
        assert_eq!(
            sequencer.advance(&status, FRAME),
            Some(SequencerEvent::CompletionStarted)
        );
        assert_eq!(sequencer.target_progress(), 100.0);

        assert_eq!(sequencer.advance(&status, Duration::from_millis(500)), None);
        assert_eq!(sequencer.overlay_opacity(), 1.0);
        assert_eq!(
            sequencer.advance(&status, Duration::from_millis(300)),
            Some(SequencerEvent::FadeOutStarted)
        );

        sequencer.advance(&status, Duration::from_millis(500));
        let mid_fade = sequencer.overlay_opacity();
        assert!(mid_fade > 0.0 && mid_fade < 1.0);
        assert_eq!(
            sequencer.advance(&status, Duration::from_millis(500)),
            Some(SequencerEvent::Revealed)
        );
        assert_eq!(sequencer.overlay_opacity(), 0.0);
    }

    #[test]
    fn revealed_is_terminal() {
        let mut status = LoadingStatus::default();
        for class in ResourceClass::ALL {
            status.mark(class);
        }
        let mut sequencer = LoadingSequencer::default();
        for _ in 0..200 {
            sequencer.advance(&status, FRAME);
        }
        assert!(sequencer.is_revealed());

        // A fresh status cannot drag a revealed page back to probing.
        let fresh = LoadingStatus::default();
        for _ in 0..10 {
            assert_eq!(sequencer.advance(&fresh, FRAME), None);
        }
        assert_eq!(sequencer.phase(), LoadingPhase::Revealed);
        assert_eq!(sequencer.content_opacity(), 1.0);
    }

    #[test]
    fn partial_progress_stays_below_full() {
        let mut status = LoadingStatus::default();
        status.mark(ResourceClass::Fonts);
        status.mark(ResourceClass::Dom);
        let mut sequencer = LoadingSequencer::default();
        for _ in 0..500 {
            assert_eq!(sequencer.advance(&status, FRAME), None);
        }
        assert!(sequencer.progress() <= 200.0 / 3.0 + 1e-3);
        assert_eq!(sequencer.phase(), LoadingPhase::Probing);
    }
}
