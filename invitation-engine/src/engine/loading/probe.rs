use std::time::Duration;

use constants::timing::{FONT_API_ABSENT_FALLBACK, FONT_FALLBACK, IMAGE_FALLBACK};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceClass {
    Fonts,
    Images,
    Dom,
}

impl ResourceClass {
    pub const ALL: [Self; 3] = [Self::Fonts, Self::Images, Self::Dom];

    pub fn label(self) -> &'static str {
        match self {
            Self::Fonts => "Fonts",
            Self::Images => "Images",
            Self::Dom => "DOM",
        }
    }
}

/// Load state of a single asset as seen by a probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetReadiness {
    Pending,
    Loaded,
    Failed,
}

impl AssetReadiness {
    pub fn is_settled(self) -> bool {
        !matches!(self, Self::Pending)
    }
}

/// How a probe reached readiness.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeOutcome {
    Pending,
    Ready,
    /// The fallback deadline passed before the platform confirmed readiness.
    TimedOut,
}

impl ProbeOutcome {
    pub fn is_done(self) -> bool {
        !matches!(self, Self::Pending)
    }
}

/// Fonts are ready once every custom font has loaded, or at the fallback
/// deadline, whichever comes first. A rejected font just waits out the deadline.
#[derive(Debug, Clone, Copy)]
pub struct FontProbe {
    deadline: Duration,
    loader_available: bool,
}

impl FontProbe {
    /// `loader_available` is false when no font could be requested at all, in
    /// which case only the shorter blind timer applies.
    pub fn new(loader_available: bool) -> Self {
        let deadline = if loader_available {
            FONT_FALLBACK
        } else {
            FONT_API_ABSENT_FALLBACK
        };
        Self {
            deadline,
            loader_available,
        }
    }

    pub fn deadline(&self) -> Duration {
        self.deadline
    }

    pub fn poll(
        &self,
        fonts: impl IntoIterator<Item = AssetReadiness>,
        elapsed: Duration,
    ) -> ProbeOutcome {
        if self.loader_available
            && fonts
                .into_iter()
                .all(|font| font == AssetReadiness::Loaded)
        {
            return ProbeOutcome::Ready;
        }
        if elapsed >= self.deadline {
            return ProbeOutcome::TimedOut;
        }
        ProbeOutcome::Pending
    }
}

/// Counts image loads. Success and failure both settle an image, so a broken
/// image never stalls the sequence.
#[derive(Debug, Clone, Default)]
pub struct ImageTally {
    settled: Vec<bool>,
    failures: usize,
}

impl ImageTally {
    pub fn new(total: usize) -> Self {
        Self {
            settled: vec![false; total],
            failures: 0,
        }
    }

    /// Record the readiness of image `index`. Each image is counted once.
    pub fn record(&mut self, index: usize, readiness: AssetReadiness) -> bool {
        let Some(slot) = self.settled.get_mut(index) else {
            return false;
        };
        if *slot || !readiness.is_settled() {
            return false;
        }
        *slot = true;
        if readiness == AssetReadiness::Failed {
            self.failures += 1;
        }
        true
    }

    pub fn total(&self) -> usize {
        self.settled.len()
    }

    pub fn settled(&self) -> usize {
        self.settled.iter().filter(|done| **done).count()
    }

    pub fn failures(&self) -> usize {
        self.failures
    }

    pub fn is_complete(&self) -> bool {
        self.settled() == self.total()
    }

    pub fn poll(&self, elapsed: Duration) -> ProbeOutcome {
        if self.is_complete() {
            ProbeOutcome::Ready
        } else if elapsed >= IMAGE_FALLBACK {
            ProbeOutcome::TimedOut
        } else {
            ProbeOutcome::Pending
        }
    }
}

/// Document ready state, mirroring `document.readyState`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentState {
    Loading,
    Interactive,
    Complete,
}

impl DocumentState {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "complete" => Self::Complete,
            "interactive" => Self::Interactive,
            _ => Self::Loading,
        }
    }

    pub fn poll(self) -> ProbeOutcome {
        if self == Self::Complete {
            ProbeOutcome::Ready
        } else {
            ProbeOutcome::Pending
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fonts_ready_when_all_loaded() {
        let probe = FontProbe::new(true);
        let fonts = [AssetReadiness::Loaded, AssetReadiness::Loaded];
        assert_eq!(
            probe.poll(fonts, Duration::from_millis(10)),
            ProbeOutcome::Ready
        );
    }

    #[test]
    fn rejected_font_waits_out_the_fallback() {
        let probe = FontProbe::new(true);
        let fonts = [AssetReadiness::Loaded, AssetReadiness::Failed];
        assert_eq!(
            probe.poll(fonts, Duration::from_millis(2999)),
            ProbeOutcome::Pending
        );
        assert_eq!(
            probe.poll(fonts, Duration::from_millis(3000)),
            ProbeOutcome::TimedOut
        );
    }

    #[test]
    fn missing_loader_uses_short_timer() {
        let probe = FontProbe::new(false);
        assert_eq!(probe.deadline(), FONT_API_ABSENT_FALLBACK);
        assert_eq!(
            probe.poll([AssetReadiness::Pending; 0], Duration::from_millis(1000)),
            ProbeOutcome::Pending
        );
        assert_eq!(
            probe.poll([AssetReadiness::Pending; 0], Duration::from_millis(2000)),
            ProbeOutcome::TimedOut
        );
    }

    #[test]
    fn failed_images_count_toward_completion() {
        let mut tally = ImageTally::new(3);
        assert!(tally.record(0, AssetReadiness::Loaded));
        assert!(tally.record(1, AssetReadiness::Failed));
        assert!(!tally.is_complete());
        assert!(tally.record(2, AssetReadiness::Failed));
        assert!(tally.is_complete());
        assert_eq!(tally.settled(), tally.total());
        assert_eq!(tally.failures(), 2);
        assert_eq!(tally.poll(Duration::ZERO), ProbeOutcome::Ready);
    }

    #[test]
    fn images_are_counted_once() {
        let mut tally = ImageTally::new(2);
        assert!(!tally.record(0, AssetReadiness::Pending));
        assert!(tally.record(0, AssetReadiness::Loaded));
        assert!(!tally.record(0, AssetReadiness::Loaded));
        assert!(!tally.record(5, AssetReadiness::Loaded));
        assert_eq!(tally.settled(), 1);
    }

    #[test]
    fn image_fallback_forces_completion() {
        let tally = ImageTally::new(4);
        assert_eq!(tally.poll(Duration::from_secs(9)), ProbeOutcome::Pending);
        assert_eq!(tally.poll(Duration::from_secs(10)), ProbeOutcome::TimedOut);
    }

    #[test]
    fn document_state_parses_ready_state() {
        assert_eq!(DocumentState::parse("loading").poll(), ProbeOutcome::Pending);
        assert_eq!(
            DocumentState::parse("interactive").poll(),
            ProbeOutcome::Pending
        );
        assert_eq!(DocumentState::parse("complete").poll(), ProbeOutcome::Ready);
    }
}
