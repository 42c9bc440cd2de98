use bevy::prelude::*;

use crate::error::{InvitationError, InvitationResult};

/// Named destinations a page can ask the home page to scroll to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionTag {
    Experience,
}

impl SectionTag {
    pub fn name(self) -> &'static str {
        match self {
            Self::Experience => "experience",
        }
    }
}

/// Single-slot mailbox shared across routes for the lifetime of the app.
///
/// Writes overwrite an unconsumed request (last writer wins) but are refused
/// while the consumer is animating toward the previous one.
#[derive(Resource, Debug, Default, Clone)]
pub struct ScrollHandoff {
    target_progress: Option<f32>,
    target_section: Option<SectionTag>,
    in_flight: bool,
}

impl ScrollHandoff {
    /// Request a scroll to `progress` in `[0, 1]`, or clear with `None`.
    pub fn set_target_scroll_progress(&mut self, progress: Option<f32>) -> InvitationResult<()> {
        if self.in_flight {
            return Err(InvitationError::HandoffBusy);
        }
        self.target_progress = progress
            .filter(|value| value.is_finite())
            .map(|value| value.clamp(0.0, 1.0));
        Ok(())
    }

    pub fn target_scroll_progress(&self) -> Option<f32> {
        self.target_progress
    }

    pub fn set_target_section(&mut self, section: Option<SectionTag>) {
        self.target_section = section;
    }

    /// Consume the named-section request.
    pub fn take_target_section(&mut self) -> Option<SectionTag> {
        self.target_section.take()
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    /// Mark the pending request as being acted upon.
    pub(super) fn begin(&mut self) -> Option<f32> {
        let progress = self.target_progress?;
        self.in_flight = true;
        Some(progress)
    }

    /// Release the slot once the consumer has finished or given up.
    pub(crate) fn finish(&mut self) {
        self.in_flight = false;
        self.target_progress = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_is_clamped() {
        let mut mailbox = ScrollHandoff::default();
        mailbox.set_target_scroll_progress(Some(1.7)).unwrap();
        assert_eq!(mailbox.target_scroll_progress(), Some(1.0));
        mailbox.set_target_scroll_progress(Some(-0.2)).unwrap();
        assert_eq!(mailbox.target_scroll_progress(), Some(0.0));
        mailbox.set_target_scroll_progress(Some(f32::NAN)).unwrap();
        assert_eq!(mailbox.target_scroll_progress(), None);
    }

    #[test]
    fn unconsumed_requests_are_overwritten() {
        let mut mailbox = ScrollHandoff::default();
        mailbox.set_target_scroll_progress(Some(0.2)).unwrap();
        mailbox.set_target_scroll_progress(Some(0.85)).unwrap();
        assert_eq!(mailbox.target_scroll_progress(), Some(0.85));
    }

    #[test]
    fn writes_are_refused_while_in_flight() {
        let mut mailbox = ScrollHandoff::default();
        mailbox.set_target_scroll_progress(Some(0.5)).unwrap();
        assert_eq!(mailbox.begin(), Some(0.5));
        assert!(matches!(
            mailbox.set_target_scroll_progress(Some(0.1)),
            Err(InvitationError::HandoffBusy)
        ));
        mailbox.finish();
        assert_eq!(mailbox.target_scroll_progress(), None);
        assert!(mailbox.set_target_scroll_progress(Some(0.1)).is_ok());
    }

    #[test]
    fn section_request_is_read_once() {
        let mut mailbox = ScrollHandoff::default();
        mailbox.set_target_section(Some(SectionTag::Experience));
        assert_eq!(mailbox.take_target_section(), Some(SectionTag::Experience));
        assert_eq!(mailbox.take_target_section(), None);
        assert_eq!(SectionTag::Experience.name(), "experience");
    }
}
