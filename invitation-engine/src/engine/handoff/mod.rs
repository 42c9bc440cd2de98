//! Cross-page scroll handoff: one page asks another, once mounted, to animate
//! its scroll container to a given progress.
//!
//! The request travels through a single-slot [`mailbox::ScrollHandoff`]
//! resource; the destination page's [`animator::HandoffAnimator`] consumes it
//! once the container has measured a non-zero height.

pub mod animator;
pub mod mailbox;
pub mod retry;
