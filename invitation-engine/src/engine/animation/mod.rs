//! Time-based interpolation shared by the loading overlay, section fades,
//! the scroll rig and the scroll handoff.

/// Easing curves and frame-rate independent damping.
pub mod ease;

/// Fixed-duration tweens sampled by elapsed time.
pub mod tween;
