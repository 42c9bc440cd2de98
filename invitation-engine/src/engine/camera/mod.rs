//! Home page scroll rig.
//!
//! A virtual scroll container converts wheel and touch-drag input into a
//! damped scroll offset, and the rig maps that offset onto the 3D camera and
//! the experience panel.

/// Virtual scroll container resource and its input systems.
pub mod scroll_container;
/// Camera and experience panel driven by the scroll offset.
pub mod scroll_rig;
