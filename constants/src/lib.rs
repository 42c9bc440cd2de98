//! Compile-time configuration shared by the invitation engine.

/// Asset paths for fonts, images and audio, grouped per route.
pub mod assets;

/// Theme palette and persistence key.
pub mod palette;

/// Colours and sizes for the overlay and page chrome.
pub mod render_settings;

/// Camera ranges and damping for the home page scroll rig.
pub mod scroll_rig;

/// Fallback timeouts, fade durations and input thresholds.
pub mod timing;
