use bevy::math::Vec3;

/// Scroll container height in viewport heights.
pub const SCROLL_PAGES: f32 = 4.0;

/// Pixels scrolled per wheel line.
pub const PIXELS_PER_LINE: f32 = 40.0;

/// Damping applied to the rendered scroll offset.
pub const SCROLL_DAMPING: f32 = 4.0;

pub const CAMERA_START: Vec3 = Vec3::new(0.0, 0.0, 5.0);

/// Camera tilt range: `(from, distance)` in scroll offset units.
pub const TILT_RANGE: (f32, f32) = (0.0, 0.3);
pub const TILT_DAMPING: f32 = 5.0;

pub const DESCENT_RANGE: (f32, f32) = (0.3, 0.5);
pub const DESCENT_DEPTH: f32 = 37.0;
pub const DESCENT_DAMPING: f32 = 7.0;

pub const DOLLY_RANGE: (f32, f32) = (0.85, 0.18);
pub const DOLLY_DISTANCE: f32 = 10.0;
pub const DOLLY_DAMPING: f32 = 7.0;

/// Pointer-follow yaw factor, desktop only.
pub const POINTER_YAW_LERP: f32 = 0.05;

/// Scroll range over which the experience panel is shown.
pub const EXPERIENCE_RANGE: (f32, f32) = (0.8, 0.2);

/// Handoff target used when returning to the experience panel.
pub const EXPERIENCE_SCROLL_PROGRESS: f32 = 0.7;

/// Portrait card size and resting gap.
pub const PORTRAIT_WIDTH: f32 = 1.6;
pub const PORTRAIT_HEIGHT: f32 = 2.2;
pub const PORTRAIT_GAP: f32 = 1.5;
