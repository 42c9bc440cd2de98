use bevy::color::Color;

pub const OVERLAY_BACKGROUND: Color = Color::srgb(0.98, 0.96, 0.93);
pub const PROGRESS_TRACK: Color = Color::srgba(0.33, 0.28, 0.31, 0.15);
pub const PROGRESS_FILL: Color = Color::srgb(0.33, 0.28, 0.31);
pub const INK: Color = Color::srgb(0.33, 0.28, 0.31);
pub const PAPER: Color = Color::srgb(0.99, 0.97, 0.94);
pub const INDICATOR_ACTIVE: Color = Color::WHITE;
pub const INDICATOR_IDLE: Color = Color::srgba(1.0, 1.0, 1.0, 0.5);
pub const DEBUG_TEXT: Color = Color::srgb(1., 0., 0.);

pub const TITLE_FONT_SIZE: f32 = 42.0;
pub const BODY_FONT_SIZE: f32 = 18.0;
pub const PROGRESS_BAR_WIDTH_PX: f32 = 420.0;
pub const PROGRESS_BAR_HEIGHT_PX: f32 = 4.0;
pub const INDICATOR_SIZE_PX: f32 = 10.0;

/// Stacking order of the section in front and the ones behind it.
pub const SECTION_Z_FRONT: i32 = 30;
pub const SECTION_Z_BACK: i32 = 20;
pub const OVERLAY_Z: i32 = 100;
