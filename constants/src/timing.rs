use std::time::Duration;

// Resource probes
pub const FONT_FALLBACK: Duration = Duration::from_millis(3000);
pub const FONT_API_ABSENT_FALLBACK: Duration = Duration::from_millis(2000);
pub const IMAGE_FALLBACK: Duration = Duration::from_millis(10_000);

// Loading sequencer
/// Time constant for the progress bar chasing its target width.
pub const PROGRESS_DAMPING: f32 = 8.0;
/// Hold at 100% before the overlay starts fading.
pub const COMPLETION_DWELL: Duration = Duration::from_millis(800);
pub const OVERLAY_FADE_OUT: Duration = Duration::from_millis(1000);
pub const CONTENT_FADE_IN: Duration = Duration::from_millis(800);

// Section reveal controller
pub const SECTION_COUNT: usize = 3;
pub const INPUT_THROTTLE: Duration = Duration::from_millis(500);
pub const SWIPE_THRESHOLD_PX: f32 = 50.0;
pub const SECTION_FADE: Duration = Duration::from_millis(300);
pub const SECTION_STAGGER: Duration = Duration::from_millis(100);
/// Offset into the timeline at which the incoming section is raised.
pub const SECTION_SWAP_AT: Duration = Duration::from_millis(300);
/// Offset into the timeline at which incoming elements start to appear.
pub const SECTION_FADE_IN_AT: Duration = Duration::from_millis(400);
pub const INTRO_DELAY: Duration = Duration::from_millis(1000);
pub const INTRO_FADE: Duration = Duration::from_millis(800);
pub const INTRO_STAGGER: Duration = Duration::from_millis(200);
pub const TITLE_INTRO_DELAY: Duration = Duration::from_millis(1200);
pub const TITLE_INTRO_FADE: Duration = Duration::from_millis(1500);

// Mouse parallax
pub const PARALLAX_RANGE_PX: f32 = 30.0;
pub const PARALLAX_DAMPING: f32 = 4.0;

// Cross-page scroll handoff
pub const HANDOFF_TWEEN: Duration = Duration::from_millis(1500);
pub const HANDOFF_MAX_ATTEMPTS: u32 = 5;
pub const HANDOFF_CHECK_INTERVAL: Duration = Duration::from_millis(100);
/// Each further corrective write waits this factor longer than the last.
pub const HANDOFF_BACKOFF: f32 = 1.5;
pub const HANDOFF_TOLERANCE_PX: f32 = 50.0;

// Theme
pub const THEME_BLEND: Duration = Duration::from_millis(1000);
