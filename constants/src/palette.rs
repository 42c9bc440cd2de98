/// Accent colours the theme switcher cycles through, in round-robin order.
pub const THEME_COLORS: [&str; 3] = ["#0690d4", "#272727", "#69594a"];

/// Index into [`THEME_COLORS`] used when nothing has been persisted yet.
pub const DEFAULT_THEME_INDEX: usize = 2;

/// Storage key for the persisted theme record.
pub const THEME_STORAGE_KEY: &str = "theme-storage";

/// Envelope version written alongside the persisted theme record.
pub const THEME_STORAGE_VERSION: u32 = 0;

/// Brightness offsets (percent) for the top, middle and bottom gradient stops.
pub const BACKGROUND_GRADIENT_STOPS: [i32; 3] = [20, 0, -30];
