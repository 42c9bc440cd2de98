/// Custom font families and the files backing them.
pub const TITLE_FONT: &str = "fonts/a2.otf";
pub const NAME_FONT: &str = "fonts/name.ttf";
pub const BODY_FONT: &str = "fonts/mon.ttf";
pub const LINE_FONT: &str = "fonts/soria-font.ttf";

/// Every custom font the fonts probe waits on.
pub const CUSTOM_FONTS: &[&str] = &[TITLE_FONT, NAME_FONT, BODY_FONT, LINE_FONT];

pub const HOME_IMAGES: &[&str] = &["images/a4.jpeg", "images/bride3.jpg"];

pub const GROOM_IMAGES: &[&str] = &[
    "images/groom/main.jpg",
    "images/groom/section1.png",
    "images/groom/section2.png",
    "images/groom/section3.png",
    "images/groom/namelogo.png",
    "images/groom/qr.png",
];

pub const BRIDE_IMAGES: &[&str] = &[
    "images/bride/sontrangmain.jpg",
    "images/bride/sontrang1.png",
    "images/bride/sontrang2.png",
    "images/bride/sontrang4.png",
    "images/bride/namelogo.png",
    "images/bride/qrkha1.png",
];

/// Portraits shown on the home page experience panel.
pub const GROOM_PORTRAIT: &str = "images/a4.jpeg";
pub const BRIDE_PORTRAIT: &str = "images/bride3.jpg";

pub const BACKGROUND_TRACK: &str = "audio/a.mp3";
pub const BACKGROUND_VOLUME: f32 = 0.5;

/// Venue location opened in a new browsing context from section three.
pub const MAPS_URL: &str = "https://maps.app.goo.gl/NnjenWecVAneT86dA";
