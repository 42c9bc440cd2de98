use std::time::Duration;

use bevy::color::Mix;
use bevy::pbr::DistanceFog;
use bevy::prelude::*;
use constants::palette::BACKGROUND_GRADIENT_STOPS;
use constants::timing::THEME_BLEND;

use super::state::ThemePreference;
use crate::engine::animation::ease::Ease;
use crate::engine::core::routes::Route;

/// Shift each channel of `#rrggbb` by `percent` of full scale, clamping per channel.
pub fn adjust_brightness(hex: &str, percent: i32) -> Option<String> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 {
        return None;
    }
    let value = u32::from_str_radix(digits, 16).ok()?;
    // Rounds half toward positive infinity.
    let amount = (2.55 * f64::from(percent) + 0.5).floor() as i32;
    let channel = |shift: u32| (((value >> shift) & 0xff) as i32 + amount).clamp(0, 255) as u32;
    Some(format!(
        "#{:06x}",
        channel(16) << 16 | channel(8) << 8 | channel(0)
    ))
}

/// Top, middle and bottom colours of the backdrop gradient for one theme colour.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientStops {
    pub top: LinearRgba,
    pub middle: LinearRgba,
    pub bottom: LinearRgba,
}

impl GradientStops {
    pub fn for_theme(hex: &str) -> Option<Self> {
        let [top, middle, bottom] = BACKGROUND_GRADIENT_STOPS;
        let stop = |percent: i32| -> Option<LinearRgba> {
            let adjusted = adjust_brightness(hex, percent)?;
            Srgba::hex(adjusted).ok().map(LinearRgba::from)
        };
        Some(Self {
            top: stop(top)?,
            middle: stop(middle)?,
            bottom: stop(bottom)?,
        })
    }

    pub fn mix(&self, other: &Self, t: f32) -> Self {
        Self {
            top: self.top.mix(&other.top, t),
            middle: self.middle.mix(&other.middle, t),
            bottom: self.bottom.mix(&other.bottom, t),
        }
    }
}

/// Cross-fade between the previous and the newly selected theme gradient.
#[derive(Resource, Debug, Default)]
pub struct ThemeBlend {
    applied: Option<&'static str>,
    from: Option<GradientStops>,
    to: Option<GradientStops>,
    elapsed: Duration,
}

impl ThemeBlend {
    /// Start blending toward `hex`. The first colour ever applied is shown at once.
    pub fn retarget(&mut self, hex: &'static str) {
        if self.applied == Some(hex) {
            return;
        }
        let Some(stops) = GradientStops::for_theme(hex) else {
            warn!("Theme colour {} is not a hex colour", hex);
            self.applied = Some(hex);
            return;
        };
        self.from = if self.applied.is_some() {
            Some(self.sample().unwrap_or(stops))
        } else {
            Some(stops)
        };
        self.to = Some(stops);
        self.elapsed = Duration::ZERO;
        self.applied = Some(hex);
    }

    pub fn advance(&mut self, dt: Duration) {
        self.elapsed = (self.elapsed + dt).min(THEME_BLEND);
    }

    pub fn is_settled(&self) -> bool {
        self.elapsed >= THEME_BLEND
    }

    pub fn sample(&self) -> Option<GradientStops> {
        let (from, to) = (self.from?, self.to?);
        let t = self.elapsed.as_secs_f32() / THEME_BLEND.as_secs_f32();
        Some(from.mix(&to, Ease::InOutQuad.apply(t)))
    }
}

pub fn blend_theme_background(
    time: Res<Time>,
    preference: Res<ThemePreference>,
    mut blend: ResMut<ThemeBlend>,
    mut clear: ResMut<ClearColor>,
    mut ambient: ResMut<AmbientLight>,
    mut fogs: Query<&mut DistanceFog>,
) {
    blend.retarget(preference.color());
    blend.advance(time.delta());
    let Some(stops) = blend.sample() else {
        return;
    };

    clear.0 = stops.middle.into();
    ambient.color = stops.top.into();
    for mut fog in &mut fogs {
        fog.color = stops.bottom.into();
    }
}

#[derive(Component)]
pub struct ThemeSwitcherButton;

pub fn spawn_theme_switcher(mut commands: Commands, preference: Res<ThemePreference>) {
    let swatch = Srgba::hex(preference.color())
        .map(Color::from)
        .unwrap_or(Color::WHITE);
    commands.spawn((
        Button,
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(24.0),
            right: Val::Px(24.0),
            width: Val::Px(28.0),
            height: Val::Px(28.0),
            border: UiRect::all(Val::Px(2.0)),
            ..default()
        },
        BorderColor(Color::WHITE),
        BorderRadius::MAX,
        BackgroundColor(swatch),
        GlobalZIndex(50),
        ThemeSwitcherButton,
        StateScoped(Route::Home),
    ));
}

pub fn cycle_theme(
    mut preference: ResMut<ThemePreference>,
    mut buttons: Query<
        (&Interaction, &mut BackgroundColor),
        (Changed<Interaction>, With<ThemeSwitcherButton>),
    >,
) {
    for (interaction, mut background) in &mut buttons {
        if *interaction != Interaction::Pressed {
            continue;
        }
        match preference.next_color() {
            Ok(color) => info!("Theme → {}", color),
            Err(err) => warn!("Theme changed to {} but was not saved: {}", preference.color(), err),
        }
        if let Ok(swatch) = Srgba::hex(preference.color()) {
            background.0 = swatch.into();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn brightness_matches_reference_values() {
        assert_eq!(adjust_brightness("#69594a", 20).as_deref(), Some("#9c8c7d"));
        assert_eq!(adjust_brightness("#69594a", 0).as_deref(), Some("#69594a"));
        assert_eq!(adjust_brightness("#69594a", -30).as_deref(), Some("#1d0d00"));
    }

    #[test]
    fn channels_clamp_at_both_ends() {
        assert_eq!(adjust_brightness("#fefefe", 20).as_deref(), Some("#ffffff"));
        assert_eq!(adjust_brightness("#010101", -30).as_deref(), Some("#000000"));
        assert_eq!(adjust_brightness("#zzzzzz", 10), None);
        assert_eq!(adjust_brightness("#fff", 10), None);
    }

    #[test]
    fn first_colour_snaps_then_later_ones_blend() {
        let mut blend = ThemeBlend::default();
        blend.retarget("#69594a");
        let first = GradientStops::for_theme("#69594a").unwrap();
        blend.advance(THEME_BLEND);
        assert_eq!(blend.sample(), Some(first));

        blend.retarget("#0690d4");
        let next = GradientStops::for_theme("#0690d4").unwrap();
        assert_eq!(blend.sample(), Some(first));
        blend.advance(THEME_BLEND / 2);
        let halfway = blend.sample().unwrap();
        assert_ne!(halfway, first);
        assert_ne!(halfway, next);
        blend.advance(THEME_BLEND);
        assert!(blend.is_settled());
        assert_eq!(blend.sample(), Some(next));
    }
}
