use bevy::prelude::*;
use constants::palette::{DEFAULT_THEME_INDEX, THEME_COLORS};

use super::storage::{ThemeStore, decode, encode};
use crate::error::InvitationResult;

/// Position in the fixed palette. Anything outside the palette maps to the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeState {
    index: usize,
}

impl Default for ThemeState {
    fn default() -> Self {
        Self {
            index: DEFAULT_THEME_INDEX,
        }
    }
}

impl ThemeState {
    pub fn from_color(color: &str) -> Self {
        THEME_COLORS
            .iter()
            .position(|candidate| candidate.eq_ignore_ascii_case(color))
            .map(|index| Self { index })
            .unwrap_or_default()
    }

    pub fn color(&self) -> &'static str {
        THEME_COLORS[self.index]
    }

    pub fn next_color(&mut self) -> &'static str {
        self.index = (self.index + 1) % THEME_COLORS.len();
        self.color()
    }
}

/// The guest's accent colour together with where it is persisted.
#[derive(Resource)]
pub struct ThemePreference {
    state: ThemeState,
    store: Box<dyn ThemeStore>,
}

impl ThemePreference {
    /// Restore from `store`; unreadable or unknown records fall back to the default.
    pub fn load(store: Box<dyn ThemeStore>) -> Self {
        let state = match store.load().and_then(|raw| match raw {
            Some(raw) => decode(&raw),
            None => Ok(None),
        }) {
            Ok(Some(record)) => ThemeState::from_color(&record.color),
            Ok(None) => ThemeState::default(),
            Err(err) => {
                warn!("Ignoring stored theme: {}", err);
                ThemeState::default()
            }
        };
        Self { state, store }
    }

    pub fn color(&self) -> &'static str {
        self.state.color()
    }

    /// Advance to the next palette colour and persist it. The in-memory colour
    /// changes even when persisting fails.
    pub fn next_color(&mut self) -> InvitationResult<&'static str> {
        let color = self.state.next_color();
        self.store.save(&encode(color)?)?;
        Ok(color)
    }
}

/// Restore the persisted theme. Called while the app is built, before any route mounts.
pub fn load_platform_theme() -> ThemePreference {
    let preference = ThemePreference::load(Box::new(super::storage::PlatformThemeStore));
    info!("Theme restored: {}", preference.color());
    preference
}
