use bevy::audio::{AudioSinkPlayback, Volume};
use bevy::prelude::*;
use constants::assets::{BACKGROUND_TRACK, BACKGROUND_VOLUME};
use constants::render_settings::BODY_FONT_SIZE;

use crate::engine::core::routes::Route;

/// Whether the guest wants the background track playing. Survives navigation.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct MusicPreference {
    pub playing: bool,
}

impl Default for MusicPreference {
    fn default() -> Self {
        Self { playing: true }
    }
}

impl MusicPreference {
    pub fn toggle(&mut self) -> bool {
        self.playing = !self.playing;
        self.playing
    }

    pub fn label(&self) -> &'static str {
        if self.playing { "Sound on" } else { "Sound off" }
    }
}

#[derive(Component)]
pub struct BackgroundMusic;

#[derive(Component)]
pub struct MusicToggleButton;

/// Start the looping track and its toggle on the home page.
pub fn spawn_background_music(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    preference: Res<MusicPreference>,
) {
    let settings = PlaybackSettings {
        paused: !preference.playing,
        ..PlaybackSettings::LOOP.with_volume(Volume::Linear(BACKGROUND_VOLUME))
    };
    commands.spawn((
        AudioPlayer::new(asset_server.load(BACKGROUND_TRACK)),
        settings,
        BackgroundMusic,
        StateScoped(Route::Home),
    ));

    commands
        .spawn((
            Button,
            Node {
                position_type: PositionType::Absolute,
                top: Val::Px(26.0),
                right: Val::Px(64.0),
                padding: UiRect::all(Val::Px(6.0)),
                ..default()
            },
            GlobalZIndex(50),
            MusicToggleButton,
            StateScoped(Route::Home),
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new(preference.label()),
                TextFont {
                    font_size: BODY_FONT_SIZE * 0.8,
                    ..default()
                },
                TextColor(Color::WHITE),
            ));
        });
}

pub fn toggle_background_music(
    mut preference: ResMut<MusicPreference>,
    buttons: Query<(&Interaction, &Children), (Changed<Interaction>, With<MusicToggleButton>)>,
    mut labels: Query<&mut Text>,
    sinks: Query<&AudioSink, With<BackgroundMusic>>,
) {
    for (interaction, children) in &buttons {
        if *interaction != Interaction::Pressed {
            continue;
        }

        let playing = preference.toggle();
        for sink in &sinks {
            if playing {
                sink.play();
            } else {
                sink.pause();
            }
        }
        for index in 0..children.len() {
            if let Ok(mut text) = labels.get_mut(children[index]) {
                text.0 = preference.label().to_string();
            }
        }
        info!("Background music {}", if playing { "resumed" } else { "paused" });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_flips_and_labels() {
        let mut preference = MusicPreference::default();
        assert!(preference.playing);
        assert!(!preference.toggle());
        assert_eq!(preference.label(), "Sound off");
        assert!(preference.toggle());
        assert_eq!(preference.label(), "Sound on");
    }
}
