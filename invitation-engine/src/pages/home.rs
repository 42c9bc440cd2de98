use std::time::Duration;

use bevy::pbr::{DistanceFog, FogFalloff};
use bevy::prelude::*;
use constants::assets::{BODY_FONT, BRIDE_PORTRAIT, GROOM_PORTRAIT, LINE_FONT, TITLE_FONT};
use constants::render_settings::{BODY_FONT_SIZE, TITLE_FONT_SIZE};
use constants::scroll_rig::{CAMERA_START, PORTRAIT_HEIGHT, PORTRAIT_WIDTH};

use crate::engine::animation::ease::{Ease, range};
use crate::engine::animation::tween::Tween;
use crate::engine::camera::scroll_container::ScrollContainer;
use crate::engine::camera::scroll_rig::{
    CardSide, ExperiencePanel, PortraitCard, RigCamera, card_x, portrait_clicked,
    portrait_hover_end, portrait_hover_start,
};
use crate::engine::core::routes::Route;
use crate::engine::loading::sequencer::LoadingSequencer;
use crate::engine::systems::opacity::Fadeable;

const HERO_RISE_PX: f32 = 200.0;
const HERO_RISE: Duration = Duration::from_secs(3);
/// The hero heading is gone once the camera starts tilting away.
const HERO_SCROLL_FADE: (f32, f32) = (0.0, 0.15);
/// Scroll range over which the experience heading fades in.
const EXPERIENCE_TITLE_RANGE: (f32, f32) = (0.7, 0.2);

/// Greeting shown before the guest starts scrolling. Rises into place on reveal.
#[derive(Component, Debug)]
pub struct HeroTitle {
    rise: Option<Tween>,
}

impl HeroTitle {
    fn new() -> Self {
        Self {
            rise: Tween::new(HERO_RISE_PX, 0.0, HERO_RISE, Ease::OutCubic).ok(),
        }
    }
}

/// Heading above the experience panel.
#[derive(Component)]
pub struct ExperienceTitle;

pub fn hero_opacity(content: f32, offset: f32) -> f32 {
    content * (1.0 - range(offset, HERO_SCROLL_FADE.0, HERO_SCROLL_FADE.1))
}

pub fn experience_title_opacity(offset: f32) -> f32 {
    range(offset, EXPERIENCE_TITLE_RANGE.0, EXPERIENCE_TITLE_RANGE.1)
}

pub fn spawn_home_scene(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let card = meshes.add(Rectangle::new(PORTRAIT_WIDTH, PORTRAIT_HEIGHT));

    commands
        .spawn((
            Camera3d::default(),
            Transform::from_translation(CAMERA_START),
            DistanceFog {
                falloff: FogFalloff::Linear {
                    start: 20.0,
                    end: 80.0,
                },
                ..default()
            },
            RigCamera::default(),
            StateScoped(Route::Home),
        ))
        .with_children(|camera| {
            camera
                .spawn((Transform::default(), Visibility::Hidden, ExperiencePanel))
                .with_children(|panel| {
                    for (side, route, portrait) in [
                        (CardSide::Left, Route::Groom, GROOM_PORTRAIT),
                        (CardSide::Right, Route::Bride, BRIDE_PORTRAIT),
                    ] {
                        let material = materials.add(StandardMaterial {
                            base_color_texture: Some(asset_server.load(portrait)),
                            unlit: true,
                            ..default()
                        });
                        panel
                            .spawn((
                                Mesh3d(card.clone()),
                                MeshMaterial3d(material),
                                Transform::from_xyz(card_x(side, 0.0), 0.0, 0.0),
                                PortraitCard::new(side, route),
                            ))
                            .observe(portrait_clicked)
                            .observe(portrait_hover_start)
                            .observe(portrait_hover_end);
                    }
                });
        });
}

pub fn spawn_home_overlay(mut commands: Commands, asset_server: Res<AssetServer>) {
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                width: Val::Percent(100.0),
                top: Val::Percent(22.0),
                flex_direction: FlexDirection::Column,
                align_items: AlignItems::Center,
                row_gap: Val::Px(12.0),
                ..default()
            },
            StateScoped(Route::Home),
        ))
        .with_children(|hero| {
            hero.spawn((
                Text::new("Xin chào, Tụi mình sắp cưới rồi !"),
                TextFont {
                    font: asset_server.load(TITLE_FONT),
                    font_size: TITLE_FONT_SIZE,
                    ..default()
                },
                TextColor(Color::WHITE.with_alpha(0.0)),
                Fadeable::opaque(),
                HeroTitle::new(),
            ));
            hero.spawn((
                Text::new("(Bạn vui lòng kéo xuống nhé)"),
                TextFont {
                    font: asset_server.load(BODY_FONT),
                    font_size: BODY_FONT_SIZE * 1.4,
                    ..default()
                },
                TextColor(Color::WHITE.with_alpha(0.0)),
                Fadeable::new(0.85),
                HeroTitle::new(),
            ));
        });

    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                width: Val::Percent(100.0),
                top: Val::Percent(8.0),
                justify_content: JustifyContent::Center,
                ..default()
            },
            StateScoped(Route::Home),
        ))
        .with_children(|row| {
            row.spawn((
                Text::new("HAPPY WEDDING"),
                TextFont {
                    font: asset_server.load(LINE_FONT),
                    font_size: TITLE_FONT_SIZE,
                    ..default()
                },
                TextColor(Color::WHITE.with_alpha(0.0)),
                Fadeable::opaque(),
                ExperienceTitle,
            ));
        });
}

pub fn animate_hero(
    time: Res<Time>,
    sequencer: Res<LoadingSequencer>,
    container: Res<ScrollContainer>,
    mut heroes: Query<(&mut HeroTitle, &Fadeable, &mut TextColor, &mut Node)>,
) {
    let opacity = hero_opacity(sequencer.content_opacity(), container.offset());
    for (mut hero, fadeable, text, mut node) in &mut heroes {
        if sequencer.is_revealed() {
            if let Some(rise) = hero.rise.as_mut() {
                node.top = Val::Px(rise.advance(time.delta()));
            }
        } else if let Some(rise) = hero.rise.as_ref() {
            node.top = Val::Px(rise.value());
        }
        fadeable.apply(opacity, Some(text), None, None);
    }
}

pub fn fade_experience_title(
    container: Res<ScrollContainer>,
    mut titles: Query<(&Fadeable, &mut TextColor), With<ExperienceTitle>>,
) {
    let opacity = experience_title_opacity(container.offset());
    for (fadeable, text) in &mut titles {
        fadeable.apply(opacity, Some(text), None, None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hero_fades_as_the_guest_scrolls() {
        assert_eq!(hero_opacity(1.0, 0.0), 1.0);
        assert_eq!(hero_opacity(0.0, 0.0), 0.0);
        assert!(hero_opacity(1.0, 0.1) < 1.0);
        assert_eq!(hero_opacity(1.0, 0.5), 0.0);
    }

    #[test]
    fn experience_title_appears_near_the_end() {
        assert_eq!(experience_title_opacity(0.5), 0.0);
        assert!(experience_title_opacity(0.8) > 0.0);
        assert_eq!(experience_title_opacity(0.95), 1.0);
    }

    #[test]
    fn hero_rise_is_buildable() {
        let hero = HeroTitle::new();
        assert_eq!(hero.rise.map(|rise| rise.value()), Some(HERO_RISE_PX));
    }
}
