use bevy::prelude::*;
use bevy::ui::FocusPolicy;
use constants::render_settings::{
    BODY_FONT_SIZE, INK, OVERLAY_BACKGROUND, OVERLAY_Z, PROGRESS_BAR_HEIGHT_PX,
    PROGRESS_BAR_WIDTH_PX, PROGRESS_FILL, PROGRESS_TRACK,
};

use super::progress::LoadingStatus;
use super::sequencer::LoadingSequencer;
use crate::engine::core::routes::Route;
use crate::engine::systems::debug_readout::spawn_debug_readout;
use crate::engine::systems::opacity::Fadeable;

#[derive(Component)]
pub struct LoadingOverlay;

/// Any entity whose alpha follows the overlay fade.
#[derive(Component)]
pub struct OverlayPart;

#[derive(Component)]
pub struct ProgressFill;

#[derive(Component)]
pub struct ProgressLabel;

#[derive(Component)]
pub struct StatusLine;

/// Spawn the full-screen loading overlay for the route being entered.
pub fn spawn_loading_overlay(mut commands: Commands, route: Res<State<Route>>) {
    let route = *route.get();

    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                row_gap: Val::Px(16.0),
                ..default()
            },
            BackgroundColor(OVERLAY_BACKGROUND),
            GlobalZIndex(OVERLAY_Z),
            FocusPolicy::Block,
            Fadeable::new(OVERLAY_BACKGROUND.alpha()),
            LoadingOverlay,
            OverlayPart,
            StateScoped(route),
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("Loading fonts..."),
                TextFont {
                    font_size: BODY_FONT_SIZE,
                    ..default()
                },
                TextColor(INK),
                Fadeable::new(INK.alpha()),
                OverlayPart,
                StatusLine,
            ));

            parent
                .spawn((
                    Node {
                        width: Val::Px(PROGRESS_BAR_WIDTH_PX),
                        max_width: Val::Percent(80.0),
                        height: Val::Px(PROGRESS_BAR_HEIGHT_PX),
                        ..default()
                    },
                    BackgroundColor(PROGRESS_TRACK),
                    Fadeable::new(PROGRESS_TRACK.alpha()),
                    OverlayPart,
                ))
                .with_children(|track| {
                    track.spawn((
                        Node {
                            width: Val::Percent(0.0),
                            height: Val::Percent(100.0),
                            ..default()
                        },
                        BackgroundColor(PROGRESS_FILL),
                        Fadeable::new(PROGRESS_FILL.alpha()),
                        OverlayPart,
                        ProgressFill,
                    ));
                });

            parent.spawn((
                Text::new("0%"),
                TextFont {
                    font_size: BODY_FONT_SIZE,
                    ..default()
                },
                TextColor(INK),
                Fadeable::new(INK.alpha()),
                OverlayPart,
                ProgressLabel,
            ));

            if cfg!(debug_assertions) {
                spawn_debug_readout(parent);
            }
        });
}

/// Push sequencer state into the overlay widgets.
pub fn update_loading_overlay(
    sequencer: Res<LoadingSequencer>,
    status: Res<LoadingStatus>,
    mut fill: Query<&mut Node, With<ProgressFill>>,
    mut label: Query<&mut Text, (With<ProgressLabel>, Without<StatusLine>)>,
    mut line: Query<&mut Text, (With<StatusLine>, Without<ProgressLabel>)>,
) {
    let progress = sequencer.progress();

    for mut node in &mut fill {
        node.width = Val::Percent(progress);
    }
    for mut text in &mut label {
        text.0 = format!("{}%", progress.round() as u32);
    }
    for mut text in &mut line {
        text.0 = status.status_line().to_string();
    }
}

pub fn fade_loading_overlay(
    sequencer: Res<LoadingSequencer>,
    mut parts: Query<
        (
            &Fadeable,
            Option<&mut TextColor>,
            Option<&mut BackgroundColor>,
        ),
        With<OverlayPart>,
    >,
) {
    let opacity = sequencer.overlay_opacity();
    for (fadeable, text, background) in &mut parts {
        fadeable.apply(opacity, text, None, background);
    }
}

/// Remove the overlay from paint and interaction once the page is revealed.
pub fn hide_loading_overlay(mut overlays: Query<(&mut Visibility, &mut Node), With<LoadingOverlay>>) {
    for (mut visibility, mut node) in &mut overlays {
        *visibility = Visibility::Hidden;
        node.display = Display::None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::ecs::system::RunSystemOnce;

    #[test]
    fn overlay_swallows_clicks_meant_for_the_page() {
        let mut world = World::new();
        world.insert_resource(State::new(Route::Bride));

        world.run_system_once(spawn_loading_overlay).unwrap();

        let mut roots = world.query_filtered::<&FocusPolicy, With<LoadingOverlay>>();
        let policies: Vec<_> = roots.iter(&world).copied().collect();
        assert_eq!(policies, vec![FocusPolicy::Block]);
    }
}
