use bevy::prelude::*;
use constants::render_settings::DEBUG_TEXT;

use crate::engine::loading::probe::ResourceClass;
use crate::engine::loading::progress::LoadingStatus;
use crate::engine::loading::sequencer::LoadingSequencer;

#[derive(Component)]
pub struct DebugReadout;

pub fn spawn_debug_readout(parent: &mut ChildSpawnerCommands) {
    parent.spawn((
        Text::new(""),
        TextFont {
            font_size: 12.0,
            ..default()
        },
        TextColor(DEBUG_TEXT),
        Node {
            position_type: PositionType::Absolute,
            bottom: Val::Px(12.0),
            right: Val::Px(12.0),
            ..default()
        },
        DebugReadout,
    ));
}

pub fn debug_readout_text(status: &LoadingStatus, sequencer: &LoadingSequencer) -> String {
    let mut lines: Vec<String> = ResourceClass::ALL
        .iter()
        .map(|class| {
            let mark = if status.is_set(*class) { "ok" } else { ".." };
            format!("{}: {mark}", class.label())
        })
        .collect();
    lines.push(format!(
        "Phase: {:?} ({:.0}%)",
        sequencer.phase(),
        sequencer.progress()
    ));
    lines.join("\n")
}

pub fn update_debug_readout(
    status: Res<LoadingStatus>,
    sequencer: Res<LoadingSequencer>,
    mut query: Query<&mut Text, With<DebugReadout>>,
) {
    for mut text in &mut query {
        text.0 = debug_readout_text(&status, &sequencer);
    }
}
