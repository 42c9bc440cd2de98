use std::f32::consts::{PI, TAU};

use bevy::math::EulerRot;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use constants::scroll_rig::{
    CAMERA_START, DESCENT_DAMPING, DESCENT_DEPTH, DESCENT_RANGE, DOLLY_DAMPING, DOLLY_DISTANCE,
    DOLLY_RANGE, EXPERIENCE_RANGE, POINTER_YAW_LERP, PORTRAIT_GAP, PORTRAIT_WIDTH, TILT_DAMPING,
    TILT_RANGE,
};

use super::scroll_container::ScrollContainer;
use crate::engine::animation::ease::{damp, lerp, range};
use crate::engine::core::routes::{NavigateTo, Route};
use crate::engine::sections::parallax::is_desktop;

/// Local offset of the experience panel in front of the camera.
const PANEL_DEPTH: f32 = -8.0;
const PANEL_SHOWN_Y: f32 = -1.0;
const PANEL_HIDDEN_Y: f32 = -30.0;

/// Scroll-driven camera. Angles are tracked here rather than read back from
/// the rotation, which loses yaw once the tilt reaches straight down.
#[derive(Component, Debug, Default, Clone, Copy)]
pub struct RigCamera {
    yaw: f32,
    tilt: f32,
}

/// Group holding the two portrait cards. Parented to the rig camera.
#[derive(Component)]
pub struct ExperiencePanel;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardSide {
    Left,
    Right,
}

impl CardSide {
    pub fn sign(self) -> f32 {
        match self {
            Self::Left => -1.0,
            Self::Right => 1.0,
        }
    }
}

/// One clickable portrait on the experience panel.
#[derive(Component, Debug, Clone, Copy)]
pub struct PortraitCard {
    pub side: CardSide,
    pub route: Route,
    pub hovered: bool,
}

impl PortraitCard {
    pub fn new(side: CardSide, route: Route) -> Self {
        Self {
            side,
            route,
            hovered: false,
        }
    }
}

/// Camera targets for a scroll offset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RigPose {
    pub tilt: f32,
    pub height: f32,
    pub depth: f32,
}

impl RigPose {
    pub fn at(offset: f32) -> Self {
        Self {
            tilt: -0.5 * PI * range(offset, TILT_RANGE.0, TILT_RANGE.1),
            height: -DESCENT_DEPTH * range(offset, DESCENT_RANGE.0, DESCENT_RANGE.1),
            depth: CAMERA_START.z + DOLLY_DISTANCE * range(offset, DOLLY_RANGE.0, DOLLY_RANGE.1),
        }
    }
}

/// Yaw the camera drifts toward for a pointer at normalised `x` in `[-1, 1]`.
pub fn pointer_yaw(x: f32) -> f32 {
    -(x * PI) / 90.0
}

/// How far into the experience range the offset is. The panel shows when positive.
pub fn experience_reveal(offset: f32) -> f32 {
    range(offset, EXPERIENCE_RANGE.0, EXPERIENCE_RANGE.1)
}

/// Horizontal resting place of a card; the two close in as the panel reveals.
pub fn card_x(side: CardSide, reveal: f32) -> f32 {
    let gap = PORTRAIT_GAP * (1.0 - reveal.min(1.0));
    side.sign() * (PORTRAIT_WIDTH / 2.01 + gap)
}

pub fn drive_scroll_rig(
    time: Res<Time>,
    container: Res<ScrollContainer>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut cameras: Query<(&mut RigCamera, &mut Transform)>,
) {
    let Ok((mut rig, mut transform)) = cameras.single_mut() else {
        return;
    };
    let dt = time.delta_secs();
    let pose = RigPose::at(container.offset());

    if let Ok(window) = windows.single() {
        if is_desktop(window) {
            if let Some(cursor) = window.cursor_position() {
                let x = cursor.x / window.width() * 2.0 - 1.0;
                rig.yaw = lerp(rig.yaw, pointer_yaw(x), POINTER_YAW_LERP);
            }
        }
    }

    rig.tilt = damp(rig.tilt, pose.tilt, TILT_DAMPING, dt);
    transform.rotation = Quat::from_euler(EulerRot::YXZ, rig.yaw, rig.tilt, 0.0);
    transform.translation.y = damp(transform.translation.y, pose.height, DESCENT_DAMPING, dt);
    transform.translation.z = damp(transform.translation.z, pose.depth, DOLLY_DAMPING, dt);
}

pub fn drive_experience_panel(
    time: Res<Time>,
    container: Res<ScrollContainer>,
    mut panels: Query<(&mut Transform, &mut Visibility), With<ExperiencePanel>>,
    mut cards: Query<(&PortraitCard, &mut Transform), Without<ExperiencePanel>>,
) {
    let reveal = experience_reveal(container.offset());
    let shown = reveal > 0.0;

    for (mut transform, mut visibility) in &mut panels {
        transform.translation = Vec3::new(
            0.0,
            if shown { PANEL_SHOWN_Y } else { PANEL_HIDDEN_Y },
            PANEL_DEPTH,
        );
        *visibility = if shown {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
    }
    if !shown {
        return;
    }

    let dt = time.delta_secs();
    let now = time.elapsed_secs();
    let sway = (container.offset() * TAU).sin() * 0.5;
    for (card, mut transform) in &mut cards {
        let base_y = -card.side.sign() * sway;
        let (target_y, target_z, target_scale) = if card.hovered {
            (base_y + (now * 2.0).sin() * 0.1, 0.3, 1.05)
        } else {
            (base_y, 0.0, 1.0)
        };
        let lambda = if card.hovered { 8.0 } else { 3.0 };

        transform.translation.x = damp(transform.translation.x, card_x(card.side, reveal), 4.0, dt);
        transform.translation.y = damp(transform.translation.y, target_y, lambda, dt);
        transform.translation.z = damp(transform.translation.z, target_z, 6.0, dt);
        transform.scale = Vec3::splat(damp(transform.scale.x, target_scale, 10.0, dt));
    }
}

pub fn portrait_hover_start(trigger: Trigger<Pointer<Over>>, mut cards: Query<&mut PortraitCard>) {
    if let Ok(mut card) = cards.get_mut(trigger.target()) {
        card.hovered = true;
    }
}

pub fn portrait_hover_end(trigger: Trigger<Pointer<Out>>, mut cards: Query<&mut PortraitCard>) {
    if let Ok(mut card) = cards.get_mut(trigger.target()) {
        card.hovered = false;
    }
}

pub fn portrait_clicked(
    trigger: Trigger<Pointer<Click>>,
    cards: Query<&PortraitCard>,
    mut navigate: EventWriter<NavigateTo>,
) {
    if let Ok(card) = cards.get(trigger.target()) {
        navigate.write(NavigateTo(card.route));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pose_starts_at_rest() {
        let pose = RigPose::at(0.0);
        assert_eq!(pose.tilt, 0.0);
        assert_eq!(pose.height, 0.0);
        assert_eq!(pose.depth, CAMERA_START.z);
    }

    #[test]
    fn pose_fully_scrolled() {
        let pose = RigPose::at(1.0);
        assert!((pose.tilt + 0.5 * PI).abs() < 1e-6);
        assert_eq!(pose.height, -DESCENT_DEPTH);
        // The dolly only starts at 0.85 and runs for 0.18, so it is not complete yet.
        let dolly = (1.0 - DOLLY_RANGE.0) / DOLLY_RANGE.1;
        assert!((pose.depth - (CAMERA_START.z + DOLLY_DISTANCE * dolly)).abs() < 1e-4);
    }

    #[test]
    fn experience_shows_past_its_range_start() {
        assert_eq!(experience_reveal(0.5), 0.0);
        assert_eq!(experience_reveal(0.8), 0.0);
        assert!(experience_reveal(0.9) > 0.0);
        assert_eq!(experience_reveal(1.0), 1.0);
    }

    #[test]
    fn cards_close_the_gap_as_they_reveal() {
        let apart = card_x(CardSide::Right, 0.0);
        let together = card_x(CardSide::Right, 1.0);
        assert!(apart > together);
        assert_eq!(card_x(CardSide::Left, 0.4), -card_x(CardSide::Right, 0.4));
    }

    #[test]
    fn pointer_yaw_is_small_and_opposed() {
        assert!(pointer_yaw(1.0) < 0.0);
        assert!((pointer_yaw(-1.0) - PI / 90.0).abs() < 1e-6);
    }
}
