use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use constants::timing::{PARALLAX_DAMPING, PARALLAX_RANGE_PX};

use crate::engine::animation::ease::damp;

/// Viewports narrower than this are treated as touch devices.
pub const DESKTOP_MIN_WIDTH: f32 = 768.0;

/// A relatively positioned wrapper that drifts with the pointer.
#[derive(Component, Debug, Clone, Copy)]
pub struct ParallaxLayer {
    /// Scale applied to the pointer offset on each axis.
    pub factor: Vec2,
    pub offset: Vec2,
}

impl ParallaxLayer {
    pub fn new(factor: Vec2) -> Self {
        Self {
            factor,
            offset: Vec2::ZERO,
        }
    }

    /// Background layers drift against the pointer.
    pub fn background() -> Self {
        Self::new(Vec2::splat(-1.0))
    }

    pub fn title() -> Self {
        Self::new(Vec2::new(0.5, 0.3))
    }

    /// Section elements drift more the later they sit in the section.
    pub fn element(order: usize) -> Self {
        let order = order as f32;
        Self::new(Vec2::new(0.2 + order * 0.1, 0.15 + order * 0.05))
    }
}

/// Pointer displacement from the viewport centre, scaled to the parallax range.
pub fn pointer_offset(cursor: Vec2, viewport: Vec2) -> Vec2 {
    if viewport.x <= 0.0 || viewport.y <= 0.0 {
        return Vec2::ZERO;
    }
    (cursor / viewport - Vec2::splat(0.5)) * PARALLAX_RANGE_PX
}

pub fn is_desktop(window: &Window) -> bool {
    window.width() >= DESKTOP_MIN_WIDTH
}

/// Ease every parallax layer toward its pointer-derived target.
pub fn mouse_parallax(
    time: Res<Time>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut layers: Query<(&mut ParallaxLayer, &mut Node)>,
) {
    let Ok(window) = windows.single() else {
        return;
    };
    if !is_desktop(window) {
        return;
    }
    let Some(cursor) = window.cursor_position() else {
        return;
    };

    let pointer = pointer_offset(cursor, window.size());
    let dt = time.delta_secs();
    for (mut layer, mut node) in &mut layers {
        let target = pointer * layer.factor;
        layer.offset = Vec2::new(
            damp(layer.offset.x, target.x, PARALLAX_DAMPING, dt),
            damp(layer.offset.y, target.y, PARALLAX_DAMPING, dt),
        );
        node.left = Val::Px(layer.offset.x);
        node.top = Val::Px(layer.offset.y);
    }
}
