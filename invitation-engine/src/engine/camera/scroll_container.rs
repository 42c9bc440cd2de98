use bevy::input::mouse::MouseWheel;
use bevy::input::touch::TouchPhase;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use constants::scroll_rig::{SCROLL_DAMPING, SCROLL_PAGES};

use crate::engine::animation::ease::{damp, range};
use crate::engine::handoff::animator::ScrollSurface;
use crate::engine::loading::sequencer::LoadingSequencer;
use crate::engine::sections::systems::wheel_delta_px;

/// Virtual scroll container of the home page.
///
/// `scroll_height` stays zero until the page has been revealed and the
/// window measured, the same way a hidden element reports no height.
#[derive(Resource, Debug, Default, Clone)]
pub struct ScrollContainer {
    scroll_top: f32,
    viewport_height: f32,
    measured: bool,
    offset: f32,
    drag_last_y: Option<f32>,
}

impl ScrollContainer {
    /// Record the viewport height. The content spans `SCROLL_PAGES` viewports.
    pub fn measure(&mut self, viewport_height: f32) {
        if viewport_height <= 0.0 {
            return;
        }
        self.viewport_height = viewport_height;
        self.measured = true;
        self.scroll_top = self.scroll_top.clamp(0.0, self.max_scroll_top());
    }

    pub fn is_measured(&self) -> bool {
        self.measured
    }

    pub fn viewport_height(&self) -> f32 {
        self.viewport_height
    }

    pub fn max_scroll_top(&self) -> f32 {
        (self.scroll_height() - self.viewport_height).max(0.0)
    }

    pub fn scroll_by(&mut self, delta: f32) {
        let top = self.scroll_top + delta;
        self.set_scroll_top(top);
    }

    /// Undamped scroll progress in `[0, 1]`.
    pub fn progress(&self) -> f32 {
        let max = self.max_scroll_top();
        if max <= 0.0 {
            return 0.0;
        }
        (self.scroll_top / max).clamp(0.0, 1.0)
    }

    /// Damped offset used by everything that renders from the scroll position.
    pub fn offset(&self) -> f32 {
        self.offset
    }

    /// Position of the offset within `[from, from + distance]`, see [`range`].
    pub fn range(&self, from: f32, distance: f32) -> f32 {
        range(self.offset, from, distance)
    }

    pub fn update(&mut self, dt: f32) {
        self.offset = damp(self.offset, self.progress(), SCROLL_DAMPING, dt);
    }

    pub fn drag_start(&mut self, y: f32) {
        self.drag_last_y = Some(y);
    }

    pub fn drag_move(&mut self, y: f32) {
        if let Some(last) = self.drag_last_y.replace(y) {
            self.scroll_by(last - y);
        }
    }

    pub fn drag_end(&mut self) {
        self.drag_last_y = None;
    }
}

impl ScrollSurface for ScrollContainer {
    fn scroll_height(&self) -> f32 {
        if self.measured {
            self.viewport_height * SCROLL_PAGES
        } else {
            0.0
        }
    }

    fn scroll_top(&self) -> f32 {
        self.scroll_top
    }

    fn set_scroll_top(&mut self, top: f32) {
        if !top.is_finite() {
            return;
        }
        self.scroll_top = top.clamp(0.0, self.max_scroll_top());
    }

    fn max_scroll_top(&self) -> f32 {
        ScrollContainer::max_scroll_top(self)
    }
}

/// Measure the container once the page content is visible, and again on resize.
pub fn measure_scroll_container(
    sequencer: Res<LoadingSequencer>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut container: ResMut<ScrollContainer>,
) {
    if !sequencer.is_revealed() {
        return;
    }
    let Ok(window) = windows.single() else {
        return;
    };
    let height = window.height();
    if !container.is_measured() || (container.viewport_height() - height).abs() > f32::EPSILON {
        debug!("Scroll container measured at {:.0}px viewport", height);
        container.measure(height);
    }
}

pub fn scroll_container_input(
    mut wheel: EventReader<MouseWheel>,
    mut touches: EventReader<TouchInput>,
    mut container: ResMut<ScrollContainer>,
) {
    for event in wheel.read() {
        container.scroll_by(wheel_delta_px(event));
    }
    for touch in touches.read() {
        match touch.phase {
            TouchPhase::Started => container.drag_start(touch.position.y),
            TouchPhase::Moved => container.drag_move(touch.position.y),
            TouchPhase::Ended | TouchPhase::Canceled => container.drag_end(),
        }
    }
}

pub fn update_scroll_offset(time: Res<Time>, mut container: ResMut<ScrollContainer>) {
    container.update(time.delta_secs());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unmeasured_container_has_no_height() {
        let mut container = ScrollContainer::default();
        assert_eq!(container.scroll_height(), 0.0);
        container.scroll_by(500.0);
        assert_eq!(container.scroll_top(), 0.0);
    }

    #[test]
    fn scroll_top_is_clamped_to_the_last_viewport() {
        let mut container = ScrollContainer::default();
        container.measure(800.0);
        assert_eq!(container.scroll_height(), 3200.0);
        container.set_scroll_top(3200.0 * 0.85);
        assert_eq!(container.scroll_top(), 2400.0);
        assert_eq!(container.progress(), 1.0);
        container.scroll_by(-10_000.0);
        assert_eq!(container.scroll_top(), 0.0);
    }

    #[test]
    fn drag_scrolls_against_the_finger() {
        let mut container = ScrollContainer::default();
        container.measure(800.0);
        container.drag_start(600.0);
        container.drag_move(400.0);
        assert_eq!(container.scroll_top(), 200.0);
        container.drag_end();
        container.drag_move(100.0);
        assert_eq!(container.scroll_top(), 200.0);
    }

    #[test]
    fn offset_eases_toward_progress() {
        let mut container = ScrollContainer::default();
        container.measure(1000.0);
        container.set_scroll_top(1500.0);
        container.update(0.1);
        assert!(container.offset() > 0.0 && container.offset() < 0.5);
        for _ in 0..200 {
            container.update(0.05);
        }
        assert!((container.offset() - 0.5).abs() < 1e-3);
    }
}
