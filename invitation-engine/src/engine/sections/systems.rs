use bevy::input::mouse::{MouseScrollUnit, MouseWheel};
use bevy::input::touch::TouchPhase;
use bevy::prelude::*;
use constants::render_settings::{INDICATOR_ACTIVE, INDICATOR_IDLE};
use constants::scroll_rig::PIXELS_PER_LINE;

use super::controller::{ChangeOutcome, SectionController, SectionPhase};
use super::input::NavigationInput;
use crate::engine::loading::sequencer::LoadingSequencer;
use crate::engine::systems::opacity::Fadeable;

/// Root node of one full-viewport section.
#[derive(Component, Debug, Clone, Copy)]
pub struct SectionRoot(pub usize);

/// A fade-marked element inside a section.
#[derive(Component, Debug, Clone, Copy)]
pub struct SectionElement {
    pub section: usize,
    pub order: usize,
}

/// A marker in the indicator rail. Clicking it jumps straight to its section.
#[derive(Component, Debug, Clone, Copy)]
pub struct SectionIndicator(pub usize);

/// Convert a wheel event into a browser-style vertical delta in pixels.
pub fn wheel_delta_px(event: &MouseWheel) -> f32 {
    let lines = match event.unit {
        MouseScrollUnit::Line => event.y * PIXELS_PER_LINE,
        MouseScrollUnit::Pixel => event.y,
    };
    // Bevy reports wheel-up as positive; the browser reports scroll-down as positive.
    -lines
}

fn log_outcome(outcome: ChangeOutcome) {
    match outcome {
        ChangeOutcome::Started { from, to } => info!("Section {from} → {to}"),
        ChangeOutcome::Ignored(reason) => debug!("Section change ignored: {reason:?}"),
    }
}

pub fn section_wheel_input(
    time: Res<Time>,
    mut wheel: EventReader<MouseWheel>,
    mut input: ResMut<NavigationInput>,
    mut controller: ResMut<SectionController>,
) {
    for event in wheel.read() {
        let busy = controller.is_transitioning();
        if let Some(direction) = input.wheel(wheel_delta_px(event), time.elapsed(), busy) {
            log_outcome(controller.step(direction));
        }
    }
}

pub fn section_touch_input(
    time: Res<Time>,
    mut touches: EventReader<TouchInput>,
    mut input: ResMut<NavigationInput>,
    mut controller: ResMut<SectionController>,
) {
    for touch in touches.read() {
        match touch.phase {
            TouchPhase::Started => input.touch_start(touch.position.y),
            TouchPhase::Ended => {
                let busy = controller.is_transitioning();
                if let Some(direction) = input.touch_end(touch.position.y, time.elapsed(), busy) {
                    log_outcome(controller.step(direction));
                }
            }
            TouchPhase::Canceled => input.touch_cancel(),
            TouchPhase::Moved => {}
        }
    }
}

pub fn section_indicator_input(
    indicators: Query<(&Interaction, &SectionIndicator), Changed<Interaction>>,
    mut controller: ResMut<SectionController>,
) {
    for (interaction, indicator) in &indicators {
        if *interaction == Interaction::Pressed {
            log_outcome(controller.change_section(indicator.0 as isize));
        }
    }
}

pub fn advance_sections(time: Res<Time>, mut controller: ResMut<SectionController>) {
    if let Some(current) = controller.advance(time.delta()) {
        debug!("Section {current} settled");
    }
}

pub fn apply_section_layers(
    controller: Res<SectionController>,
    mut roots: Query<(&SectionRoot, &mut ZIndex, &mut Visibility)>,
) {
    for (root, mut z_index, mut visibility) in &mut roots {
        let z = controller.z_index(root.0);
        if z_index.0 != z {
            z_index.0 = z;
        }
        let wanted = if controller.is_visible(root.0) {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
        if *visibility != wanted {
            *visibility = wanted;
        }
    }
}

pub fn apply_section_fades(
    controller: Res<SectionController>,
    sequencer: Res<LoadingSequencer>,
    mut elements: Query<(
        &SectionElement,
        &Fadeable,
        Option<&mut TextColor>,
        Option<&mut ImageNode>,
        Option<&mut BackgroundColor>,
    )>,
) {
    let page = sequencer.content_opacity();
    for (element, fadeable, text, image, background) in &mut elements {
        let opacity = page * controller.element_opacity(element.section, element.order);
        fadeable.apply(opacity, text, image, background);
    }
}

pub fn update_section_indicators(
    controller: Res<SectionController>,
    mut indicators: Query<(&SectionIndicator, &mut BackgroundColor), Without<SectionElement>>,
) {
    // The rail highlights the destination as soon as a transition starts.
    let highlighted = match controller.phase() {
        SectionPhase::Idle { current } => current,
        SectionPhase::Transitioning { to, .. } => to,
    };
    for (indicator, mut background) in &mut indicators {
        let color = if indicator.0 == highlighted {
            INDICATOR_ACTIVE
        } else {
            INDICATOR_IDLE
        };
        if background.0 != color {
            background.0 = color;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wheel_delta_uses_browser_sign() {
        let down = MouseWheel {
            unit: MouseScrollUnit::Line,
            x: 0.0,
            y: -1.0,
            window: Entity::PLACEHOLDER,
        };
        assert_eq!(wheel_delta_px(&down), PIXELS_PER_LINE);

        let up = MouseWheel {
            unit: MouseScrollUnit::Pixel,
            x: 0.0,
            y: 12.0,
            window: Entity::PLACEHOLDER,
        };
        assert_eq!(wheel_delta_px(&up), -12.0);
    }
}
