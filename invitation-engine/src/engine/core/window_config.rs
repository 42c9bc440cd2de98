use bevy::prelude::*;
use bevy::window::PresentMode;

pub fn create_window_config() -> Window {
    #[cfg(target_arch = "wasm32")]
    {
        Window {
            title: "Happy Wedding".into(),
            canvas: Some("#bevy".into()),
            fit_canvas_to_parent: true,
            // Wheel and touch-move belong to the section controller and scroll rig.
            prevent_default_event_handling: true,
            present_mode: PresentMode::AutoVsync,
            ..default()
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        Window {
            title: "Happy Wedding".into(),
            present_mode: PresentMode::AutoVsync,
            ..default()
        }
    }
}
