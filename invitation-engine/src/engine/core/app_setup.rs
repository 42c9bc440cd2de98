use bevy::asset::AssetMetaCheck;
use bevy::picking::mesh_picking::MeshPickingPlugin;
use bevy::prelude::*;
// Crate engine modules
use crate::engine::camera::scroll_container::{
    ScrollContainer, measure_scroll_container, scroll_container_input, update_scroll_offset,
};
use crate::engine::camera::scroll_rig::{drive_experience_panel, drive_scroll_rig};
use crate::engine::core::routes::{
    NavigateTo, Route, arm_experience_handoff, handle_navigation, initial_route,
    reset_page_scope,
};
use crate::engine::core::window_config::create_window_config;
use crate::engine::handoff::animator::{HandoffAnimator, consume_scroll_handoff};
use crate::engine::handoff::mailbox::ScrollHandoff;
use crate::engine::loading::overlay::{
    fade_loading_overlay, hide_loading_overlay, spawn_loading_overlay, update_loading_overlay,
};
use crate::engine::loading::probe_systems::{probe_document, probe_fonts, probe_images};
use crate::engine::loading::progress::LoadingStatus;
use crate::engine::loading::sequencer::{
    LoadingPhase, LoadingSequencer, drive_loading_sequencer, page_revealed,
};
use crate::engine::sections::parallax::mouse_parallax;
use crate::engine::sections::systems::{
    advance_sections, apply_section_fades, apply_section_layers, section_indicator_input,
    section_touch_input, section_wheel_input, update_section_indicators,
};
use crate::engine::systems::audio::{
    MusicPreference, spawn_background_music, toggle_background_music,
};
use crate::engine::systems::debug_readout::update_debug_readout;
use crate::engine::theme::background::{
    ThemeBlend, blend_theme_background, cycle_theme, spawn_theme_switcher,
};
use crate::engine::theme::state::load_platform_theme;
// Pages
use crate::pages::home::{
    animate_hero, fade_experience_title, spawn_home_overlay, spawn_home_scene,
};
use crate::pages::invitation::{
    animate_page_title, fade_page_content, go_home, open_maps_link, spawn_invitation_page,
    toggle_qr,
};

pub fn create_app() -> App {
    let mut app = App::new();

    app.add_plugins(create_default_plugins())
        .add_plugins(MeshPickingPlugin);

    register_state(&mut app, initial_route());
    add_page_lifecycle(&mut app);
    add_loading_systems(&mut app);
    add_home_systems(&mut app);
    add_invitation_systems(&mut app);
    add_invitation_buttons(&mut app);
    add_shared_chrome(&mut app);

    app
}

/// States, events and every resource a route's `OnEnter` systems read.
/// The initial `OnEnter` runs before any startup schedule, so nothing here
/// may be deferred to a startup system.
fn register_state(app: &mut App, route: Route) {
    app.insert_state(route)
        .init_state::<LoadingPhase>()
        .enable_state_scoped_entities::<Route>()
        .add_event::<NavigateTo>();

    // Process-wide state that survives navigation
    app.init_resource::<ScrollHandoff>()
        .init_resource::<MusicPreference>()
        .init_resource::<ThemeBlend>()
        .insert_resource(load_platform_theme())
        .insert_resource(ClearColor(Color::BLACK));

    // Page-scoped state, replaced by reset_page_scope on every route entry
    app.init_resource::<LoadingStatus>()
        .init_resource::<LoadingSequencer>()
        .init_resource::<ScrollContainer>()
        .init_resource::<HandoffAnimator>();
}

fn add_page_lifecycle(app: &mut App) {
    app.add_systems(
        OnEnter(Route::Home),
        (
            reset_page_scope,
            spawn_home_scene,
            spawn_loading_overlay,
            arm_experience_handoff,
            spawn_home_overlay,
            spawn_theme_switcher,
            spawn_background_music,
        )
            .chain(),
    );
    for route in [Route::Groom, Route::Bride] {
        app.add_systems(
            OnEnter(route),
            (reset_page_scope, spawn_invitation_page, spawn_loading_overlay).chain(),
        );
    }
    app.add_systems(OnEnter(LoadingPhase::Revealed), hide_loading_overlay);
}

fn add_loading_systems(app: &mut App) {
    app.add_systems(
        Update,
        (probe_fonts, probe_images, probe_document)
            .before(drive_loading_sequencer)
            .run_if(not(page_revealed)),
    );
    add_loading_sequencer(app);
    app.add_systems(
        Update,
        (update_loading_overlay, fade_loading_overlay)
            .chain()
            .after(drive_loading_sequencer)
            .run_if(not(page_revealed)),
    );
    if cfg!(debug_assertions) {
        app.add_systems(
            Update,
            update_debug_readout
                .after(drive_loading_sequencer)
                .run_if(not(page_revealed)),
        );
    }
}

/// The sequencer keeps running once revealed; it times the content fade-in.
fn add_loading_sequencer(app: &mut App) {
    app.add_systems(Update, drive_loading_sequencer);
}

// Home page: scroll rig and handoff consumer
fn add_home_systems(app: &mut App) {
    app.add_systems(
        Update,
        (
            measure_scroll_container,
            scroll_container_input.run_if(page_revealed),
            consume_scroll_handoff,
            update_scroll_offset,
            drive_scroll_rig,
            drive_experience_panel,
            animate_hero,
            fade_experience_title,
        )
            .chain()
            .after(drive_loading_sequencer)
            .run_if(in_state(Route::Home)),
    );
}

// Groom and bride pages: section navigation
fn add_invitation_systems(app: &mut App) {
    app.add_systems(
        Update,
        (
            (section_wheel_input, section_touch_input, section_indicator_input)
                .run_if(page_revealed),
            advance_sections.run_if(page_revealed),
            apply_section_layers,
            apply_section_fades,
            update_section_indicators,
            fade_page_content,
            animate_page_title,
            mouse_parallax.run_if(page_revealed),
        )
            .chain()
            .after(drive_loading_sequencer)
            .run_if(on_invitation_page),
    );
}

fn add_invitation_buttons(app: &mut App) {
    app.add_systems(
        Update,
        (go_home, toggle_qr, open_maps_link)
            .run_if(on_invitation_page)
            .run_if(page_revealed),
    );
}

fn add_shared_chrome(app: &mut App) {
    app.add_systems(
        Update,
        (
            handle_navigation,
            (cycle_theme, toggle_background_music).run_if(page_revealed),
            blend_theme_background,
        ),
    );
}

fn on_invitation_page(route: Res<State<Route>>) -> bool {
    matches!(route.get(), Route::Groom | Route::Bride)
}

fn create_default_plugins() -> impl PluginGroup {
    let window_config = WindowPlugin {
        primary_window: Some(create_window_config()),
        ..default()
    };

    let asset_config = AssetPlugin {
        meta_check: AssetMetaCheck::Never,
        ..default()
    };

    DefaultPlugins.set(window_config).set(asset_config)
}
