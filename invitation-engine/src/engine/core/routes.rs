use bevy::prelude::*;
use constants::assets::{BRIDE_IMAGES, CUSTOM_FONTS, GROOM_IMAGES, HOME_IMAGES};
use constants::scroll_rig::EXPERIENCE_SCROLL_PROGRESS;

use crate::engine::camera::scroll_container::ScrollContainer;
use crate::engine::handoff::animator::HandoffAnimator;
use crate::engine::handoff::mailbox::{ScrollHandoff, SectionTag};
use crate::engine::loading::probe_systems::PageProbes;
use crate::engine::loading::progress::LoadingStatus;
use crate::engine::loading::sequencer::{LoadingPhase, LoadingSequencer};
use crate::engine::sections::controller::SectionController;
use crate::engine::sections::input::NavigationInput;
use crate::pages::invitation::InvitationCopy;
use crate::platform;

/// The page currently mounted. Page-scoped entities carry `StateScoped(route)`.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, States)]
pub enum Route {
    #[default]
    Home,
    Groom,
    Bride,
}

impl Route {
    pub const ALL: [Route; 3] = [Route::Home, Route::Groom, Route::Bride];

    /// Unknown paths land on the home page.
    pub fn from_path(path: &str) -> Self {
        match path.trim_end_matches('/') {
            "/groom" | "groom" => Self::Groom,
            "/bride" | "bride" => Self::Bride,
            _ => Self::Home,
        }
    }

    pub fn path(self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Groom => "/groom",
            Self::Bride => "/bride",
        }
    }

    pub fn fonts(self) -> &'static [&'static str] {
        CUSTOM_FONTS
    }

    pub fn images(self) -> &'static [&'static str] {
        match self {
            Self::Home => HOME_IMAGES,
            Self::Groom => GROOM_IMAGES,
            Self::Bride => BRIDE_IMAGES,
        }
    }

    /// Fade-marked element count per section. The home page scrolls instead.
    pub fn section_counts(self) -> Vec<usize> {
        match self {
            Self::Home => vec![0],
            Self::Groom | Self::Bride => InvitationCopy::for_route(self).section_counts(),
        }
    }
}

/// Request to mount another page. The only way routes change.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigateTo(pub Route);

pub fn initial_route() -> Route {
    Route::from_path(&platform::current_path())
}

pub fn handle_navigation(
    mut requests: EventReader<NavigateTo>,
    current: Res<State<Route>>,
    mut next_route: ResMut<NextState<Route>>,
) {
    for NavigateTo(route) in requests.read() {
        if route == current.get() {
            continue;
        }
        info!("→ Navigating to {}", route.path());
        if let Err(err) = platform::push_history(route.path()) {
            warn!("History entry for {} not recorded: {}", route.path(), err);
        }
        next_route.set(*route);
    }
}

/// Give the entered page fresh loading, section and scroll state.
pub fn reset_page_scope(
    mut commands: Commands,
    time: Res<Time>,
    asset_server: Res<AssetServer>,
    route: Res<State<Route>>,
    mut handoff: ResMut<ScrollHandoff>,
    mut next_phase: ResMut<NextState<LoadingPhase>>,
) {
    let route = *route.get();
    info!("→ Entering {:?} page", route);

    if handoff.is_in_flight() {
        debug!("Releasing scroll handoff left over from the previous page");
        handoff.finish();
    }

    commands.insert_resource(LoadingStatus::default());
    commands.insert_resource(LoadingSequencer::default());
    commands.insert_resource(PageProbes::request(
        &asset_server,
        route.fonts(),
        route.images(),
        time.elapsed(),
    ));
    commands.insert_resource(SectionController::new(route.section_counts()));
    commands.insert_resource(NavigationInput::default());
    commands.insert_resource(ScrollContainer::default());
    commands.insert_resource(HandoffAnimator::default());
    next_phase.set(LoadingPhase::Probing);
}

/// Turn a pending "experience" request into a scroll handoff for the home page.
pub fn arm_experience_handoff(mut handoff: ResMut<ScrollHandoff>) {
    if let Some(SectionTag::Experience) = handoff.take_target_section() {
        match handoff.set_target_scroll_progress(Some(EXPERIENCE_SCROLL_PROGRESS)) {
            Ok(()) => info!("Returning to the {} panel", SectionTag::Experience.name()),
            Err(err) => warn!("Scroll handoff not armed: {}", err),
        }
    }
}
