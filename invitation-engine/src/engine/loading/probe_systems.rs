use std::time::Duration;

use bevy::asset::LoadState;
use bevy::prelude::*;

use super::probe::{AssetReadiness, FontProbe, ImageTally, ProbeOutcome, ResourceClass};
use super::progress::LoadingStatus;
use crate::platform;

/// Assets requested for the current page and the probes watching them.
#[derive(Resource)]
pub struct PageProbes {
    fonts: Vec<Handle<Font>>,
    images: Vec<Handle<Image>>,
    font_probe: FontProbe,
    tally: ImageTally,
    started_at: Duration,
}

impl PageProbes {
    /// Issue background loads for every font and image the page needs.
    pub fn request(
        asset_server: &AssetServer,
        font_paths: &[&'static str],
        image_paths: &[&'static str],
        now: Duration,
    ) -> Self {
        let fonts: Vec<Handle<Font>> = font_paths
            .iter()
            .map(|path| asset_server.load(*path))
            .collect();
        let images: Vec<Handle<Image>> = image_paths
            .iter()
            .map(|path| asset_server.load(*path))
            .collect();

        info!(
            "Probing {} fonts and {} images for page",
            fonts.len(),
            images.len()
        );

        Self {
            font_probe: FontProbe::new(!fonts.is_empty()),
            tally: ImageTally::new(images.len()),
            fonts,
            images,
            started_at: now,
        }
    }

    fn elapsed(&self, now: Duration) -> Duration {
        now.saturating_sub(self.started_at)
    }
}

fn readiness(asset_server: &AssetServer, id: impl Into<bevy::asset::UntypedAssetId>) -> AssetReadiness {
    match asset_server.get_load_state(id) {
        Some(LoadState::Loaded) => AssetReadiness::Loaded,
        Some(LoadState::Failed(_)) => AssetReadiness::Failed,
        _ => AssetReadiness::Pending,
    }
}

pub fn probe_fonts(
    time: Res<Time>,
    asset_server: Res<AssetServer>,
    probes: Res<PageProbes>,
    mut status: ResMut<LoadingStatus>,
) {
    if status.is_set(ResourceClass::Fonts) {
        return;
    }

    let fonts = probes
        .fonts
        .iter()
        .map(|handle| readiness(&asset_server, handle));
    let outcome = probes
        .font_probe
        .poll(fonts, probes.elapsed(time.elapsed()));

    match outcome {
        ProbeOutcome::Ready => {
            status.mark(ResourceClass::Fonts);
            info!("✓ Fonts loaded");
        }
        ProbeOutcome::TimedOut => {
            status.mark(ResourceClass::Fonts);
            warn!("Font loading fallback after timeout");
        }
        ProbeOutcome::Pending => {}
    }
}

pub fn probe_images(
    time: Res<Time>,
    asset_server: Res<AssetServer>,
    mut probes: ResMut<PageProbes>,
    mut status: ResMut<LoadingStatus>,
) {
    if status.is_set(ResourceClass::Images) {
        return;
    }

    let elapsed = probes.elapsed(time.elapsed());
    let PageProbes { images, tally, .. } = &mut *probes;
    for (index, handle) in images.iter().enumerate() {
        let state = readiness(&asset_server, handle);
        if tally.record(index, state) && state == AssetReadiness::Failed {
            warn!("Image {:?} failed to load, counting it as settled", handle.path());
        }
    }

    match tally.poll(elapsed) {
        ProbeOutcome::Ready => {
            status.mark(ResourceClass::Images);
            info!(
                "✓ Images settled ({}/{}, {} failed)",
                tally.settled(),
                tally.total(),
                tally.failures()
            );
        }
        ProbeOutcome::TimedOut => {
            status.mark(ResourceClass::Images);
            warn!(
                "Image loading fallback after timeout ({}/{} settled)",
                tally.settled(),
                tally.total()
            );
        }
        ProbeOutcome::Pending => {}
    }
}

pub fn probe_document(mut status: ResMut<LoadingStatus>) {
    if status.is_set(ResourceClass::Dom) {
        return;
    }

    if platform::document_state().poll().is_done() {
        status.mark(ResourceClass::Dom);
        info!("✓ Document ready");
    }
}
