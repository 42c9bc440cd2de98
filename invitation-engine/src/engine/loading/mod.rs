//! Resource probing and the loading sequencer that gates first paint.
//!
//! Three probes (fonts, images, document) flip monotonic flags in
//! [`progress::LoadingStatus`]. The [`sequencer::LoadingSequencer`] turns those
//! flags into a non-decreasing progress value and walks
//! `Probing → Completing → Revealed` exactly once per page visit.

/// Loading overlay UI: progress bar, status line and fade-out.
pub mod overlay;

/// Readiness checks for each resource class with their fallback deadlines.
pub mod probe;

/// Bevy systems feeding asset-server and document state into the probes.
pub mod probe_systems;

/// Per-page loading flags.
pub mod progress;

/// Progress aggregation and the reveal state machine.
pub mod sequencer;
