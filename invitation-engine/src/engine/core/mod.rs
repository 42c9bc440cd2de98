//! Core application setup and routing.
//!
//! Builds the Bevy app, owns the route state machine and resets page-scoped
//! state whenever a route is entered.

/// Application setup, plugin configuration and system scheduling.
pub mod app_setup;

/// Route state, navigation requests and per-page state reset.
pub mod routes;

/// Platform-specific window configuration for native and WASM builds.
pub mod window_config;
