//! Thin host-environment bridge.
//!
//! In the browser every call goes through `web-sys`; on native builds the
//! same surface is backed by the filesystem or answered with a fixed value
//! so the engine can run in a desktop window during development.

#[cfg(not(target_arch = "wasm32"))]
mod native;
#[cfg(target_arch = "wasm32")]
mod web;

#[cfg(not(target_arch = "wasm32"))]
pub use native::*;
#[cfg(target_arch = "wasm32")]
pub use web::*;
