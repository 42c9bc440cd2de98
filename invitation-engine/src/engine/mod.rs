pub mod animation;
pub mod camera;
pub mod core;
pub mod handoff;
pub mod loading;
pub mod sections;
pub mod systems;
pub mod theme;
