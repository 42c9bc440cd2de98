//! Page content. Each page spawns its entities `StateScoped` to its route
//! and tags them so the engine systems can fade, stack and animate them.

/// Home page: hero title, 3D experience panel and its captions.
pub mod home;

/// Groom and bride pages: three fade-in sections with an indicator rail.
pub mod invitation;
