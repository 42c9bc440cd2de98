//! Full-viewport section navigation for the groom and bride pages.
//!
//! The controller owns vertical navigation exclusively: wheel, swipe and
//! indicator clicks are normalised into section steps, and at most one fade
//! transition is ever in flight.

pub mod controller;
pub mod input;
pub mod parallax;
pub mod systems;
