//! Geometry and projection utilities for the radar.
//!
//! Stateless transforms shared by every layer: the custom world-to-screen
//! projection, radar-space mapping, orbit (boundary) algebra and the
//! on-screen viewport layout.

pub mod orbit;
pub mod projection;
pub mod radar_space;
pub mod viewport;

pub use radar_core as core;

pub use orbit::{direction_to_orbit_angle, Orbit};
pub use projection::world_to_screen;
pub use viewport::RadarViewport;
