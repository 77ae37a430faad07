//! Headless sandbox world for the radar.
//!
//! Owns a hecs ECS world seeded with `ChaCha8Rng` and implements
//! `WorldQuery` on top of it, so the compositor can be driven without a
//! host game. Also provides `HeadlessDevice`, a `RenderDevice` that hands
//! out texture handles without touching a GPU.

pub mod components;
pub mod device;
pub mod movement;
pub mod terrain;
pub mod world;

pub use radar_core as core;

pub use device::HeadlessDevice;
pub use world::{SandboxConfig, SandboxWorld};

#[cfg(test)]
mod tests;
