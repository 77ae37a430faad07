//! Radar compositor and the per-frame layers it drives.
//!
//! `Compositor` owns every piece of cross-frame state (camera, textures,
//! tile set, blip and gang-zone caches, render target) and turns one
//! `WorldQuery` snapshot into an ordered `DrawList` per frame. Layers are
//! plain functions over a read-only `FrameContext`; a failing layer is
//! logged and skipped, never propagated to the host.

pub mod airstrips;
pub mod blips;
pub mod compositor;
pub mod error;
pub mod frame;
pub mod gang_zones;
pub mod gps;
pub mod layers;
pub mod textures;
pub mod tiles;

pub use radar_core as core;

pub use blips::{Blip, BlipAggregator};
pub use compositor::{Compositor, CompositorConfig};
pub use error::LayerError;
pub use frame::FrameInput;
pub use tiles::TileProvider;
