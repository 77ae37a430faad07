//! Per-frame draw passes.
//!
//! Each pass reads a `FrameContext`, appends to the frame's `DrawList` and
//! reports failures as `LayerError` so the compositor can drop just that
//! pass.

pub mod airstrips;
pub mod blips2d;
pub mod hud;
pub mod indicators;
pub mod legends;
pub mod map;
pub mod radio;
pub mod route;

use glam::Vec2;

use radar_core::draw::{DrawCommand, DrawList, ScreenRect};
use radar_core::types::{Rgba, TextureHandle};

/// Square image centered on `center`.
pub(crate) fn push_icon(
    out: &mut DrawList,
    texture: TextureHandle,
    center: Vec2,
    size: f32,
    rotation: f32,
) {
    out.push(DrawCommand::Image {
        texture,
        rect: ScreenRect::centered(center, size),
        rotation,
        color: Rgba::WHITE,
    });
}
