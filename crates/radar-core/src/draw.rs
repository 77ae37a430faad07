//! Backend-neutral draw list and the device interface the radar renders through.
//!
//! The compositor never talks to a graphics API. It asks a `RenderDevice` for
//! textures and a render target, then emits an ordered `DrawList` that the
//! backend replays.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::enums::{DeviceStatus, RadarShape};
use crate::types::{Rgba, TextureHandle};
use crate::view::ProjectionContext;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DeviceError {
    #[error("texture {0:?} not found")]
    TextureNotFound(String),
    #[error("render target of size {0} could not be created")]
    RenderTarget(u32),
    #[error("device lost")]
    Lost,
}

/// A texture the device loaded, with its pixel size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadedTexture {
    pub handle: TextureHandle,
    pub width: u32,
    pub height: u32,
}

/// Graphics device as seen by the radar.
pub trait RenderDevice {
    /// Cooperative-level check, polled at the start of every entry point.
    fn status(&self) -> DeviceStatus;

    fn supports_scissor(&self) -> bool;

    fn load_texture(&mut self, name: &str) -> Result<LoadedTexture, DeviceError>;

    /// 1x1 texture of a flat color.
    fn create_solid_texture(&mut self, color: Rgba) -> Result<TextureHandle, DeviceError>;

    /// Square render target of `size` pixels.
    fn create_render_target(&mut self, size: u32) -> Result<TextureHandle, DeviceError>;

    fn release(&mut self, handle: TextureHandle);
}

/// Pixel rectangle (top-left origin).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScreenRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl ScreenRect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Square of side `size` centered on `center`.
    pub fn centered(center: Vec2, size: f32) -> Self {
        Self::new(center.x - size * 0.5, center.y - size * 0.5, size, size)
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width * 0.5, self.y + self.height * 0.5)
    }
}

/// Vertex of the GPS polyline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoutePoint {
    pub position: Vec3,
    pub color: Rgba,
}

/// One primitive for the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DrawCommand {
    /// Redirect output into the square render target and clear it.
    BeginTarget {
        target: TextureHandle,
        size: u32,
        clear: Rgba,
    },
    /// Back to the screen.
    EndTarget,
    /// Textured quad, rotated about its center by `rotation` radians.
    Image {
        texture: TextureHandle,
        rect: ScreenRect,
        rotation: f32,
        color: Rgba,
    },
    /// Flat-colored quad.
    Rect { rect: ScreenRect, color: Rgba },
    /// Flat-colored convex polygon (indicator glyphs).
    Polygon { points: Vec<Vec2>, color: Rgba },
    /// World-placed quad projected with `view`. A `None` texture draws flat color.
    Billboard {
        texture: Option<TextureHandle>,
        position: Vec3,
        rotation: Vec3,
        size: Vec2,
        view: ProjectionContext,
        color: Rgba,
    },
    /// World polyline with constant pixel width.
    Polyline {
        points: Vec<RoutePoint>,
        width: f32,
        view: ProjectionContext,
        scissor: Option<ScreenRect>,
    },
    /// Texture masked to the radar shape (soft circle or plain blit).
    MaskedComposite {
        texture: TextureHandle,
        rect: ScreenRect,
        shape: RadarShape,
        color: Rgba,
    },
    /// Radar border ring.
    Border {
        rect: ScreenRect,
        shape: RadarShape,
        thickness: f32,
        color: Rgba,
    },
    /// Pitch meter filled from the bottom up to `level` in 0..=1.
    FillMeter {
        rect: ScreenRect,
        level: f32,
        color: Rgba,
    },
    /// Center-aligned text in `rect`.
    Text {
        text: String,
        rect: ScreenRect,
        font_size: f32,
        color: Rgba,
        outline: Option<Rgba>,
    },
}

impl DrawCommand {
    /// Short name used for summaries and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            DrawCommand::BeginTarget { .. } => "begin_target",
            DrawCommand::EndTarget => "end_target",
            DrawCommand::Image { .. } => "image",
            DrawCommand::Rect { .. } => "rect",
            DrawCommand::Polygon { .. } => "polygon",
            DrawCommand::Billboard { .. } => "billboard",
            DrawCommand::Polyline { .. } => "polyline",
            DrawCommand::MaskedComposite { .. } => "masked_composite",
            DrawCommand::Border { .. } => "border",
            DrawCommand::FillMeter { .. } => "fill_meter",
            DrawCommand::Text { .. } => "text",
        }
    }
}

/// Ordered draw commands for one frame.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DrawList {
    pub commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands.iter()
    }

    /// Number of commands of the given kind.
    pub fn count(&self, kind: &str) -> usize {
        self.commands.iter().filter(|c| c.kind() == kind).count()
    }

    /// Image commands drawn with `texture`.
    pub fn images_of(&self, texture: TextureHandle) -> Vec<ScreenRect> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Image {
                    texture: t, rect, ..
                } if *t == texture => Some(*rect),
                _ => None,
            })
            .collect()
    }
}
