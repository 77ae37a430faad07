//! Screen-space frame around the map: composite, avionics, border, north.

use std::f32::consts::{FRAC_PI_2, PI};

use radar_camera::controller::{vehicle_pitch, vehicle_roll};
use radar_core::constants::*;
use radar_core::draw::{DrawCommand, DrawList, ScreenRect};
use radar_core::enums::RadarShape;
use radar_core::sprites;
use radar_core::types::{Rgba, TextureHandle};

use super::push_icon;
use crate::error::LayerError;
use crate::frame::FrameContext;

const PITCH_FILL_COLOR: Rgba = Rgba::new(0, 255, 0, 155);
const RING_COLOR: Rgba = Rgba::new(255, 255, 255, 225);
const ALTITUDE_STRIP_COLOR: Rgba = Rgba::new(0, 0, 0, 100);
const ALTITUDE_MARKER_COLOR: Rgba = Rgba::new(255, 255, 255, 225);

/// The map render target masked to the radar shape. Falls back to flat
/// white when there is no render target.
pub fn draw_composite(
    ctx: &FrameContext,
    render_target: Option<TextureHandle>,
    out: &mut DrawList,
) -> Result<(), LayerError> {
    let texture = render_target
        .or(ctx.textures.white)
        .ok_or(LayerError::RenderTarget)?;
    out.push(DrawCommand::MaskedComposite {
        texture,
        rect: ctx.viewport.rect(),
        shape: ctx.viewport.shape,
        color: ctx.settings.circle_color,
    });
    Ok(())
}

/// Pitch meter and banking ring, plane with a circular radar only.
pub fn draw_plane_attitude(ctx: &FrameContext, out: &mut DrawList) -> Result<(), LayerError> {
    if !ctx.in_plane() || ctx.viewport.shape != RadarShape::Circle {
        return Ok(());
    }
    let rect = ctx.viewport.rect();
    let player = ctx.player.as_ref();

    if ctx.textures.white.is_some() {
        let level = ((vehicle_pitch(player) + FRAC_PI_2) / PI).clamp(0.0, 1.0);
        out.push(DrawCommand::FillMeter {
            rect,
            level,
            color: PITCH_FILL_COLOR,
        });
    }
    if let Some(ring) = ctx.textures.ring_plane {
        out.push(DrawCommand::Image {
            texture: ring,
            rect,
            rotation: vehicle_roll(player),
            color: RING_COLOR,
        });
    }
    Ok(())
}

/// Fade-out image after leaving an interior, `elapsed_ms` into the fade.
pub fn draw_exit_fade(
    ctx: &FrameContext,
    elapsed_ms: u64,
    out: &mut DrawList,
) -> Result<(), LayerError> {
    let texture = ctx
        .textures
        .exit_interior
        .ok_or(LayerError::MissingTexture("exit interior"))?;
    let alpha = 1.0 - elapsed_ms.min(INTERIOR_FADE_MS) as f32 / INTERIOR_FADE_MS as f32;
    out.push(DrawCommand::MaskedComposite {
        texture,
        rect: ctx.viewport.rect(),
        shape: ctx.viewport.shape,
        color: ctx.settings.circle_color.with_alpha((alpha * 255.0) as u8),
    });
    Ok(())
}

/// Border ring. A square border sits outside the radar by its own thickness.
pub fn draw_border(ctx: &FrameContext, shape: RadarShape, out: &mut DrawList) {
    let thickness = ctx.settings.border_thickness as f32;
    let r = ctx.viewport.rect();
    let rect = match shape {
        RadarShape::Circle => r,
        RadarShape::Square => ScreenRect::new(
            r.x - thickness,
            r.y - thickness,
            r.width + 2.0 * thickness,
            r.height + 2.0 * thickness,
        ),
    };
    out.push(DrawCommand::Border {
        rect,
        shape,
        thickness,
        color: ctx.settings.border_color,
    });
}

/// Altitude strip right of the radar, filled by the height gained since takeoff.
pub fn draw_altitude(ctx: &FrameContext, gain: f32, out: &mut DrawList) {
    let vp = &ctx.viewport;
    let width = ALTITUDE_STRIP_WIDTH * vp.scale.uniform;
    let strip_x = vp.origin.x + vp.size.x;
    let gain = gain.clamp(0.0, ALTITUDE_STRIP_MAX);
    let bar_y = vp.origin.y + vp.size.y - vp.size.y * gain / ALTITUDE_STRIP_MAX;

    out.push(DrawCommand::Rect {
        rect: ScreenRect::new(strip_x + width, vp.origin.y, width, vp.size.y),
        color: ALTITUDE_STRIP_COLOR,
    });
    out.push(DrawCommand::Rect {
        rect: ScreenRect::new(strip_x + width * 0.85, bar_y, width * 1.3, width * 0.2),
        color: ALTITUDE_MARKER_COLOR,
    });
}

/// Compass north on the orbit edge, rotating against the camera.
pub fn draw_north(ctx: &FrameContext, out: &mut DrawList) -> Result<(), LayerError> {
    let texture = ctx
        .textures
        .icon_handle(sprites::NORTH)
        .ok_or(LayerError::MissingTexture("north marker"))?;
    let angle = -ctx.camera.yaw - FRAC_PI_2;
    let center = ctx.orbit().point_at_angle(angle);
    push_icon(out, texture, center, ctx.icon_size(NORTH_MARKER_SIZE), 0.0);
    Ok(())
}
