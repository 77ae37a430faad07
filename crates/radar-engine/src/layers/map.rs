//! Render-target passes: map tiles, gang zones and the 3D player icon.

use glam::{Vec2, Vec3};

use radar_core::constants::*;
use radar_core::draw::{DrawCommand, DrawList};
use radar_core::enums::RadarShape;
use radar_core::sprites;
use radar_core::types::Rgba;

use crate::error::LayerError;
use crate::frame::FrameContext;
use crate::gang_zones::GangZone;
use crate::tiles::{visible_radius, TileProvider};

/// Visible tiles as billboards, in grid order.
pub fn draw_tiles(
    ctx: &FrameContext,
    tiles: &TileProvider,
    out: &mut DrawList,
) -> Result<(), LayerError> {
    let mut radius = visible_radius(
        ctx.pose.position.z,
        ctx.camera.fov,
        ctx.camera.offset_y,
        ctx.in_aircraft(),
    );
    if ctx.viewport.shape == RadarShape::Square {
        radius *= VISIBLE_RADIUS_SQUARE_FACTOR;
    }

    // Culling runs against the square target itself.
    let frustum = ctx.view.with_aspect(1.0);
    tiles.for_each_visible(ctx.pose.position, radius, Some(&frustum), |tile| {
        out.push(DrawCommand::Billboard {
            texture: Some(tile.texture),
            position: tile.center.extend(0.0),
            rotation: Vec3::ZERO,
            size: Vec2::splat(tile.size),
            view: ctx.view,
            color: Rgba::WHITE,
        });
    });
    Ok(())
}

/// Cached zones as flat quads at one shared depth.
pub fn draw_gang_zones(
    ctx: &FrameContext,
    zones: &[GangZone],
    out: &mut DrawList,
) -> Result<(), LayerError> {
    if !ctx.settings.show_gang_zones || zones.is_empty() {
        return Ok(());
    }
    let texture = ctx
        .textures
        .white
        .or(ctx.textures.line)
        .ok_or(LayerError::MissingTexture("gang zone fill"))?;

    for zone in zones {
        let Some((position, size)) = zone.quad(ctx.camera.position) else {
            continue;
        };
        out.push(DrawCommand::Billboard {
            texture: Some(texture),
            position,
            rotation: Vec3::ZERO,
            size,
            view: ctx.view,
            color: zone.color,
        });
    }
    Ok(())
}

/// Player arrow in the 3D pass, stacked above `blip_count` icons.
///
/// Hidden while flying a plane with a circular radar, where the banking
/// ring takes its place.
pub fn draw_player_icon(
    ctx: &FrameContext,
    blip_count: usize,
    out: &mut DrawList,
) -> Result<(), LayerError> {
    if ctx.in_plane() && ctx.viewport.shape == RadarShape::Circle {
        return Ok(());
    }
    let texture = ctx
        .textures
        .icon_handle(sprites::CENTRE)
        .ok_or(LayerError::MissingTexture("player icon"))?;
    let heading = ctx.player.map(|p| p.heading).unwrap_or(0.0);
    let size = PLAYER_ICON_SIZE * ctx.camera.height / CAMERA_DEFAULT_HEIGHT;
    let depth = RADAR_PLANE_Z + (blip_count + 1) as f32 * PLAYER_ICON_DEPTH_STEP;

    out.push(DrawCommand::Billboard {
        texture: Some(texture),
        position: ctx.camera.position.extend(depth),
        rotation: Vec3::new(0.0, 0.0, heading),
        size: Vec2::splat(size),
        view: ctx.view,
        color: Rgba::WHITE,
    });
    Ok(())
}
